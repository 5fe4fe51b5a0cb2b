use std::cell::Cell;
use std::rc::Rc;

use leptos::*;

use crate::api::{use_api, ApiClient, UserRecord};
use crate::session::signal::{InvalidationBus, InvalidationEvent, InvalidationReason, Subscription};
use crate::session::store::{Session, SessionStore, StorageError};

/// Owner of the in-memory "current user" value. Two states: Unauthenticated
/// (initial) and Authenticated. Every transition mirrors the persisted store
/// before touching memory, so a crash between steps leaves storage at least
/// as restrictive as memory.
#[derive(Clone)]
pub struct SessionController {
    store: SessionStore,
    session: RwSignal<Option<Session>>,
    expiry_notice: RwSignal<Option<InvalidationReason>>,
    booted: Rc<Cell<bool>>,
    in_transition: Rc<Cell<bool>>,
    pending_invalidation: Rc<Cell<Option<InvalidationReason>>>,
}

impl SessionController {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            session: create_rw_signal(None),
            expiry_notice: create_rw_signal(None),
            booted: Rc::new(Cell::new(false)),
            in_transition: Rc::new(Cell::new(false)),
            pending_invalidation: Rc::new(Cell::new(None)),
        }
    }

    /// Restores a persisted session, if any. Runs once; later calls are
    /// no-ops.
    pub fn boot(&self) {
        if self.booted.replace(true) {
            return;
        }
        if let Some(session) = self.store.load() {
            log::info!("restored session for {}", session.user.email);
            self.session.set(Some(session));
        }
    }

    /// Transition to Authenticated. Storage is written first; a write
    /// failure aborts the transition so a page refresh can never silently
    /// drop an in-memory-only session.
    pub fn login(&self, session: Session) -> Result<(), StorageError> {
        self.in_transition.set(true);
        let result = self.store.save(&session);
        if result.is_ok() {
            self.session.set(Some(session));
        }
        self.in_transition.set(false);
        // An invalidation that arrived mid-transition wins over the login.
        if let Some(reason) = self.pending_invalidation.take() {
            self.apply_invalidation(reason);
        }
        result
    }

    /// Transition to Unauthenticated. Idempotent; storage errors are
    /// swallowed because the degraded outcome is the intended state anyway.
    pub fn logout(&self) {
        let _ = self.store.clear();
        self.session.set(None);
    }

    /// Invoked only through the invalidation bus subscription, never by
    /// view code.
    pub fn on_invalidation(&self, event: &InvalidationEvent) {
        if self.in_transition.get() {
            self.pending_invalidation.set(Some(event.reason));
            return;
        }
        self.apply_invalidation(event.reason);
    }

    fn apply_invalidation(&self, reason: InvalidationReason) {
        if self.session.with_untracked(|session| session.is_none()) {
            return;
        }
        log::warn!("session invalidated: {:?}", reason);
        self.logout();
        if reason == InvalidationReason::TokenExpired {
            self.expiry_notice.set(Some(reason));
        }
    }

    /// Wires this controller to the invalidation bus. The returned
    /// subscription must be kept alive for as long as the controller should
    /// react to events.
    pub fn attach(&self, bus: &InvalidationBus) -> Subscription {
        let controller = self.clone();
        bus.subscribe(move |event| controller.on_invalidation(event))
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(|session| session.is_some())
    }

    pub fn current_user(&self) -> Option<UserRecord> {
        self.session
            .with(|session| session.as_ref().map(|s| s.user.clone()))
    }

    /// Token accessor for the outbound request layer; deliberately
    /// untracked so issuing a request never becomes a reactive dependency.
    pub fn current_token(&self) -> Option<String> {
        self.session
            .with_untracked(|session| session.as_ref().map(|s| s.access_token.clone()))
    }

    /// One-shot expiry notice, set only when a `TokenExpired` invalidation
    /// tears down an authenticated session.
    pub fn pending_notice(&self) -> ReadSignal<Option<InvalidationReason>> {
        self.expiry_notice.read_only()
    }

    pub fn take_notice(&self) -> Option<InvalidationReason> {
        let notice = self.expiry_notice.get_untracked();
        if notice.is_some() {
            self.expiry_notice.set(None);
        }
        notice
    }
}

/// Builds the bus, store, and controller, boots the controller before any
/// dependent view renders, and provides everything as context.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let bus = InvalidationBus::new();
    let controller = SessionController::new(SessionStore::local());
    controller.boot();
    controller.attach(&bus).leak();

    let token_source = {
        let controller = controller.clone();
        Rc::new(move || controller.current_token()) as Rc<dyn Fn() -> Option<String>>
    };
    provide_context(ApiClient::new(bus.clone(), token_source));
    provide_context(bus);
    provide_context(controller);
    children()
}

pub fn use_session() -> SessionController {
    expect_context::<SessionController>()
}

/// Exchanges a raw Google credential for a session and logs it in.
pub fn use_login_action() -> Action<String, Result<(), String>> {
    let controller = use_session();
    let api = use_api();

    create_action(move |credential: &String| {
        let credential = credential.clone();
        let api = api.clone();
        let controller = controller.clone();
        async move {
            let session = api.exchange_credential(&credential).await?;
            controller.login(session).map_err(|err| err.to_string())
        }
    })
}
