pub mod controller;
pub mod guard;
pub mod signal;
pub mod store;

pub use controller::{use_login_action, use_session, AuthProvider, SessionController};
pub use guard::{decide, RouteAccess, RouteDecision};
pub use signal::{InvalidationBus, InvalidationEvent, InvalidationReason, Subscription};
pub use store::{Session, SessionStore, StorageError};
