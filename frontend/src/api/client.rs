use std::rc::Rc;

use leptos::expect_context;
use reqwest::{header, Client, StatusCode};

use crate::api::types::{ApiError, AuthResponse, GoogleTokenRequest, UserRecord};
use crate::config;
use crate::session::signal::{InvalidationBus, InvalidationEvent};
use crate::session::store::Session;

pub type TokenSource = Rc<dyn Fn() -> Option<String>>;

/// HTTP client for the identity backend. It never mutates session state
/// itself: a rejected credential is announced on the invalidation bus and
/// the session controller reacts from there.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    bus: InvalidationBus,
    token_source: TokenSource,
}

impl ApiClient {
    pub fn new(bus: InvalidationBus, token_source: TokenSource) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            bus,
            token_source,
        }
    }

    pub fn new_with_base_url(
        base_url: impl Into<String>,
        bus: InvalidationBus,
        token_source: TokenSource,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            bus,
            token_source,
        }
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, String> {
        let token = (self.token_source)().ok_or("No access token")?;
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| "Invalid token format")?,
        );
        Ok(headers)
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            self.bus.publish(InvalidationEvent::token_expired());
        }
    }

    /// Identity exchange: trades a raw Google credential for the session
    /// pair. A rejection here is a login-form concern, not a session
    /// invalidation; nothing is published on the bus.
    pub async fn exchange_credential(&self, credential: &str) -> Result<Session, String> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .post(format!("{}/auth/google", base_url))
            .json(&GoogleTokenRequest {
                token: credential.to_string(),
            })
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if response.status().is_success() {
            let auth: AuthResponse = response
                .json()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))?;
            Ok(Session {
                access_token: auth.access_token,
                user: auth.user,
            })
        } else {
            let error: ApiError = response
                .json()
                .await
                .map_err(|e| format!("Failed to parse error: {}", e))?;
            Err(error.detail)
        }
    }

    /// Fetches the profile behind the current access token.
    pub async fn get_me(&self) -> Result<UserRecord, String> {
        let headers = self.auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .client
            .get(format!("{}/auth/me", base_url))
            .headers(headers)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        self.handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        } else {
            let error: ApiError = response
                .json()
                .await
                .map_err(|e| format!("Failed to parse error: {}", e))?;
            Err(error.detail)
        }
    }
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::session::signal::InvalidationReason;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn user_json() -> serde_json::Value {
        json!({
            "id": 7,
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "profile_picture": "https://lh3.example.com/p/ada",
            "google_id": "g-123",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": null
        })
    }

    fn no_token() -> TokenSource {
        Rc::new(|| None)
    }

    fn token(value: &'static str) -> TokenSource {
        Rc::new(move || Some(value.to_string()))
    }

    #[tokio::test]
    async fn exchange_credential_returns_the_session_pair() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/google");
            then.status(200).json_body(json!({
                "access_token": "jwt-1",
                "token_type": "bearer",
                "user": user_json()
            }));
        });

        let bus = InvalidationBus::new();
        let api = ApiClient::new_with_base_url(server.url("/api"), bus, no_token());
        let session = api.exchange_credential("google-credential").await.unwrap();

        assert_eq!(session.access_token, "jwt-1");
        assert_eq!(session.user.email, "ada@example.com");
        assert_eq!(session.user.display_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn rejected_credential_surfaces_the_backend_detail() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/google");
            then.status(401)
                .json_body(json!({ "detail": "Invalid Google token" }));
        });

        let bus = InvalidationBus::new();
        let seen = Rc::new(RefCell::new(0));
        let subscription = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |_| *seen.borrow_mut() += 1)
        };

        let api = ApiClient::new_with_base_url(server.url("/api"), bus, no_token());
        let err = api.exchange_credential("bad").await.unwrap_err();
        assert_eq!(err, "Invalid Google token");
        // No session existed, so nothing is invalidated.
        assert_eq!(*seen.borrow(), 0);
        subscription.cancel();
    }

    #[tokio::test]
    async fn get_me_attaches_the_bearer_token() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/auth/me")
                .header("authorization", "Bearer jwt-1");
            then.status(200).json_body(user_json());
        });

        let bus = InvalidationBus::new();
        let api = ApiClient::new_with_base_url(server.url("/api"), bus, token("jwt-1"));
        let user = api.get_me().await.unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn unauthorized_response_publishes_token_expired() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/auth/me");
            then.status(401)
                .json_body(json!({ "detail": "Token has expired" }));
        });

        let bus = InvalidationBus::new();
        let seen = Rc::new(RefCell::new(None));
        let subscription = {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |event: &InvalidationEvent| {
                *seen.borrow_mut() = Some(event.reason);
            })
        };

        let api = ApiClient::new_with_base_url(server.url("/api"), bus, token("stale"));
        let err = api.get_me().await.unwrap_err();
        assert_eq!(err, "Token has expired");
        assert_eq!(*seen.borrow(), Some(InvalidationReason::TokenExpired));
        subscription.cancel();
    }

    #[tokio::test]
    async fn get_me_without_a_token_fails_before_sending() {
        let bus = InvalidationBus::new();
        let api = ApiClient::new_with_base_url("http://127.0.0.1:9", bus, no_token());
        let err = api.get_me().await.unwrap_err();
        assert_eq!(err, "No access token");
    }
}
