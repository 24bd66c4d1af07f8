//! Login, stored-session validation, and logout.

use std::sync::RwLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, warn};

use crate::api::transport::ApiRequest;
use crate::api::{ApiClient, ApiError};
use crate::config::Config;

use super::CredentialStore;

/// Login endpoint. Credentials go in the Authorization header; the
/// response body is the bearer token as plain text.
const LOGIN_PATH: &str = "/api/auth/login";

/// Authentication state, derived from the in-memory token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(String),
}

/// Orchestrates the credential exchange and owns the in-memory token.
///
/// Construct one per process and hand it out by handle; resource
/// fetches read the token through [`token`](AuthSession::token).
/// The token is written only by `login` and cleared only by `logout`.
pub struct AuthSession {
    client: ApiClient,
    store: CredentialStore,
    config: Config,
    token: RwLock<Option<String>>,
}

impl AuthSession {
    pub fn new(client: ApiClient, store: CredentialStore, config: Config) -> Self {
        Self {
            client,
            store,
            config,
            token: RwLock::new(None),
        }
    }

    /// Exchange credentials for a bearer token.
    ///
    /// On success the `{username, password, token}` triple is persisted
    /// and the in-memory token replaced. On any failure the previous
    /// state, stored and in-memory, is left untouched.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let request = match self.login_request(username, password) {
            Ok(request) => request,
            Err(_) => return false,
        };

        let token = match self.client.request_token(request).await {
            Ok(token) => token,
            Err(error) => {
                debug!(%error, "login failed");
                return false;
            }
        };

        if let Err(error) = self.store.save(username, password, &token) {
            warn!(%error, "failed to persist credentials");
            return false;
        }

        self.set_token(Some(token));
        true
    }

    /// Re-authenticate with the stored credentials.
    ///
    /// Returns false without a network call when no complete credential
    /// pair is stored. This is a full re-login, not an introspection
    /// call; a successful validation always carries a fresh token.
    pub async fn validate_stored_session(&self) -> bool {
        let (Some(username), Some(password)) = (self.store.username(), self.store.password())
        else {
            debug!("no stored credentials to validate");
            return false;
        };

        self.login(&username, &password).await
    }

    /// Drop the stored credentials and the in-memory token.
    /// No network call is made.
    pub fn logout(&self) {
        if let Err(error) = self.store.clear() {
            warn!(%error, "failed to clear stored credentials");
        }
        self.set_token(None);
    }

    /// The current in-memory token, source of truth for requests.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The persisted token, independent of the in-memory one.
    pub fn stored_token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn state(&self) -> AuthState {
        match self.token() {
            Some(token) => AuthState::Authenticated(token),
            None => AuthState::Unauthenticated,
        }
    }

    fn login_request(&self, username: &str, password: &str) -> Result<ApiRequest, ApiError> {
        let url = self.config.api_url(LOGIN_PATH)?;
        let encoded = BASE64.encode(format!("{username}:{password}"));
        Ok(ApiRequest::post(url).header("Authorization", format!("Basic {encoded}")))
    }

    fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }
}
