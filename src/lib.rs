//! Authenticated API client for the Dragon Ball training API.
//!
//! This crate is the network and auth core behind the mobile UI: a
//! token-based login flow, durable credential storage, session
//! validation on launch, and typed collection fetches for heroes and
//! their transformations. Rendering, image loading, and navigation
//! live in the consuming application.
//!
//! # Wiring
//!
//! Build one [`AuthSession`] per process and hand it by handle to the
//! resource client:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dragonball_client::{
//!     ApiClient, AuthSession, Config, CredentialStore, HttpTransport, ResourceClient,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let client = ApiClient::new(Arc::new(HttpTransport::new()?));
//! let store = CredentialStore::new(config.storage_dir()?);
//! let session = Arc::new(AuthSession::new(client.clone(), store, config.clone()));
//!
//! if !session.validate_stored_session().await {
//!     session.login("user", "password").await;
//! }
//!
//! let resources = ResourceClient::new(client, session.clone(), config);
//! let heroes = resources.heroes().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{
    ApiClient, ApiError, ApiRequest, HttpTransport, MockTransport, ResourceClient, Transport,
    TransportError, TransportResponse,
};
pub use auth::{AuthSession, AuthState, CredentialStore};
pub use config::Config;
pub use models::{Hero, Transformation};
