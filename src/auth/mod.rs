//! Authentication module for the login flow and credential persistence.
//!
//! This module provides:
//! - `AuthSession`: login, stored-session validation, and logout
//! - `CredentialStore`: durable storage for username, password, and token
//!
//! Stored sessions are validated by a full re-login with the saved
//! pair; the server issues a fresh token each time.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{AuthSession, AuthState};
