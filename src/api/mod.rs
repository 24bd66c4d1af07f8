//! REST API client module for the Dragon Ball training API.
//!
//! This module provides the transport seam, the `ApiClient` that maps
//! raw outcomes to typed results, and the `ResourceClient` for the
//! authenticated collection endpoints.
//!
//! The API uses bearer token authentication; the login endpoint serves
//! the token as a plain-text body.

pub mod client;
pub mod error;
pub mod resources;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use resources::ResourceClient;
pub use transport::{
    ApiRequest, HttpTransport, MockTransport, Transport, TransportError, TransportResponse,
};
