use thiserror::Error;

/// Error taxonomy for API calls.
///
/// Every request resolves to a typed value or exactly one of these
/// kinds, and no kind is ever retried internally. User-facing
/// messaging and any retry policy belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The endpoint URL could not be constructed.
    #[error("malformed request URL")]
    MalformedUrl,

    /// The response carried no body.
    #[error("empty response body")]
    NoData,

    /// The server replied with a status other than 200.
    /// The code is absent when the transport produced no status at all.
    #[error("unexpected status code: {0:?}")]
    StatusCode(Option<u16>),

    /// The response body did not match the expected shape.
    #[error("failed to decode response body")]
    DecodingFailed,

    /// Transport-level failure, missing token, or malformed request body.
    #[error("unknown error")]
    Unknown,
}
