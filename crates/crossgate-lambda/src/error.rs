//! Adapter error types.
//!
//! Both failures occur while building the standard request, before the
//! handler runs. Once the handler has started, the adapter raises no errors
//! of its own: handler panics are the embedding application's concern, and
//! finalization always succeeds.

use thiserror::Error;

/// Result alias for adapter operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that abort an invocation before the handler runs. No proxy
/// response is produced for any of these.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The event path is not a structurally valid URL reference.
    #[error("cannot parse request path {path:?}")]
    InvalidPath {
        path: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    /// The event claimed a base64 body that does not decode.
    #[error("cannot decode base64 request body")]
    InvalidBody(#[from] base64::DecodeError),

    /// The event method is not a valid HTTP method token.
    #[error("invalid HTTP method {method:?}")]
    InvalidMethod { method: String },
}
