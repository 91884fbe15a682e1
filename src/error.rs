//! Error type for the network call and host-page binding.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failures the widget can hit outside of reply decoding.
///
/// Reply decoding itself never fails; malformed bodies degrade to text.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The request could not be sent or the connection failed.
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    /// The response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
    /// The request payload could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),
    /// Not running in a browser (native build or SSR).
    #[error("not available outside the browser")]
    Unavailable,
    /// A required host-page element is missing.
    #[error("host page has no element with id `{0}`")]
    MissingElement(String),
    /// A DOM call failed while binding to the host page.
    #[error("dom operation failed: {0}")]
    Dom(String),
}
