//! Transform client error types.

/// Specific transform client error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TransformErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// API returned a non-success HTTP status
    #[display("API returned HTTP {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error description
        message: String,
    },
    /// Request never reached the service
    #[display("Connection failed: {}", _0)]
    Connectivity(String),
    /// The service refused the request on safety/policy grounds
    #[display("Request blocked by content policy: {}", _0)]
    Blocked(String),
    /// The service returned no usable response content
    #[display("Model produced no response content")]
    EmptyResponse,
    /// The response settled without an image payload
    #[display("No generated image found in the response")]
    MissingImage,
    /// Response payload could not be decoded
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
}

/// Transform error with source location tracking.
///
/// # Examples
///
/// ```
/// use crafter_error::{TransformError, TransformErrorKind};
///
/// let err = TransformError::new(TransformErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transform Error: {} at line {} in {}", kind, line, file)]
pub struct TransformError {
    /// The kind of error that occurred
    pub kind: TransformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransformError {
    /// Create a new TransformError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
