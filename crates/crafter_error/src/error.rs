//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, HistoryError, TransformError};

/// This is the foundation error enum aggregating the per-concern error types.
///
/// # Examples
///
/// ```
/// use crafter_error::{CrafterError, ConfigError};
///
/// let config_err = ConfigError::new("Missing field");
/// let err: CrafterError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CrafterErrorKind {
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// History store error
    #[from(HistoryError)]
    History(HistoryError),
    /// Transform client error
    #[from(TransformError)]
    Transform(TransformError),
}

/// Crafter error with kind discrimination.
///
/// # Examples
///
/// ```
/// use crafter_error::{CrafterResult, ConfigError};
///
/// fn might_fail() -> CrafterResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Crafter Error: {}", _0)]
pub struct CrafterError(Box<CrafterErrorKind>);

impl CrafterError {
    /// Create a new error from a kind.
    pub fn new(kind: CrafterErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CrafterErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CrafterErrorKind
impl<T> From<T> for CrafterError
where
    T: Into<CrafterErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Crafter operations.
///
/// # Examples
///
/// ```
/// use crafter_error::{CrafterResult, TransformError, TransformErrorKind};
///
/// fn generate() -> CrafterResult<String> {
///     Err(TransformError::new(TransformErrorKind::EmptyResponse))?
/// }
/// ```
pub type CrafterResult<T> = std::result::Result<T, CrafterError>;
