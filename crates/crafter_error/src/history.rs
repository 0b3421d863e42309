//! History store error types.

/// Kinds of history store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HistoryErrorKind {
    /// Failed to create the history directory
    #[display("Failed to create history directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a history record
    #[display("Failed to write history record: {}", _0)]
    FileWrite(String),
    /// Failed to read a history record
    #[display("Failed to read history record: {}", _0)]
    FileRead(String),
    /// Failed to serialize a history record
    #[display("Failed to serialize history record: {}", _0)]
    Serialize(String),
}

/// History error with location tracking.
///
/// # Examples
///
/// ```
/// use crafter_error::{HistoryError, HistoryErrorKind};
///
/// let err = HistoryError::new(HistoryErrorKind::FileWrite("disk full".to_string()));
/// assert!(format!("{}", err).contains("disk full"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("History Error: {} at line {} in {}", kind, line, file)]
pub struct HistoryError {
    /// The kind of error that occurred
    pub kind: HistoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl HistoryError {
    /// Create a new history error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: HistoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
