//! User-facing failure taxonomy.
//!
//! Generation failures arrive as provider-specific errors. The presentation
//! layer only needs a coarse category to pick a message, so this module maps
//! any [`CrafterError`] into one of a small set of [`FailureKind`] values.
//! Classification is best-effort and infallible: anything unrecognized lands
//! in [`FailureKind::UnclassifiedFailure`].

use crate::{CrafterError, CrafterErrorKind, TransformError, TransformErrorKind};

/// Coarse category of a generation failure, used to select a user-facing
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FailureKind {
    /// The service reported rate or quota limits
    #[display("quota exceeded")]
    QuotaExceeded,
    /// The service reported server-side overload or unavailability
    #[display("service unavailable")]
    ServiceUnavailable,
    /// The service refused the request on safety/policy grounds
    #[display("content policy blocked")]
    ContentPolicyBlocked,
    /// The request never reached the service
    #[display("connectivity failure")]
    ConnectivityFailure,
    /// Any other failure, including a response missing the image payload
    #[display("unclassified failure")]
    UnclassifiedFailure,
}

impl FailureKind {
    /// Message suitable for direct display to the user.
    ///
    /// # Examples
    ///
    /// ```
    /// use crafter_error::FailureKind;
    ///
    /// let msg = FailureKind::QuotaExceeded.user_message();
    /// assert!(msg.contains("quota"));
    /// ```
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::QuotaExceeded => {
                "Insufficient credits or quota exhausted. Check your plan and billing, then try again."
            }
            FailureKind::ServiceUnavailable => {
                "The generation service is overloaded or unavailable. Try again in a moment."
            }
            FailureKind::ContentPolicyBlocked => {
                "The request was blocked by the service's content policy. Adjust the source image or parameters."
            }
            FailureKind::ConnectivityFailure => {
                "Could not reach the generation service. Check your network connection."
            }
            FailureKind::UnclassifiedFailure => {
                "An error occurred during generation. Retry this item to attempt it again."
            }
        }
    }
}

impl From<&TransformError> for FailureKind {
    fn from(err: &TransformError) -> Self {
        match &err.kind {
            TransformErrorKind::Api { status, message } => classify_api(*status, message),
            TransformErrorKind::Blocked(_) => FailureKind::ContentPolicyBlocked,
            TransformErrorKind::Connectivity(_) => FailureKind::ConnectivityFailure,
            _ => FailureKind::UnclassifiedFailure,
        }
    }
}

impl From<&CrafterError> for FailureKind {
    fn from(err: &CrafterError) -> Self {
        match err.kind() {
            CrafterErrorKind::Transform(t) => FailureKind::from(t),
            _ => FailureKind::UnclassifiedFailure,
        }
    }
}

/// Map an HTTP failure onto the taxonomy, falling back to message wording
/// when the status alone is ambiguous.
fn classify_api(status: u16, message: &str) -> FailureKind {
    match status {
        429 => FailureKind::QuotaExceeded,
        500 | 502 | 503 | 504 => FailureKind::ServiceUnavailable,
        _ => classify_text(message),
    }
}

/// Best-effort classification from failure wording alone.
fn classify_text(message: &str) -> FailureKind {
    let text = message.to_ascii_lowercase();
    if text.contains("quota") || text.contains("rate limit") || text.contains("resource_exhausted")
    {
        FailureKind::QuotaExceeded
    } else if text.contains("overload") || text.contains("unavailable") {
        FailureKind::ServiceUnavailable
    } else if text.contains("safety") || text.contains("blocked") || text.contains("prohibited") {
        FailureKind::ContentPolicyBlocked
    } else {
        FailureKind::UnclassifiedFailure
    }
}
