//! Encoded still-image data.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Encoded still-image data: a MIME type plus a base64 payload.
///
/// This is the interchange form used across the workspace: the transform
/// client sends and receives it inline, the history store persists it, and
/// presentation layers can round-trip it through data URLs.
///
/// # Examples
///
/// ```
/// use crafter_core::ImageData;
///
/// let image = ImageData::from_bytes("image/png", &[0x89, 0x50, 0x4E, 0x47]);
/// let url = image.to_data_url();
/// assert!(url.starts_with("data:image/png;base64,"));
/// assert_eq!(ImageData::from_data_url(&url), Some(image));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageData {
    /// MIME type of the image (e.g. "image/png")
    pub mime: String,
    /// Base64-encoded image bytes
    pub data: String,
}

impl ImageData {
    /// Create from an already base64-encoded payload.
    pub fn new(mime: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            data: data.into(),
        }
    }

    /// Create by base64-encoding raw image bytes.
    pub fn from_bytes(mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime: mime.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    ///
    /// Returns `None` when the input is not a base64 data URL.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(";base64,")?;
        if mime.is_empty() {
            return None;
        }
        Some(Self::new(mime, payload))
    }

    /// Render as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data)
    }

    /// Decode the base64 payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}
