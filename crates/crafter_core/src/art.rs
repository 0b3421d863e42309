//! Generated artwork produced by the transform client.

use crate::ImageData;
use serde::{Deserialize, Serialize};

/// The product of one successful generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArt {
    /// The generated image
    pub image: ImageData,
    /// Short theme name for the series this piece belongs to
    pub theme: String,
    /// One-sentence description of the design concept
    pub description: String,
}

impl GeneratedArt {
    /// Create a new piece of generated artwork.
    pub fn new(
        image: ImageData,
        theme: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            image,
            theme: theme.into(),
            description: description.into(),
        }
    }
}
