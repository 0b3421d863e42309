//! Image transform client boundary.
//!
//! This crate defines the [`AvatarTransformer`] trait the batch orchestrator
//! consumes, plus the [`GeminiTransformer`] implementation that speaks to the
//! Gemini `generateContent` REST endpoint. The orchestrator only sees the
//! trait; tests substitute deterministic fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod prompt;

pub use gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiTransformer};
pub use prompt::build_prompt;

use async_trait::async_trait;
use crafter_core::{GeneratedArt, GenerationParams, ImageData};
use crafter_error::CrafterResult;

/// Boundary trait for the external generative-image service.
///
/// Implementations must return `Err` on any failure rather than a sentinel
/// value. `index` and `total` describe the piece's position within its batch
/// so an implementation may request series-diverse output; callers pass them
/// through without interpretation.
#[async_trait]
pub trait AvatarTransformer: Send + Sync {
    /// Transform a source image into one generated avatar.
    async fn transform(
        &self,
        image: &ImageData,
        params: &GenerationParams,
        index: usize,
        total: usize,
    ) -> CrafterResult<GeneratedArt>;

    /// Provider name (e.g. "gemini").
    fn provider_name(&self) -> &'static str;
}
