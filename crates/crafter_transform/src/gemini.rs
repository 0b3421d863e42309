//! Gemini REST implementation of the transform boundary.
//!
//! Speaks to the `generateContent` endpoint of the generative language API:
//! one inline-data image part plus one text part in, one inline-data image
//! part plus a short labelled text block out.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::OnceLock;
use tracing::{debug, error, instrument};

use crate::{AvatarTransformer, prompt::build_prompt};
use crafter_core::{GeneratedArt, GenerationParams, ImageData};
use crafter_error::{CrafterResult, TransformError, TransformErrorKind};

/// Default base endpoint for the generative language API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model used for avatar generation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Finish reasons that indicate safety/policy filtering.
const BLOCKED_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "IMAGE_SAFETY"];

/// Theme/description fallbacks when the model skips the labelled lines.
const FALLBACK_THEME: &str = "Custom style series";
const FALLBACK_DESCRIPTION: &str =
    "The character has been artistically reimagined with a distinctive aesthetic.";

//
// ─── WIRE TYPES ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

//
// ─── CLIENT ─────────────────────────────────────────────────────────────────────
//

/// Transform client for the Gemini image generation API.
///
/// # Examples
///
/// ```no_run
/// use crafter_transform::GeminiTransformer;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let transformer = GeminiTransformer::new()?
///     .with_model("gemini-2.5-flash-image");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeminiTransformer {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiTransformer {
    /// Create a new transformer with the default model and endpoint.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    pub fn new() -> CrafterResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| TransformError::new(TransformErrorKind::MissingApiKey))?;
        debug!("Creating new Gemini transformer");
        Ok(Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Override the model used for generation requests.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base endpoint. Useful for proxies and tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(
        image: &ImageData,
        params: &GenerationParams,
        index: usize,
        total: usize,
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: Some(image.mime.clone()),
                            data: image.data.clone(),
                        }),
                    },
                    Part {
                        text: Some(build_prompt(params, index, total)),
                        inline_data: None,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                image_config: ImageConfig { aspect_ratio: "1:1" },
            },
        }
    }

    /// Convert a settled API response into generated artwork.
    fn parse_response(
        response: GenerateContentResponse,
        params: &GenerationParams,
    ) -> Result<GeneratedArt, TransformError> {
        if let Some(feedback) = &response.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(TransformError::new(TransformErrorKind::Blocked(
                    reason.clone(),
                )));
            }
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| TransformError::new(TransformErrorKind::EmptyResponse))?;

        if let Some(reason) = &candidate.finish_reason {
            if BLOCKED_FINISH_REASONS.contains(&reason.as_str()) {
                return Err(TransformError::new(TransformErrorKind::Blocked(
                    reason.clone(),
                )));
            }
        }

        let content = candidate
            .content
            .ok_or_else(|| TransformError::new(TransformErrorKind::EmptyResponse))?;

        let mut image = None;
        let mut text = String::new();
        for part in content.parts {
            if let Some(inline) = part.inline_data {
                if image.is_none() {
                    let mime = inline.mime_type.unwrap_or_else(|| "image/png".to_string());
                    image = Some(ImageData::new(mime, inline.data));
                }
            } else if let Some(chunk) = part.text {
                text.push_str(&chunk);
                text.push('\n');
            }
        }

        // A resolved response without an image payload is a failure, not a
        // degraded success.
        let image = image.ok_or_else(|| TransformError::new(TransformErrorKind::MissingImage))?;

        let (theme, description) = extract_labelled_lines(&text);
        let theme = theme
            .or_else(|| params.theme_text().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_THEME.to_string());
        let description = description.unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

        Ok(GeneratedArt::new(image, theme, description))
    }
}

/// Extract the `Theme:` and `Description:` lines from the response text.
fn extract_labelled_lines(text: &str) -> (Option<String>, Option<String>) {
    static THEME: OnceLock<Regex> = OnceLock::new();
    static DESCRIPTION: OnceLock<Regex> = OnceLock::new();
    let theme_re = THEME.get_or_init(|| {
        Regex::new(r"(?im)^\s*(?:theme(?:\s+name)?)\s*[:：]\s*(.+)$").expect("Valid theme regex")
    });
    let description_re = DESCRIPTION.get_or_init(|| {
        Regex::new(r"(?im)^\s*description\s*[:：]\s*(.+)$").expect("Valid description regex")
    });

    let capture = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    (capture(theme_re), capture(description_re))
}

#[async_trait]
impl AvatarTransformer for GeminiTransformer {
    #[instrument(skip(self, image, params), fields(model = %self.model))]
    async fn transform(
        &self,
        image: &ImageData,
        params: &GenerationParams,
        index: usize,
        total: usize,
    ) -> CrafterResult<GeneratedArt> {
        let request = Self::build_request(image, params, index, total);

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Request never reached the generation service");
                TransformError::new(TransformErrorKind::Connectivity(e.to_string()))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "Generation service returned an error");
            return Err(TransformError::new(TransformErrorKind::Api {
                status,
                message: body,
            })
            .into());
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to decode generation response");
            TransformError::new(TransformErrorKind::Decode(e.to_string()))
        })?;

        debug!("Received generation response");
        Self::parse_response(parsed, params).map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GenerationParams {
        GenerationParams::builder().build().unwrap()
    }

    fn image_part(data: &str) -> Part {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: Some("image/png".to_string()),
                data: data.to_string(),
            }),
        }
    }

    fn text_part(text: &str) -> Part {
        Part {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn response_with(parts: Vec<Part>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content { parts }),
                finish_reason: None,
            }],
            prompt_feedback: None,
        }
    }

    #[test]
    fn parses_image_and_labelled_lines() {
        let response = response_with(vec![
            image_part("QUJD"),
            text_part("Theme: Neon Menagerie\nDescription: Electric beasts in candy chrome."),
        ]);
        let art = GeminiTransformer::parse_response(response, &params()).unwrap();
        assert_eq!(art.image.data, "QUJD");
        assert_eq!(art.theme, "Neon Menagerie");
        assert_eq!(art.description, "Electric beasts in candy chrome.");
    }

    #[test]
    fn falls_back_when_labelled_lines_are_missing() {
        let response = response_with(vec![image_part("QUJD"), text_part("no labels here")]);
        let custom = GenerationParams::builder()
            .theme(Some("dragons".to_string()))
            .build()
            .unwrap();
        let art = GeminiTransformer::parse_response(response, &custom).unwrap();
        assert_eq!(art.theme, "dragons");
        assert_eq!(art.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn missing_image_payload_is_an_error() {
        let response = response_with(vec![text_part("Theme: X\nDescription: Y")]);
        let err = GeminiTransformer::parse_response(response, &params()).unwrap_err();
        assert_matches::assert_matches!(err.kind, TransformErrorKind::MissingImage);
    }

    #[test]
    fn empty_candidates_are_an_error() {
        let response = GenerateContentResponse {
            candidates: vec![],
            prompt_feedback: None,
        };
        let err = GeminiTransformer::parse_response(response, &params()).unwrap_err();
        assert_matches::assert_matches!(err.kind, TransformErrorKind::EmptyResponse);
    }

    #[test]
    fn safety_finish_reason_is_blocked() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content { parts: vec![] }),
                finish_reason: Some("SAFETY".to_string()),
            }],
            prompt_feedback: None,
        };
        let err = GeminiTransformer::parse_response(response, &params()).unwrap_err();
        assert_matches::assert_matches!(err.kind, TransformErrorKind::Blocked(reason) if reason == "SAFETY");
    }

    #[test]
    fn prompt_block_reason_is_blocked() {
        let response = GenerateContentResponse {
            candidates: vec![],
            prompt_feedback: Some(PromptFeedback {
                block_reason: Some("PROHIBITED_CONTENT".to_string()),
            }),
        };
        let err = GeminiTransformer::parse_response(response, &params()).unwrap_err();
        assert_eq!(
            err.kind,
            TransformErrorKind::Blocked("PROHIBITED_CONTENT".to_string())
        );
    }

    #[test]
    fn deserializes_camel_case_wire_format() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"inlineData": {"mimeType": "image/png", "data": "QUJD"}},
                        {"text": "Theme: Wire\nDescription: Round trip."}
                    ]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let art = GeminiTransformer::parse_response(response, &params()).unwrap();
        assert_eq!(art.theme, "Wire");
    }

    #[test]
    fn labelled_line_extraction_accepts_theme_name_label() {
        let (theme, description) =
            extract_labelled_lines("Theme Name: Gilded Age\nDescription: Brass and velvet.");
        assert_eq!(theme.as_deref(), Some("Gilded Age"));
        assert_eq!(description.as_deref(), Some("Brass and velvet."));
    }
}
