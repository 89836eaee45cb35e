//! Content sources: where generated content comes from.

use crate::config::ApiConfig;
use async_trait::async_trait;
use edupress::generation::{Prompt, RESPONSE_MIME_TYPE};
use edupress::{PressError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Produces the raw reply text for a prompt.
///
/// Every failure is reported as [`PressError::GenerationFailed`]; the cause
/// is logged by the source.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: ContentBody<'a>,
    contents: Vec<ContentBody<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct ContentBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

fn request_body(prompt: &Prompt) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        system_instruction: ContentBody {
            role: None,
            parts: vec![TextPart {
                text: &prompt.system_instruction,
            }],
        },
        contents: vec![ContentBody {
            role: Some("user"),
            parts: vec![TextPart {
                text: &prompt.user_prompt,
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: RESPONSE_MIME_TYPE,
        },
    }
}

/// Client for the Generative Language `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("edupress/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| {
                warn!(error = %e, "could not build HTTP client");
                PressError::GenerationFailed
            })?;

        Ok(Self {
            http,
            base_url: config.generation_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ContentSource for GeminiClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            warn!("no API key configured for the content service");
            return Err(PressError::GenerationFailed);
        };

        debug!(model = %self.model, "requesting content");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "content service unreachable");
                PressError::GenerationFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "content service returned an error status");
            return Err(PressError::GenerationFailed);
        }

        let reply: GenerateContentResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "content service reply was not readable");
            PressError::GenerationFailed
        })?;

        reply.text().ok_or_else(|| {
            warn!("content service reply carried no text");
            PressError::GenerationFailed
        })
    }
}

/// Replies with a fixed text, or fails when it has none. For tests and offline use.
pub struct FixedReply {
    reply: Option<String>,
}

impl FixedReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl ContentSource for FixedReply {
    async fn generate(&self, _prompt: &Prompt) -> Result<String> {
        self.reply.clone().ok_or(PressError::GenerationFailed)
    }
}
