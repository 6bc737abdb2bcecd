//! Chat-completion backed candidate source.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CandidateSource, build_prompt};
use crate::config::Config;
use crate::error::SourceError;
use crate::model::types::SearchCriteria;

/// Upper bound on names taken from one completion, whatever count was asked for.
pub const MAX_COMPLETION_RESULTS: usize = 20;

const SYSTEM_PREAMBLE: &str = "You are a helpful assistant that finds real companies based on criteria. Return only company names, one per line.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct PrimaryAiClient {
    http: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl PrimaryAiClient {
    pub fn new(api_key: &str, cfg: &Config) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(cfg.request_timeout())
            .user_agent(concat!("company-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CandidateSource for PrimaryAiClient {
    fn name(&self) -> &'static str {
        "ai"
    }

    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<String>, SourceError> {
        let prompt = build_prompt(criteria);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PREAMBLE,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, count = criteria.count(), "requesting completion");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "completion endpoint rejected request");
            return Err(SourceError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let content = completion_content(&body)?;
        let names = parse_completion(&content);
        debug!(returned = names.len(), "parsed completion");
        Ok(names)
    }
}

/// Pull `choices[0].message.content` out of a chat-completion body.
fn completion_content(body: &str) -> Result<String, SourceError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Format(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| SourceError::Format("response has no message content".to_string()))
}

/// Split completion text into candidate names.
///
/// Lines are trimmed; blank lines and lines starting with a bullet (`-` or
/// `•`) are dropped; at most [`MAX_COMPLETION_RESULTS`] names are returned.
/// The cap does not depend on the requested count.
pub fn parse_completion(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('-') && !line.starts_with('•'))
        .take(MAX_COMPLETION_RESULTS)
        .map(str::to_string)
        .collect()
}
