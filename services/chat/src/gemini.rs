//! Client for the Gemini text-generation API
//!
//! The client never fails: every problem talking to the provider is folded
//! into the returned text, which callers store and show like any other reply.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::{env, error::Error as _};
use thiserror::Error;
use tracing::{info, warn};

/// Name used in the failure replies
pub const PROVIDER: &str = "Gemini";

const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-pro:generateContent";

/// Something that turns a prompt into reply text
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Single-turn completion. Failures are reported inside the text.
    async fn complete(&self, prompt: &str) -> String;
}

/// Gemini configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Full `generateContent` URL
    pub endpoint: String,
}

impl GeminiConfig {
    /// Create a new GeminiConfig from environment variables
    ///
    /// # Environment Variables
    /// - `GEMINI_API_KEY`: API key (required)
    /// - `GEMINI_ENDPOINT`: generateContent URL (default: gemini-2.0-pro on v1beta)
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable not set"))?;

        let endpoint = env::var("GEMINI_ENDPOINT")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(GeminiConfig { api_key, endpoint })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Reasons a call could not produce a usable response body
#[derive(Error, Debug)]
enum CallError {
    #[error("{}", source_chain(.0))]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("first candidate has no text: {0}")]
    MissingText(Value),
}

/// Render an error followed by each of its causes, separated by ": "
fn source_chain(error: &reqwest::Error) -> String {
    let mut rendered = error.to_string();
    let mut cause = error.source();
    while let Some(inner) = cause {
        rendered.push_str(": ");
        rendered.push_str(&inner.to_string());
        cause = inner.source();
    }
    rendered
}

/// Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client. No request timeout is set.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn call(&self, prompt: &str) -> Result<String, CallError> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let body = self
            .http
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;

        let out: Value = serde_json::from_str(&body)?;
        reply_from_response(out)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> String {
        info!("Requesting completion from {}", PROVIDER);

        match self.call(prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("{} call failed: {}", PROVIDER, e);
                format!("Gagal panggil {}: {}", PROVIDER, e)
            }
        }
    }
}

/// Map a decoded response body onto reply text
fn reply_from_response(out: Value) -> Result<String, CallError> {
    let has_candidates = out
        .get("candidates")
        .and_then(Value::as_array)
        .is_some_and(|candidates| !candidates.is_empty());

    if has_candidates {
        return match out
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
        {
            Some(text) => Ok(text.to_string()),
            None => Err(CallError::MissingText(out["candidates"][0].clone())),
        };
    }

    if let Some(error) = out.get("error") {
        let detail = match error.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(message) => message.to_string(),
            None => error.to_string(),
        };
        warn!("{} returned an error: {}", PROVIDER, detail);
        return Ok(format!("Error {}: {}", PROVIDER, detail));
    }

    warn!("{} returned an unrecognized response", PROVIDER);
    Ok(format!("Error {}: unknown response {}", PROVIDER, out))
}
