use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use std::time::Duration;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const GENERATE_CONTENT_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Text-in, text-out seam over the generative-language service. The reply is
/// untrusted: callers strip markdown fencing and parse it themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Gemini `generateContent` client.
pub struct GeminiModel {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
}

impl GeminiModel {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        })
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/{}:generateContent", GENERATE_CONTENT_URL, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ModelError(format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::ModelError(format!("bad status: {}", e)))?;

        let reply: Value = response
            .json()
            .await
            .map_err(|e| AppError::ModelError(format!("unreadable reply: {}", e)))?;

        reply
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::ModelError("reply contained no text part".to_string()))
    }
}

static CODE_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("CODE_FENCE_RE is a valid pattern")
});

/// Strips a markdown code-fence wrapper from a model reply, if present.
pub fn strip_code_fences(raw: &str) -> &str {
    match CODE_FENCE_RE.captures(raw) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => raw.trim(),
    }
}
