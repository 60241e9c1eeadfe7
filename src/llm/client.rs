//! LLM client for brochure field extraction.
//!
//! Supports the Ollama API for local inference. The model is asked for a
//! single JSON object of specification fields; whatever comes back is
//! parsed leniently into a loose field bag — the merge policy, not the
//! model, decides what to trust.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::RawFields;

/// Default prompt for extracting specification fields from document text.
pub const DEFAULT_EXTRACT_PROMPT: &str = r#"You are reading a forklift sales document (brochure, spec sheet, or quote). Extract the equipment specification as JSON.

Return a single JSON object with any of these keys you can find, omitting keys the document does not state:
brand, model_name, tier, load_capacity_kg, lift_height_cm, power_type, operating_weight_kg, turn_radius_cm, travel_speed_kmh, price_range_min, price_range_max, warranty_months, availability, overall_score

Values may keep their unit suffixes (e.g. "2500kg", "12 months"). Do not guess values that are not in the document.

Document:
{content}

Respond with ONLY the JSON object. No formatting or preamble."#;

/// Configuration for the extraction client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Whether extraction is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Ollama API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model used for extraction.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in the response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0).
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Custom prompt (uses the {content} placeholder).
    #[serde(default)]
    pub extract_prompt: Option<String>,
    /// Maximum characters of document text sent to the model.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

fn default_enabled() -> bool {
    true
}
fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}
fn default_model() -> String {
    "llama3.2:instruct".to_string()
}
fn default_max_tokens() -> u32 {
    512
}
fn default_temperature() -> f32 {
    0.1
}
fn default_max_content_chars() -> usize {
    12000
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            extract_prompt: None,
            max_content_chars: default_max_content_chars(),
        }
    }
}

impl ExtractorConfig {
    /// Get the extraction prompt, custom or default.
    pub fn prompt(&self) -> &str {
        self.extract_prompt.as_deref().unwrap_or(DEFAULT_EXTRACT_PROMPT)
    }
}

/// Errors from the extraction collaborator. Always surfaced to the
/// caller; never allowed to corrupt the catalog.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("extraction is disabled")]
    Disabled,
}

/// A backend that can extract specification fields from document text.
#[async_trait]
pub trait SpecExtractor: Send + Sync {
    /// Whether the backend is ready to run.
    async fn is_available(&self) -> bool;

    /// Extract a loose field bag from document text.
    async fn extract(&self, text: &str) -> Result<RawFields, ExtractionError>;
}

/// Ollama-backed extractor.
pub struct LlmExtractor {
    config: ExtractorConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

impl LlmExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| ExtractionError::Connection(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Truncate document text to the configured maximum (UTF-8 safe).
    fn truncate_content<'a>(&self, text: &'a str) -> &'a str {
        if text.len() <= self.config.max_content_chars {
            return text;
        }
        let mut end = self.config.max_content_chars;
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }

    async fn call_ollama(&self, prompt: &str) -> Result<String, ExtractionError> {
        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let url = format!("{}/api/generate", self.config.endpoint);
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractionError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ExtractionError::Api(format!("HTTP {}: {}", status, body)));
        }

        let ollama_resp: OllamaResponse = resp
            .json()
            .await
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        Ok(ollama_resp.response)
    }
}

#[async_trait]
impl SpecExtractor for LlmExtractor {
    async fn is_available(&self) -> bool {
        if !self.config.enabled {
            return false;
        }
        let url = format!("{}/api/tags", self.config.endpoint);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn extract(&self, text: &str) -> Result<RawFields, ExtractionError> {
        if !self.config.enabled {
            return Err(ExtractionError::Disabled);
        }

        let prompt = self
            .config
            .prompt()
            .replace("{content}", self.truncate_content(text));

        debug!(model = %self.config.model, "requesting field extraction");
        let response = self.call_ollama(&prompt).await?;
        parse_raw_fields(&response)
    }
}

/// Parse the model's reply into a field bag.
///
/// The reply is scanned for its first JSON object; markdown fences and
/// preambles are tolerated. Unknown keys and unusable value shapes are
/// dropped by the bag itself.
pub fn parse_raw_fields(response: &str) -> Result<RawFields, ExtractionError> {
    let start = response
        .find('{')
        .ok_or_else(|| ExtractionError::Parse("no JSON object in response".to_string()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| ExtractionError::Parse("unterminated JSON object".to_string()))?;
    if end < start {
        return Err(ExtractionError::Parse("unterminated JSON object".to_string()));
    }

    let value: serde_json::Value = serde_json::from_str(&response[start..=end])
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;
    Ok(RawFields::from_value(&value))
}
