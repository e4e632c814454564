//! HTTP client for the hosted chat-completions API that backs every tool.

use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use stackly_core::TokenUsage;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TEXT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

#[derive(Clone, Debug)]
pub struct InferenceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub vision_model: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
        }
    }
}

impl InferenceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("STACKLY_API_KEY")
                .ok()
                .filter(|value| !value.is_empty()),
            base_url: std::env::var("STACKLY_API_BASE_URL")
                .ok()
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.base_url),
            text_model: std::env::var("STACKLY_TEXT_MODEL")
                .ok()
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.text_model),
            vision_model: std::env::var("STACKLY_VISION_MODEL")
                .ok()
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.vision_model),
        }
    }
}

/// One completion: the generated text plus the upstream token accounting,
/// when the upstream reported it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

pub struct InferenceClient {
    config: InferenceConfig,
    http: reqwest::Client,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        // No request timeout: a hang upstream stalls the request rather
        // than surfacing a partial failure.
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| AppError::Upstream(format!("failed to create HTTP client: {}", err)))?;
        Ok(Self { config, http })
    }

    /// Run one chat completion. The vision model is selected whenever an
    /// image url accompanies the prompt.
    pub async fn complete(&self, prompt: &str, image_url: Option<&str>) -> Result<Completion> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Upstream("inference API key is not configured".to_string()))?;

        let model = if image_url.is_some() {
            &self.config.vision_model
        } else {
            &self.config.text_model
        };
        let content = match image_url {
            Some(url) => json!([
                { "type": "text", "text": prompt },
                { "type": "image_url", "image_url": { "url": url } }
            ]),
            None => json!(prompt),
        };
        let body = json!({
            "model": model,
            "messages": [{ "role": "user", "content": content }],
            "temperature": 0.7,
            "max_tokens": 1024,
        });

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::Upstream(format!("inference request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(AppError::Upstream(format!(
                "inference API error ({}): {}",
                status, detail
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|err| {
            AppError::Upstream(format!("failed to parse inference response: {}", err))
        })?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        let usage = parsed.usage.map(|usage| TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        });
        Ok(Completion { text, usage })
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}
