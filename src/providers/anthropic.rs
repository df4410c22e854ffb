use crate::config::ProviderConfig;
use crate::error::SuggestError;
use crate::providers::{read_json_response, LlmProvider};
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, SuggestError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                SuggestError::RequestSetup(
                    "ANTHROPIC_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SuggestError::RequestSetup(e.to_string()))?;

        Ok(AnthropicProvider {
            client,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config.model.clone(),
            temperature: config.temperature,
            // The messages API requires an explicit limit
            max_tokens: config.max_tokens.unwrap_or(4000),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: None,
            max_tokens: 4000,
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, SuggestError> {
        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": system_prompt,
            "messages": [
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        info!("Requesting suggestions from anthropic ({})", self.model);
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let response_body = read_json_response(response).await?;

        let content = response_body["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                SuggestError::MalformedResponse(
                    "Failed to extract content from Anthropic response".to_string(),
                )
            })?
            .to_string();

        Ok(content)
    }
}
