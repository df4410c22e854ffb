use crate::config::ProviderConfig;
use crate::error::SuggestError;
use crate::providers::{read_json_response, LlmProvider};
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, SuggestError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                SuggestError::RequestSetup(
                    "OPENAI_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SuggestError::RequestSetup(e.to_string()))?;

        Ok(OpenAIProvider {
            client,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: None,
            max_tokens: None,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, SuggestError> {
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ]
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        info!("Requesting suggestions from openai ({})", self.model);
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let response_body = read_json_response(response).await?;
        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                SuggestError::MalformedResponse(
                    "Failed to extract content from response".to_string(),
                )
            })?
            .to_string();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn provider(server: &Server) -> OpenAIProvider {
        OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4".to_string(),
        )
    }

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": {
                            "content": "Product Name: Mug\nDescription: Warm\nURL: https://x.test"
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let result = provider(&server).complete("sys", "hello").await.unwrap();
        assert!(result.starts_with("Product Name: Mug"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
            .create_async()
            .await;

        let result = provider(&server).complete("sys", "hello").await;
        assert!(matches!(result, Err(SuggestError::RateLimited)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let result = provider(&server).complete("sys", "hello").await;
        assert!(matches!(result, Err(SuggestError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_api_error_carries_server_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "The model `gpt-9` does not exist"}}"#)
            .create_async()
            .await;

        match provider(&server).complete("sys", "hello").await {
            Err(SuggestError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "The model `gpt-9` does not exist");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let result = provider(&server).complete("sys", "hello").await;
        assert!(matches!(result, Err(SuggestError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_no_response() {
        // Nothing listens on port 9 (discard) locally
        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            "http://127.0.0.1:9".to_string(),
            "gpt-4".to_string(),
        );
        let result = provider.complete("sys", "hello").await;
        assert!(matches!(result, Err(SuggestError::NoResponse(_))));
    }

    #[test]
    fn test_missing_api_key_is_setup_error() {
        if std::env::var("OPENAI_API_KEY").is_ok() {
            return;
        }
        let config = ProviderConfig::with_model("gpt-4");
        let result = OpenAIProvider::new(&config, Duration::from_secs(5));
        assert!(matches!(result, Err(SuggestError::RequestSetup(_))));
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            DEFAULT_BASE_URL.to_string(),
            "gpt-4".to_string(),
        );
        assert_eq!(provider.provider_name(), "openai");
    }
}
