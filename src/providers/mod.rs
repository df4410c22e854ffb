mod anthropic;
mod factory;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{
    build_gift_prompt, truncate_chat, DEFAULT_MAX_CHAT_CHARS, GIFT_PROMPT_TEMPLATE,
    GIFT_SYSTEM_PROMPT,
};

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::error::SuggestError;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send a system+user message pair and return the completion text
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, SuggestError>;
}

/// Map a provider response onto its JSON body, classifying failures by status.
pub(crate) async fn read_json_response(response: Response) -> Result<Value, SuggestError> {
    let status = response.status();
    if status.is_success() {
        let body: Value = response.json().await?;
        debug!("{:?}", body);
        return Ok(body);
    }

    let body = response.text().await.unwrap_or_default();
    error!("Error response from provider ({}): {}", status, body);

    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(SuggestError::RateLimited),
        StatusCode::UNAUTHORIZED => Err(SuggestError::Unauthorized),
        _ => Err(SuggestError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        }),
    }
}

/// Pull `error.message` out of an error body when the provider sends one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(String::from))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| "Something went wrong.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_body() {
        let body = r#"{"error": {"message": "model not found", "type": "invalid_request_error"}}"#;
        assert_eq!(error_message(body), "model not found");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message(""), "Something went wrong.");
        assert_eq!(error_message(r#"{"error": "flat"}"#), "Something went wrong.");
        assert_eq!(
            error_message(r#"{"error": {"message": ""}}"#),
            "Something went wrong."
        );
    }
}
