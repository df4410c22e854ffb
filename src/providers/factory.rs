use crate::config::{AppConfig, ProviderConfig};
use crate::error::SuggestError;
use crate::providers::{AnthropicProvider, LlmProvider, OpenAIProvider};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LlmProvider>, SuggestError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(SuggestError::RequestSetup(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            _ => Err(SuggestError::RequestSetup(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(config: &AppConfig) -> Result<Box<dyn LlmProvider>, SuggestError> {
        let provider_name = &config.default_provider;
        Self::create(
            provider_name,
            &config.provider(provider_name),
            Duration::from_secs(config.timeout),
        )
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "anthropic"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider_config() -> ProviderConfig {
        let mut config = ProviderConfig::with_model("test-model");
        config.api_key = Some("test-key".to_string());
        config
    }

    #[test]
    fn test_create_openai_provider() {
        let config = create_test_provider_config();
        let provider = ProviderFactory::create("openai", &config, Duration::from_secs(5)).unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_create_anthropic_provider() {
        let config = create_test_provider_config();
        let provider =
            ProviderFactory::create("anthropic", &config, Duration::from_secs(5)).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = create_test_provider_config();
        let result = ProviderFactory::create("unknown", &config, Duration::from_secs(5));
        match result {
            Err(e) => assert!(e.to_string().contains("Unknown provider")),
            Ok(_) => panic!("Expected unknown provider error"),
        }
    }

    #[test]
    fn test_create_disabled_provider() {
        let mut config = create_test_provider_config();
        config.enabled = false;

        let result = ProviderFactory::create("openai", &config, Duration::from_secs(5));
        match result {
            Err(e) => assert!(e.to_string().contains("not enabled in configuration")),
            Ok(_) => panic!("Expected disabled provider error"),
        }
    }

    #[test]
    fn test_get_default_provider() {
        let mut ai_config = AppConfig {
            default_provider: "anthropic".to_string(),
            ..Default::default()
        };
        ai_config
            .providers
            .insert("anthropic".to_string(), create_test_provider_config());

        let provider = ProviderFactory::get_default_provider(&ai_config).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }

    #[test]
    fn test_available_providers() {
        let providers = ProviderFactory::available_providers();
        assert_eq!(providers, vec!["openai", "anthropic"]);
    }
}
