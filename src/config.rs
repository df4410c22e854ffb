use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

use crate::model::{DEFAULT_IMAGE_LOOKUP_TEMPLATE, DEFAULT_SHARE_BASE_URL};
use crate::providers::DEFAULT_MAX_CHAT_CHARS;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider to use when none is requested explicitly
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Character cutoff applied to chat text before submission
    #[serde(default = "default_max_chat_chars")]
    pub max_chat_chars: usize,
    /// Image lookup URL with a `{token}` placeholder
    #[serde(default = "default_image_lookup_template")]
    pub image_lookup_template: String,
    /// Deep link prefix used for share links
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
}

/// Configuration for a specific LLM provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4")
    pub model: String,
    /// Temperature for generation; the provider default applies when unset
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            enabled: true,
            model: model.into(),
            temperature: None,
            max_tokens: None,
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            timeout: default_timeout(),
            max_chat_chars: default_max_chat_chars(),
            image_lookup_template: default_image_lookup_template(),
            share_base_url: default_share_base_url(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_timeout() -> u64 {
    60
}

fn default_max_chat_chars() -> usize {
    DEFAULT_MAX_CHAT_CHARS
}

fn default_image_lookup_template() -> String {
    DEFAULT_IMAGE_LOOKUP_TEMPLATE.to_string()
}

fn default_share_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

/// Default model per provider when neither config nor caller names one
pub fn default_model_for(provider_name: &str) -> &'static str {
    match provider_name {
        "anthropic" => "claude-3-5-sonnet-20241022",
        _ => "gpt-4",
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with GIFT_SUGGEST__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: GIFT_SUGGEST__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Provider settings by name, falling back to a bare entry with the default model.
    pub fn provider(&self, name: &str) -> ProviderConfig {
        self.providers
            .get(name)
            .cloned()
            .unwrap_or_else(|| ProviderConfig::with_model(default_model_for(name)))
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: GIFT_SUGGEST__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("GIFT_SUGGEST")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
