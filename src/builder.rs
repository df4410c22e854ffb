use std::path::PathBuf;
use std::time::Duration;

use crate::chat::read_chat_file;
use crate::config::AppConfig;
use crate::model::{AgeGroup, GiftCategory, GiftRequest, GiftSuggestion, Occasion};
use crate::providers::ProviderFactory;
use crate::session::{AppContext, SuggestionSession};
use crate::validation::validate;
use crate::SuggestError;

/// Represents where the chat transcript comes from
#[derive(Debug, Clone)]
pub enum ChatSource {
    /// Chat text already in memory
    Text(String),
    /// A `.txt` transcript on disk
    File(PathBuf),
}

/// Which completion API to call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(format!(
                "unknown provider '{}', expected one of: {}",
                other,
                ProviderFactory::available_providers().join(", ")
            )),
        }
    }
}

/// Builder for configuring and executing a gift suggestion request
#[derive(Debug)]
pub struct GiftSuggesterBuilder {
    source: Option<ChatSource>,
    num_gifts: u32,
    min_budget: Option<String>,
    max_budget: Option<String>,
    occasion: Option<Occasion>,
    age_group: Option<AgeGroup>,
    category: Option<GiftCategory>,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_chat_chars: Option<usize>,
    config: Option<AppConfig>,
    user_name: Option<String>,
}

impl Default for GiftSuggesterBuilder {
    fn default() -> Self {
        Self {
            source: None,
            num_gifts: 1,
            min_budget: None,
            max_budget: None,
            occasion: None,
            age_group: None,
            category: None,
            provider: None,
            api_key: None,
            model: None,
            base_url: None,
            timeout: None,
            max_chat_chars: None,
            config: None,
            user_name: None,
        }
    }
}

impl GiftSuggesterBuilder {
    /// Use chat text already in memory
    ///
    /// # Example
    /// ```
    /// use gift_suggest::GiftSuggester;
    ///
    /// let builder = GiftSuggester::builder()
    ///     .chat_text("Noura: I've been getting into pottery lately");
    /// ```
    pub fn chat_text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(ChatSource::Text(text.into()));
        self
    }

    /// Read the chat from a `.txt` file when the request is built
    pub fn chat_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(ChatSource::File(path.into()));
        self
    }

    /// Number of gifts to ask for (1 to 10, default 1)
    pub fn num_gifts(mut self, count: u32) -> Self {
        self.num_gifts = count;
        self
    }

    /// Lower budget bound, as entered. Blank means no bound.
    pub fn min_budget(mut self, budget: impl Into<String>) -> Self {
        self.min_budget = Some(budget.into());
        self
    }

    /// Upper budget bound, as entered. Blank means no bound.
    pub fn max_budget(mut self, budget: impl Into<String>) -> Self {
        self.max_budget = Some(budget.into());
        self
    }

    pub fn occasion(mut self, occasion: Occasion) -> Self {
        self.occasion = Some(occasion);
        self
    }

    pub fn age_group(mut self, age_group: AgeGroup) -> Self {
        self.age_group = Some(age_group);
        self
    }

    pub fn category(mut self, category: GiftCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the completion API to call
    ///
    /// # Example
    /// ```
    /// use gift_suggest::{GiftSuggester, ProviderKind};
    ///
    /// let builder = GiftSuggester::builder()
    ///     .chat_text("...")
    ///     .provider(ProviderKind::Anthropic);
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key directly instead of relying on config or environment
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a different endpoint (proxies, compatible servers)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for the provider request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Character cutoff applied to the chat before it is sent
    pub fn max_chat_chars(mut self, limit: usize) -> Self {
        self.max_chat_chars = Some(limit);
        self
    }

    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Display name of the signed-in user
    pub fn user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    /// Validate the input, call the provider and parse the suggestions
    ///
    /// # Errors
    /// Returns `SuggestError` if:
    /// - No chat source was specified
    /// - The chat file cannot be read
    /// - Validation fails (no request is sent)
    /// - The provider cannot be set up or the request fails
    ///
    /// # Example
    /// ```no_run
    /// # use gift_suggest::GiftSuggester;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let gifts = GiftSuggester::builder()
    ///     .chat_file("chat.txt")
    ///     .num_gifts(3)
    ///     .min_budget("20")
    ///     .max_budget("100")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Vec<GiftSuggestion>, SuggestError> {
        let source = self.source.ok_or_else(|| {
            SuggestError::BuilderError(
                "No chat specified. Use .chat_text() or .chat_file()".to_string(),
            )
        })?;

        let chat_text = match source {
            ChatSource::Text(text) => text,
            ChatSource::File(path) => read_chat_file(&path).await?,
        };

        let request = GiftRequest {
            chat_text,
            num_gifts: self.num_gifts,
            min_budget: self.min_budget,
            max_budget: self.max_budget,
            occasion: self.occasion,
            age_group: self.age_group,
            category: self.category,
        };
        validate(&request)?;

        let mut config = match self.config {
            Some(config) => config,
            None => AppConfig::load()?,
        };
        if let Some(limit) = self.max_chat_chars {
            config.max_chat_chars = limit;
        }

        let provider_name = self
            .provider
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| config.default_provider.clone());
        let mut provider_config = config.provider(&provider_name);
        if let Some(key) = self.api_key {
            provider_config.api_key = Some(key);
        }
        if let Some(model) = self.model {
            provider_config.model = model;
        }
        if let Some(url) = self.base_url {
            provider_config.base_url = Some(url);
        }
        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout));

        let provider = ProviderFactory::create(&provider_name, &provider_config, timeout)?;
        let context = AppContext::new(config, self.user_name);
        let session = SuggestionSession::new(&context, provider);

        let gifts = session.submit(&request).await?;
        Ok(gifts)
    }
}

/// Main entry point for the builder API
pub struct GiftSuggester;

impl GiftSuggester {
    /// Creates a new builder for a gift suggestion request
    ///
    /// # Example
    /// ```
    /// use gift_suggest::GiftSuggester;
    ///
    /// let builder = GiftSuggester::builder();
    /// ```
    pub fn builder() -> GiftSuggesterBuilder {
        GiftSuggesterBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("OpenAI".parse::<ProviderKind>(), Ok(ProviderKind::OpenAI));
        assert_eq!(" anthropic ".parse::<ProviderKind>(), Ok(ProviderKind::Anthropic));
        assert!("ollama".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let builder = GiftSuggester::builder();
        assert_eq!(builder.num_gifts, 1);
        assert!(builder.source.is_none());
        assert!(builder.provider.is_none());
    }

    #[tokio::test]
    async fn test_build_without_source() {
        let result = GiftSuggester::builder().build().await;
        assert!(matches!(result, Err(SuggestError::BuilderError(_))));
    }
}
