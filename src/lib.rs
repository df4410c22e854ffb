//! Gift suggestions from chat transcripts.
//!
//! A chat is validated together with the requested filters, turned into a
//! prompt, sent to a language model, and the `%%%`-separated reply is parsed
//! into [`GiftSuggestion`] cards.

pub mod builder;
pub mod chat;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod providers;
pub mod session;
pub mod validation;

pub use builder::{ChatSource, GiftSuggester, GiftSuggesterBuilder, ProviderKind};
pub use config::AppConfig;
pub use error::SuggestError;
pub use model::{AgeGroup, GiftCategory, GiftRequest, GiftSuggestion, Occasion};
pub use parser::{parse_suggestions, ResponseParser};
pub use session::{AppContext, SuggestionSession};
pub use validation::{validate, ValidationError};

use crate::providers::ProviderFactory;

/// Request suggestions using the default provider from `config.toml` and the environment.
///
/// # Example
/// ```no_run
/// use gift_suggest::{suggest_gifts, GiftRequest};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = GiftRequest {
///     chat_text: "Maha: my old headphones finally died".to_string(),
///     num_gifts: 3,
///     ..Default::default()
/// };
/// let gifts = suggest_gifts(&request).await?;
/// # Ok(())
/// # }
/// ```
pub async fn suggest_gifts(request: &GiftRequest) -> Result<Vec<GiftSuggestion>, SuggestError> {
    validate(request)?;

    let config = AppConfig::load()?;
    let provider = ProviderFactory::get_default_provider(&config)?;
    let context = AppContext::new(config, None);
    let session = SuggestionSession::new(&context, provider);

    let gifts = session.submit(request).await?;
    Ok(gifts)
}
