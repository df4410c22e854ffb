use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::config::AppConfig;
use crate::error::SuggestError;
use crate::model::{GiftRequest, GiftSuggestion};
use crate::parser::ResponseParser;
use crate::providers::{build_gift_prompt, LlmProvider, GIFT_SYSTEM_PROMPT};
use crate::validation::validate;

/// Values shared by everything that renders or requests suggestions.
/// Built once at startup.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    /// Display name of the signed-in user, if any
    pub user_name: Option<String>,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig, user_name: Option<String>) -> Self {
        Self {
            user_name: user_name.filter(|name| !name.trim().is_empty()),
            config,
        }
    }

    pub fn greeting(&self) -> Option<String> {
        self.user_name
            .as_ref()
            .map(|name| format!("Welcome, {}", name.trim()))
    }
}

/// Holds the current gift list and gates re-submission while a request is loading.
pub struct SuggestionSession<'a> {
    context: &'a AppContext,
    provider: Box<dyn LlmProvider>,
    parser: ResponseParser,
    loading: AtomicBool,
    gifts: Mutex<Vec<GiftSuggestion>>,
}

/// Clears the loading flag however the request ends.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<'a> SuggestionSession<'a> {
    pub fn new(context: &'a AppContext, provider: Box<dyn LlmProvider>) -> Self {
        Self {
            context,
            parser: ResponseParser::new(context.config.image_lookup_template.clone()),
            provider,
            loading: AtomicBool::new(false),
            gifts: Mutex::new(Vec::new()),
        }
    }

    pub fn context(&self) -> &AppContext {
        self.context
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// The suggestions from the last successful request.
    pub fn gifts(&self) -> Vec<GiftSuggestion> {
        self.gifts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validate, call the provider once, and replace the gift list with the parsed result.
    ///
    /// A failed request leaves the previous list in place.
    pub async fn submit(&self, request: &GiftRequest) -> Result<Vec<GiftSuggestion>, SuggestError> {
        if self.is_loading() {
            warn!("Submit ignored, a request is already in progress");
            return Err(SuggestError::RequestInFlight);
        }

        validate(request)?;

        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SuggestError::RequestInFlight);
        }
        let _guard = LoadingGuard(&self.loading);

        let prompt = build_gift_prompt(request, self.context.config.max_chat_chars);
        info!(
            "Submitting request for {} gifts to {}",
            request.num_gifts,
            self.provider.provider_name()
        );
        let raw = self.provider.complete(GIFT_SYSTEM_PROMPT, &prompt).await?;

        let gifts = self.parser.parse(&raw);
        *self.gifts.lock().unwrap_or_else(PoisonError::into_inner) = gifts.clone();
        Ok(gifts)
    }

    /// Drop the current results, e.g. on sign-out.
    pub fn reset(&self) {
        self.gifts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
