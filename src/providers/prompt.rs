use log::{debug, warn};

use crate::model::GiftRequest;
use crate::validation::budget_is_set;

/// The system message sent with every request.
pub const GIFT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that suggests appropriate gifts based on chat history.";

/// The user prompt template.
///
/// Loaded from `prompt.txt` at compile time. Contains `{{NUM_GIFTS}}`,
/// `{{MIN_BUDGET}}`, `{{MAX_BUDGET}}`, `{{FILTERS}}` and `{{CHAT}}`
/// placeholders filled in by `build_gift_prompt`.
pub const GIFT_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

/// Default cutoff applied to chat text before it is sent
pub const DEFAULT_MAX_CHAT_CHARS: usize = 2000;

/// Cut chat text down to `max_chars` characters, marking the cut with `...`.
pub fn truncate_chat(chat: &str, max_chars: usize) -> String {
    match chat.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => {
            warn!(
                "Chat truncated to {} characters before submission",
                max_chars
            );
            format!("{}...", &chat[..byte_offset])
        }
        None => chat.to_string(),
    }
}

fn describe_filters(request: &GiftRequest) -> String {
    let mut filters = String::new();
    if let Some(occasion) = request.occasion {
        filters.push_str(&format!(" The occasion is {}.", occasion));
    }
    if let Some(age_group) = request.age_group {
        filters.push_str(&format!(" The recipient's age group is {}.", age_group));
    }
    if let Some(category) = request.category {
        filters.push_str(&format!(" Focus on the {} category.", category));
    }
    filters
}

fn budget_or_any(raw: Option<&str>) -> &str {
    match raw {
        Some(value) if budget_is_set(Some(value)) => value.trim(),
        _ => "any",
    }
}

/// Fill the prompt template from a validated request.
pub fn build_gift_prompt(request: &GiftRequest, max_chat_chars: usize) -> String {
    let chat = truncate_chat(&request.chat_text, max_chat_chars);

    let prompt = GIFT_PROMPT_TEMPLATE
        .replace("{{NUM_GIFTS}}", &request.num_gifts.to_string())
        .replace("{{MIN_BUDGET}}", budget_or_any(request.min_budget.as_deref()))
        .replace("{{MAX_BUDGET}}", budget_or_any(request.max_budget.as_deref()))
        .replace("{{FILTERS}}", &describe_filters(request))
        .replace("{{CHAT}}", &chat);

    debug!("Built prompt of {} characters", prompt.chars().count());
    prompt
}
