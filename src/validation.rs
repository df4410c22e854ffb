use thiserror::Error;

use crate::model::GiftRequest;

pub const MIN_GIFTS: u32 = 1;
pub const MAX_GIFTS: u32 = 10;

/// Reasons a gift request is rejected before it reaches the provider
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload a chat file.")]
    NoChatUploaded,

    #[error("Number of gifts must be between 1 and 10.")]
    CountOutOfRange,

    #[error("Minimum budget must be a number.")]
    MinNotNumeric,

    #[error("Maximum budget must be a number.")]
    MaxNotNumeric,

    #[error("Minimum budget cannot be greater than maximum budget.")]
    MinExceedsMax,
}

/// Check a request, reporting the first failure in precedence order.
pub fn validate(request: &GiftRequest) -> Result<(), ValidationError> {
    if request.chat_text.is_empty() {
        return Err(ValidationError::NoChatUploaded);
    }

    if !(MIN_GIFTS..=MAX_GIFTS).contains(&request.num_gifts) {
        return Err(ValidationError::CountOutOfRange);
    }

    let min = parse_budget(request.min_budget.as_deref(), ValidationError::MinNotNumeric)?;
    let max = parse_budget(request.max_budget.as_deref(), ValidationError::MaxNotNumeric)?;

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ValidationError::MinExceedsMax);
        }
    }

    Ok(())
}

/// Blank input means no bound; anything else must be a finite number.
fn parse_budget(raw: Option<&str>, on_error: ValidationError) -> Result<Option<f64>, ValidationError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(text) => match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(on_error),
        },
    }
}

/// Whether a budget field holds a bound at all
pub fn budget_is_set(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| !s.trim().is_empty())
}
