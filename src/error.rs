use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while producing gift suggestions
#[derive(Error, Debug)]
pub enum SuggestError {
    /// The form input was rejected before any request was made
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The provider answered with HTTP 429
    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,

    /// The provider answered with HTTP 401
    #[error("Unauthorized. Please check your API key.")]
    Unauthorized,

    /// The provider answered with any other non-success status
    #[error("Error: {message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// The request was sent but no response came back
    #[error("No response from the server. Please try again later. ({0})")]
    NoResponse(#[source] reqwest::Error),

    /// The request could not be prepared or sent
    #[error("An unexpected error occurred: {0}")]
    RequestSetup(String),

    /// The provider responded successfully but without completion text
    #[error("Malformed response from provider: {0}")]
    MalformedResponse(String),

    /// The uploaded chat file is not a usable text file
    #[error("Please upload a valid .txt file: {0}")]
    InvalidChatFile(String),

    /// Failed to read the chat file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// A request is already loading for this session
    #[error("A request is already in progress")]
    RequestInFlight,
}

impl From<reqwest::Error> for SuggestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            SuggestError::RequestSetup(err.to_string())
        } else if err.is_decode() {
            SuggestError::MalformedResponse(err.to_string())
        } else {
            SuggestError::NoResponse(err)
        }
    }
}
