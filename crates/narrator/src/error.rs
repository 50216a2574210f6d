use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarratorError {
    #[error("Chat completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Chat completion API returned {0}: {1}")]
    ApiError(u16, String),

    #[error("Failed to deserialize the chat completion response: {0}")]
    Deserialization(String),
}
