//! Error types for the catalog/source API client.

use mizu_core::AudioCategory;
use thiserror::Error;

/// Errors that can occur when talking to the catalog/source API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse a server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid API base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Upstream listed zero playable sources for the episode/category pair
    #[error("No playable source for {episode_id} ({category})")]
    NoSourceAvailable {
        episode_id: String,
        category: AudioCategory,
    },
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
