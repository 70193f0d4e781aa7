//! Error types for bloodbond-core

use thiserror::Error;

/// Result type alias using bloodbond-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the backend or the image host
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required endpoint or key is missing from the client configuration
    #[error("Not configured: {0}")]
    NotConfigured(&'static str),

    /// Image host rejected or failed the upload
    #[error("Image upload failed: {0}")]
    Upload(String),
}
