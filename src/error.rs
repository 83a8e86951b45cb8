// src/error.rs

//! Unified error handling for the party finder watcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request completed with a non-success status
    #[error("Unable to access URL {url}: status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Fetched page is not valid UTF-8 text
    #[error("Page from {url} is not valid UTF-8: {message}")]
    Encoding { url: String, message: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// A listing field could not be extracted
    #[error("Extraction error for {context}: {message}")]
    Extract { context: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Destination channel does not exist or is not visible to the bot
    #[error("Channel with ID {0} not found")]
    ChannelNotFound(u64),

    /// Destination message does not exist
    #[error("Message with ID {message_id} not found in channel {channel_id}")]
    MessageNotFound { channel_id: u64, message_id: u64 },

    /// Discord API error. Boxed because `serenity::Error` is large.
    #[cfg(feature = "discord")]
    #[error("Discord error: {0}")]
    Discord(#[from] Box<serenity::Error>),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create an extraction error with context.
    pub fn extract(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extract {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(feature = "discord")]
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::Discord(Box::new(err))
    }
}
