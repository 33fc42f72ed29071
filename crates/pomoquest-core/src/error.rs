//! Core error types for pomoquest-core.
//!
//! Nothing in the reducer returns an error: rejected transitions are reported
//! as [`crate::events::Event::Rejected`] outcomes. The types here cover the
//! fallible edges around it (configuration, credentials, the remote provider,
//! form input, journal export, attachments).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomoquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote content provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Journal export errors
    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    /// Attachment encoding errors
    #[error("Attachment error: {0}")]
    Attachment(#[from] AttachmentError),

    /// OS keyring errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the data directory
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised by the remote text-generation client.
///
/// These never reach the game: the fallback provider turns every one of them
/// into offline content. They exist so the client stays testable on its own.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key configured
    #[error("No API key configured for the text-generation service")]
    MissingCredential,

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Text-generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not follow the expected contract
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Base URL could not be joined with the model path
    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Form input rejected before it becomes an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming
    #[error("'{field}' must not be empty")]
    Empty { field: &'static str },

    /// A link shortcut URL does not parse
    #[error("Invalid URL '{input}': {message}")]
    InvalidUrl { input: String, message: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Journal export errors.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Nothing to write
    #[error("Journal entry is empty")]
    EmptyEntry,

    /// Failed to write the file
    #[error("Failed to write journal to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Attachment encoding/decoding errors.
#[derive(Error, Debug)]
pub enum AttachmentError {
    /// Failed to read the source file
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file has no bytes
    #[error("Attachment {0} is empty")]
    EmptyFile(PathBuf),

    /// Stored content is not a base64 data URL
    #[error("Not a base64 data URL")]
    NotDataUrl,

    /// Payload could not be decoded
    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
