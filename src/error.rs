//! Error types for mailgate.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Notify error: {0}")]
    Notify(#[from] NotifyError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised while processing a single inbound email event.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Unable to retrieve email content")]
    ContentUnavailable,

    #[error("Malformed email: {0}")]
    Malformed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Notify error: {0}")]
    Notify(#[from] NotifyError),
}

/// Object-storage fetch errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to fetch {bucket}/{key}: {reason}")]
    Fetch {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("Storage returned status {status} for {bucket}/{key}")]
    BadStatus {
        status: u16,
        bucket: String,
        key: String,
    },
}

/// Issue-tracker API errors.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Tracker request failed: {0}")]
    Request(String),

    #[error("Tracker returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid tracker response: {0}")]
    InvalidResponse(String),
}

/// Confirmation-send errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid recipient address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build confirmation message: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Transport(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
