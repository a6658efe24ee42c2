use thiserror::Error;

/// Errors reaching the relay endpoint from the conversation client.
///
/// Non-success HTTP codes are folded in here as well; the client treats every
/// variant the same way.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("malformed relay response: {0}")]
    Decode(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("relay task aborted: {0}")]
    Aborted(String),
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
