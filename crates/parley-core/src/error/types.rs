//! Core error type for Parley

use thiserror::Error;

/// Result type alias for Parley operations
pub type ParleyResult<T> = Result<T, ParleyError>;

/// Main error type for Parley
///
/// None of these variants leave the conversation partially updated: a caller
/// can retry a failed request with the conversation it already holds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParleyError {
    /// Network, DNS or timeout failure before a response was read
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        url: Option<String>,
    },

    /// Vendor answered with a non-2xx status
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        provider: String,
    },

    /// Missing API key, unknown provider id or an unreadable config file
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// The tool-call loop hit the configured per-turn ceiling
    #[error("Too many tool invocations: limit of {limit} reached for this turn")]
    ToolLimitExceeded { limit: usize },

    /// A conversation recorded by one provider was handed to another
    #[error("Conversation was recorded by {recorded}, cannot continue it with {requested}")]
    ProviderMismatch { recorded: String, requested: String },

    /// The vendor reply could not be interpreted
    #[error("Protocol error from {provider}: {message}")]
    Protocol { message: String, provider: String },

    /// Caller-supplied input is inconsistent
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl ParleyError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "PARLEY_TRANSPORT",
            Self::Api { .. } => "PARLEY_API",
            Self::Config { .. } => "PARLEY_CONFIG",
            Self::ToolLimitExceeded { .. } => "PARLEY_TOOL_LIMIT",
            Self::ProviderMismatch { .. } => "PARLEY_PROVIDER_MISMATCH",
            Self::Protocol { .. } => "PARLEY_PROTOCOL",
            Self::InvalidInput { .. } => "PARLEY_INVALID_INPUT",
        }
    }

    /// Whether resending the same request with the same conversation may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
