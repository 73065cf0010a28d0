//! Constructor methods for ParleyError

use super::types::ParleyError;

impl ParleyError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            url: None,
        }
    }

    /// Create a transport error for a specific endpoint
    pub fn transport_with_url(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            url: Some(url.into()),
        }
    }

    /// Create an API error from a non-success status
    pub fn api(status: u16, message: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            provider: provider.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a protocol error for an uninterpretable reply
    pub fn protocol(message: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
            provider: provider.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
