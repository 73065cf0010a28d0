//! Vendor adapters

pub mod anthropic;
pub mod base;
pub mod error_utils;
pub mod google;
pub mod openai;
pub mod provider_trait;

#[cfg(test)]
mod anthropic_tests;
#[cfg(test)]
mod google_tests;

pub use anthropic::AnthropicAdapter;
pub use google::GoogleAdapter;
pub use openai::OpenAiAdapter;
pub use provider_trait::{
    ParsedReply, Provider, ProviderAdapter, ProviderOptions, SendRequest, TurnResult,
};
