//! Configuration data model

use crate::llm::provider_types::{ProviderId, SamplingParams};
use crate::llm::transport::DEFAULT_REQUEST_TIMEOUT;
use crate::tools::permission::PermissionSettings;
use crate::turn::controller::DEFAULT_MAX_TOOL_INVOCATIONS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Site name used when none is configured
pub const DEFAULT_SITE_NAME: &str = "My Site";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    /// Provider used when none is requested explicitly
    pub default_provider: String,
    /// Model override applied to whichever provider is resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Keyed by provider id (`openai`, `anthropic`, `google`)
    pub providers: HashMap<String, ProviderSettings>,
    pub sampling: SamplingParams,
    pub max_output_tokens: u32,
    pub max_tool_invocations: usize,
    pub request_timeout_secs: u64,
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub permissions: PermissionSettings,
    /// Extra reasoning-model prefixes per provider id, added to the built-in table
    pub reasoning_prefixes: HashMap<String, Vec<String>>,
    pub logging: LoggingConfig,
}

impl Default for ParleyConfig {
    fn default() -> Self {
        Self {
            default_provider: ProviderId::OpenAi.as_str().to_string(),
            model: None,
            providers: HashMap::new(),
            sampling: SamplingParams::default(),
            max_output_tokens: 4096,
            max_tool_invocations: DEFAULT_MAX_TOOL_INVOCATIONS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            system_prompt: None,
            permissions: PermissionSettings::default(),
            reasoning_prefixes: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ParleyConfig {
    /// Settings for `provider`, accepting alias keys such as `gemini`
    pub fn provider_settings(&self, provider: ProviderId) -> Option<&ProviderSettings> {
        self.providers
            .iter()
            .find(|(key, _)| key.parse::<ProviderId>().ok() == Some(provider))
            .map(|(_, settings)| settings)
    }

    /// Mutable settings for `provider`, created when missing
    pub fn provider_settings_mut(&mut self, provider: ProviderId) -> &mut ProviderSettings {
        let key = self
            .providers
            .keys()
            .find(|key| key.parse::<ProviderId>().ok() == Some(provider))
            .cloned()
            .unwrap_or_else(|| provider.as_str().to_string());
        self.providers.entry(key).or_default()
    }
}

/// Credentials and endpoint for one vendor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParleyConfig::default();
        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.max_output_tokens, 4096);
        assert_eq!(config.max_tool_invocations, 10);
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.sampling.temperature, 0.7);
    }

    #[test]
    fn test_provider_settings_accepts_alias_keys() {
        let mut config = ParleyConfig::default();
        config.providers.insert(
            "gemini".to_string(),
            ProviderSettings {
                api_key: Some("g-key".to_string()),
                ..Default::default()
            },
        );

        let settings = config.provider_settings(ProviderId::Google).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("g-key"));

        config.provider_settings_mut(ProviderId::Google).model = Some("gemini-2.5-pro".to_string());
        assert_eq!(config.providers.len(), 1);
        assert_eq!(
            config.providers["gemini"].model.as_deref(),
            Some("gemini-2.5-pro")
        );
    }
}
