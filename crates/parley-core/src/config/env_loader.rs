//! Environment variable overlay
//!
//! `PARLEY_*` variables cover general settings; each vendor reads
//! `<PREFIX>_API_KEY`, `<PREFIX>_MODEL` and `<PREFIX>_BASE_URL` where the
//! prefix is `OPENAI`, `ANTHROPIC` or `GEMINI`. Google also accepts
//! `GOOGLE_API_KEY` when `GEMINI_API_KEY` is unset.

use crate::config::model::ParleyConfig;
use crate::error::{ParleyError, ParleyResult};
use crate::llm::provider_types::ProviderId;
use std::collections::HashMap;

/// Overlay `vars` onto `config`
///
/// Empty values are ignored so an exported-but-blank variable does not wipe
/// a key coming from the config file.
pub fn apply_env_vars(
    config: &mut ParleyConfig,
    vars: impl IntoIterator<Item = (String, String)>,
) -> ParleyResult<()> {
    let vars: HashMap<String, String> = vars
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();

    if let Some(provider) = vars.get("PARLEY_PROVIDER") {
        config.default_provider = provider.clone();
    }
    if let Some(model) = vars.get("PARLEY_MODEL") {
        config.model = Some(model.clone());
    }
    if let Some(max) = vars.get("PARLEY_MAX_TOOL_INVOCATIONS") {
        config.max_tool_invocations = max.trim().parse().map_err(|_| {
            ParleyError::config_with_context(
                "Invalid PARLEY_MAX_TOOL_INVOCATIONS value",
                format!("Expected a non-negative integer, got '{}'", max),
            )
        })?;
    }
    if let Some(site_name) = vars.get("PARLEY_SITE_NAME") {
        config.site_name = site_name.clone();
    }
    if let Some(prompt) = vars.get("PARLEY_SYSTEM_PROMPT") {
        config.system_prompt = Some(prompt.clone());
    }

    for provider in ProviderId::ALL {
        apply_provider_vars(config, provider, &vars);
    }

    Ok(())
}

fn apply_provider_vars(config: &mut ParleyConfig, provider: ProviderId, vars: &HashMap<String, String>) {
    let prefix = provider.env_prefix();
    let api_key = vars.get(&format!("{}_API_KEY", prefix)).or_else(|| match provider {
        ProviderId::Google => vars.get("GOOGLE_API_KEY"),
        _ => None,
    });
    let model = vars.get(&format!("{}_MODEL", prefix));
    let base_url = vars.get(&format!("{}_BASE_URL", prefix));

    if api_key.is_none() && model.is_none() && base_url.is_none() {
        return;
    }

    let settings = config.provider_settings_mut(provider);
    if let Some(api_key) = api_key {
        settings.api_key = Some(api_key.clone());
    }
    if let Some(model) = model {
        settings.model = Some(model.clone());
    }
    if let Some(base_url) = base_url {
        settings.base_url = Some(base_url.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ProviderSettings;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_general_settings() {
        let mut config = ParleyConfig::default();
        apply_env_vars(
            &mut config,
            vars(&[
                ("PARLEY_PROVIDER", "anthropic"),
                ("PARLEY_MAX_TOOL_INVOCATIONS", "3"),
                ("PARLEY_SITE_NAME", "Bakery"),
                ("PARLEY_SYSTEM_PROMPT", "Be brief."),
            ]),
        )
        .unwrap();

        assert_eq!(config.default_provider, "anthropic");
        assert_eq!(config.max_tool_invocations, 3);
        assert_eq!(config.site_name, "Bakery");
        assert_eq!(config.system_prompt.as_deref(), Some("Be brief."));
    }

    #[test]
    fn test_vendor_variables() {
        let mut config = ParleyConfig::default();
        apply_env_vars(
            &mut config,
            vars(&[
                ("OPENAI_API_KEY", "sk-openai"),
                ("OPENAI_BASE_URL", "http://localhost:8080"),
                ("GOOGLE_API_KEY", "g-fallback"),
                ("ANTHROPIC_MODEL", "claude-opus-4-1"),
            ]),
        )
        .unwrap();

        let openai = config.provider_settings(ProviderId::OpenAi).unwrap();
        assert_eq!(openai.api_key.as_deref(), Some("sk-openai"));
        assert_eq!(openai.base_url.as_deref(), Some("http://localhost:8080"));
        let google = config.provider_settings(ProviderId::Google).unwrap();
        assert_eq!(google.api_key.as_deref(), Some("g-fallback"));
        let anthropic = config.provider_settings(ProviderId::Anthropic).unwrap();
        assert_eq!(anthropic.api_key, None);
        assert_eq!(anthropic.model.as_deref(), Some("claude-opus-4-1"));
    }

    #[test]
    fn test_gemini_key_wins_over_google_key() {
        let mut config = ParleyConfig::default();
        apply_env_vars(
            &mut config,
            vars(&[("GOOGLE_API_KEY", "old"), ("GEMINI_API_KEY", "new")]),
        )
        .unwrap();
        let google = config.provider_settings(ProviderId::Google).unwrap();
        assert_eq!(google.api_key.as_deref(), Some("new"));
    }

    #[test]
    fn test_blank_values_keep_file_settings() {
        let mut config = ParleyConfig::default();
        config.providers.insert(
            "openai".to_string(),
            ProviderSettings {
                api_key: Some("from-file".to_string()),
                ..Default::default()
            },
        );
        apply_env_vars(&mut config, vars(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert_eq!(
            config.provider_settings(ProviderId::OpenAi).unwrap().api_key.as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn test_invalid_limit_is_config_error() {
        let mut config = ParleyConfig::default();
        let err = apply_env_vars(&mut config, vars(&[("PARLEY_MAX_TOOL_INVOCATIONS", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ParleyError::Config { .. }));
    }
}
