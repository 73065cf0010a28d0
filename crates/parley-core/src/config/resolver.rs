//! Turning a loaded config into a ready provider and controller

use crate::config::model::ParleyConfig;
use crate::error::{ParleyError, ParleyResult};
use crate::llm::model_capabilities::ModelFamilies;
use crate::llm::prompt::SystemPrompt;
use crate::llm::provider_types::ProviderId;
use crate::llm::providers::{Provider, ProviderOptions};
use crate::llm::transport::{ReqwestTransport, Transport};
use crate::tools::registry::{ToolExecutor, ToolRegistry};
use crate::turn::{TurnController, TurnSettings};
use std::sync::Arc;
use std::time::Duration;

/// A provider with everything needed to talk to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub id: ProviderId,
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

impl ParleyConfig {
    /// Pick the provider to use, `requested` taking precedence over
    /// `default_provider`
    ///
    /// Fails with a config error for unknown ids or a missing key, so no
    /// request is ever sent without credentials.
    pub fn resolve_provider(&self, requested: Option<&str>) -> ParleyResult<ResolvedProvider> {
        let id: ProviderId = requested.unwrap_or(&self.default_provider).parse()?;
        let settings = self.provider_settings(id).cloned().unwrap_or_default();

        let api_key = settings
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ParleyError::config_with_context(
                    format!("No API key configured for {}", id),
                    format!(
                        "Set {}_API_KEY or providers.{}.api_key",
                        id.env_prefix(),
                        id.as_str()
                    ),
                )
            })?;

        let model = self
            .model
            .clone()
            .or(settings.model)
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| id.default_model().to_string());

        Ok(ResolvedProvider {
            id,
            api_key,
            model,
            base_url: settings.base_url,
        })
    }

    /// Built-in reasoning families plus the configured prefixes
    pub fn model_families(&self) -> ParleyResult<ModelFamilies> {
        let mut families = ModelFamilies::default();
        for (provider, prefixes) in &self.reasoning_prefixes {
            let provider: ProviderId = provider.parse()?;
            for prefix in prefixes {
                families = families.with_reasoning_prefix(provider, prefix.clone());
            }
        }
        Ok(families)
    }

    pub fn provider_options(&self, resolved: &ResolvedProvider) -> ParleyResult<ProviderOptions> {
        let mut options = ProviderOptions::default()
            .with_families(self.model_families()?)
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs));
        if let Some(base_url) = &resolved.base_url {
            options = options.with_base_url(base_url.clone());
        }
        Ok(options)
    }

    pub fn system_prompt(&self) -> SystemPrompt {
        let prompt = SystemPrompt::new(self.site_name.clone());
        match &self.system_prompt {
            Some(custom) => prompt.with_custom(custom.clone()),
            None => prompt,
        }
    }

    pub fn turn_settings(&self, resolved: &ResolvedProvider) -> TurnSettings {
        TurnSettings::new(resolved.api_key.clone(), resolved.model.clone())
            .with_system_prompt(self.system_prompt())
            .with_sampling(self.sampling.clone())
            .with_max_output_tokens(self.max_output_tokens)
            .with_max_tool_invocations(self.max_tool_invocations)
    }

    /// Controller over the default reqwest transport
    pub fn build_controller(
        &self,
        requested: Option<&str>,
        registry: Arc<dyn ToolRegistry>,
        executor: Arc<dyn ToolExecutor>,
    ) -> ParleyResult<TurnController> {
        let transport = Arc::new(ReqwestTransport::new()?);
        self.build_controller_with_transport(requested, registry, executor, transport)
    }

    pub fn build_controller_with_transport(
        &self,
        requested: Option<&str>,
        registry: Arc<dyn ToolRegistry>,
        executor: Arc<dyn ToolExecutor>,
        transport: Arc<dyn Transport>,
    ) -> ParleyResult<TurnController> {
        let resolved = self.resolve_provider(requested)?;
        tracing::info!(provider = %resolved.id, model = %resolved.model, "provider resolved");

        let provider = Provider::new(resolved.id, self.provider_options(&resolved)?, transport);
        Ok(TurnController::new(
            provider,
            self.turn_settings(&resolved),
            registry,
            executor,
            Arc::new(self.permissions.clone()),
        ))
    }
}
