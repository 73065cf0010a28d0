//! Model family table
//!
//! Reasoning models reject temperature, top_p and the penalty knobs outright,
//! so adapters leave them out of the request. Families are matched by a
//! case-sensitive model id prefix. New families are added here or through
//! configuration, never with inline checks in an adapter.

use crate::llm::provider_types::ProviderId;

/// Built-in reasoning model prefixes
pub const REASONING_MODEL_PREFIXES: &[(ProviderId, &str)] = &[
    (ProviderId::OpenAi, "o1"),
    (ProviderId::OpenAi, "o3"),
    (ProviderId::OpenAi, "o4"),
    (ProviderId::OpenAi, "gpt-5"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFamilies {
    reasoning: Vec<(ProviderId, String)>,
}

impl Default for ModelFamilies {
    fn default() -> Self {
        Self {
            reasoning: REASONING_MODEL_PREFIXES
                .iter()
                .map(|(provider, prefix)| (*provider, prefix.to_string()))
                .collect(),
        }
    }
}

impl ModelFamilies {
    pub fn with_reasoning_prefix(mut self, provider: ProviderId, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.is_empty() && !self.is_listed(provider, &prefix) {
            self.reasoning.push((provider, prefix));
        }
        self
    }

    fn is_listed(&self, provider: ProviderId, prefix: &str) -> bool {
        self.reasoning
            .iter()
            .any(|(p, existing)| *p == provider && existing == prefix)
    }

    pub fn is_reasoning_model(&self, provider: ProviderId, model: &str) -> bool {
        self.reasoning
            .iter()
            .any(|(p, prefix)| *p == provider && model.starts_with(prefix.as_str()))
    }

    /// Whether `model` may receive sampling parameters
    pub fn accepts_sampling(&self, provider: ProviderId, model: &str) -> bool {
        !self.is_reasoning_model(provider, model)
    }
}
