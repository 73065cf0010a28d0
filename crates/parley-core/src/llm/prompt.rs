//! System prompt composition

use serde::{Deserialize, Serialize};

/// Appended to the site context when no custom prompt is configured
pub const DEFAULT_BEHAVIOR: &str = "Use the tools when they help you answer, confirm what you changed, and keep replies short and clear.";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemPrompt {
    pub site_name: String,
    #[serde(default)]
    pub custom: Option<String>,
}

impl SystemPrompt {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            custom: None,
        }
    }

    pub fn with_custom(mut self, custom: impl Into<String>) -> Self {
        self.custom = Some(custom.into());
        self
    }

    pub fn site_context(&self) -> String {
        format!(
            "You are an AI assistant for the website \"{}\". You have access to tools that can read and manage this site on the user's behalf.",
            self.site_name
        )
    }

    /// Final instructions sent to the model
    pub fn compose(&self) -> String {
        match self.custom.as_deref() {
            Some(custom) if !custom.trim().is_empty() => {
                format!("{}\n\n{}", custom, self.site_context())
            }
            _ => format!("{} {}", self.site_context(), DEFAULT_BEHAVIOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_appends_behavior() {
        let prompt = SystemPrompt::new("Garden Notes");
        let composed = prompt.compose();
        assert!(composed.starts_with(&prompt.site_context()));
        assert!(composed.ends_with(DEFAULT_BEHAVIOR));
        assert!(composed.contains("\"Garden Notes\""));
    }

    #[test]
    fn test_custom_prompt_leads() {
        let prompt = SystemPrompt::new("Garden Notes").with_custom("Answer in French.");
        assert_eq!(
            prompt.compose(),
            format!("Answer in French.\n\n{}", prompt.site_context())
        );
    }

    #[test]
    fn test_blank_custom_prompt_falls_back() {
        let prompt = SystemPrompt::new("Garden Notes").with_custom("   ");
        assert_eq!(prompt.compose(), SystemPrompt::new("Garden Notes").compose());
    }
}
