//! Permission gating for tool execution
//!
//! A [`PermissionPolicy`] decides per call whether the controller may run a
//! tool on its own, must ask the user first, or must refuse. Refusals are sent
//! to the model as ordinary tool results so it can answer around them.

use crate::tools::types::{ToolCall, ToolResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output sent to the model when the user declines a call
pub const DENIED_BY_USER: &str = "The user denied permission to run this tool.";

/// Decision for a single tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    Allow,
    Ask,
    Deny { reason: String },
}

pub trait PermissionPolicy: Send + Sync {
    fn check(&self, call: &ToolCall) -> Permission;
}

/// How a tool is gated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionMode {
    #[default]
    AlwaysAllow,
    Ask,
    Deny,
}

impl PermissionMode {
    fn permission(self, tool_name: &str) -> Permission {
        match self {
            Self::AlwaysAllow => Permission::Allow,
            Self::Ask => Permission::Ask,
            Self::Deny => Permission::Deny {
                reason: format!("Tool '{}' is disabled on this site.", tool_name),
            },
        }
    }
}

impl PermissionPolicy for PermissionMode {
    fn check(&self, call: &ToolCall) -> Permission {
        self.permission(&call.name)
    }
}

/// Default mode plus per-tool overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionSettings {
    #[serde(default)]
    pub default_mode: PermissionMode,
    #[serde(default)]
    pub tools: HashMap<String, PermissionMode>,
}

impl PermissionSettings {
    pub fn new(default_mode: PermissionMode) -> Self {
        Self {
            default_mode,
            tools: HashMap::new(),
        }
    }

    pub fn with_tool(mut self, name: impl Into<String>, mode: PermissionMode) -> Self {
        self.tools.insert(name.into(), mode);
        self
    }

    pub fn mode_for(&self, tool_name: &str) -> PermissionMode {
        self.tools
            .get(tool_name)
            .copied()
            .unwrap_or(self.default_mode)
    }
}

impl PermissionPolicy for PermissionSettings {
    fn check(&self, call: &ToolCall) -> Permission {
        self.mode_for(&call.name).permission(&call.name)
    }
}

/// The user's answer for one call that needed approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub call_id: String,
    pub approved: bool,
}

impl ApprovalDecision {
    pub fn approve(call_id: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            approved: true,
        }
    }

    pub fn deny(call_id: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            approved: false,
        }
    }
}

pub(crate) fn denial_result(call: &ToolCall, reason: &str) -> ToolResult {
    ToolResult::error(&call.id, &call.name, reason)
}
