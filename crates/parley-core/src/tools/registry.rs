//! Collaborator traits for listing and running tools

use crate::tools::types::{DispatchResult, ToolDescriptor};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Lists the tools available to the model; consulted once per turn
#[cfg_attr(test, mockall::automock)]
pub trait ToolRegistry: Send + Sync {
    fn list_tools(&self) -> Vec<ToolDescriptor>;
}

/// Runs a tool by name
///
/// Failures are reported inside [`DispatchResult`], never as an `Err`: the
/// model is told about them and the turn goes on.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn dispatch(&self, tool_name: &str, arguments: &Map<String, Value>) -> DispatchResult;
}

/// A registry over a fixed list of descriptors
#[derive(Debug, Clone, Default)]
pub struct StaticToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl StaticToolRegistry {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    pub fn register(&mut self, tool: ToolDescriptor) {
        self.tools.retain(|t| t.name != tool.name);
        self.tools.push(tool);
    }
}

impl ToolRegistry for StaticToolRegistry {
    fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools.clone()
    }
}
