//! Tool-related type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool as listed by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique name within one turn's catalog
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON-Schema-like description of the arguments
    #[serde(
        rename = "inputSchema",
        alias = "input_schema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_schema: Option<Value>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: None,
        }
    }

    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// A tool call requested by the model
///
/// `id` is whatever the vendor assigned, or a locally synthesized token for
/// vendors that assign none. It only correlates a result with its call
/// inside one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Text handed back to the model to resolve a [`ToolCall`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub call_id: String,
    pub tool_name: String,
    pub output: String,
    /// Set when `output` carries a failure or denial message
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            output: output.into(),
            is_error: false,
        }
    }

    pub fn error(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            output: message.into(),
            is_error: true,
        }
    }

    /// Resolve `call` with what the executor reported
    pub fn from_dispatch(call: &ToolCall, result: DispatchResult) -> Self {
        match result {
            DispatchResult::Failure { error } => Self::error(&call.id, &call.name, error.message),
            DispatchResult::Success { content } => {
                Self::success(&call.id, &call.name, join_content(&content))
            }
        }
    }
}

/// One content block returned by the executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchError {
    pub message: String,
}

/// What the executor hands back: `{content:[{text}]}` or `{error:{message}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DispatchResult {
    Failure { error: DispatchError },
    Success { content: Vec<ContentItem> },
}

impl DispatchResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Success {
            content: vec![ContentItem { text: text.into() }],
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            error: DispatchError {
                message: message.into(),
            },
        }
    }
}

// Each block is newline-terminated, then the whole thing is trimmed.
fn join_content(content: &[ContentItem]) -> String {
    let mut joined = String::new();
    for item in content {
        joined.push_str(&item.text);
        joined.push('\n');
    }
    joined.trim().to_string()
}
