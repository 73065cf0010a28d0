//! Demo tools bundled with the CLI

use async_trait::async_trait;
use chrono::Local;
use parley_core::{DispatchResult, ToolDescriptor, ToolExecutor, ToolRegistry};
use serde_json::{Map, Value, json};
use std::fmt::Write;

pub const CURRENT_TIME: &str = "current_time";
pub const ECHO: &str = "echo";

#[derive(Debug, Default)]
pub struct BuiltinTools;

impl BuiltinTools {
    pub fn new() -> Self {
        Self
    }

    fn current_time(arguments: &Map<String, Value>) -> DispatchResult {
        let now = Local::now();
        match arguments.get("format").and_then(Value::as_str) {
            Some(format) => {
                let mut out = String::new();
                // chrono reports a bad specifier as a fmt error
                match write!(out, "{}", now.format(format)) {
                    Ok(()) => DispatchResult::text(out),
                    Err(_) => DispatchResult::failure(format!("Invalid time format: {}", format)),
                }
            }
            None => DispatchResult::text(now.to_rfc3339()),
        }
    }

    fn echo(arguments: &Map<String, Value>) -> DispatchResult {
        match arguments.get("text").and_then(Value::as_str) {
            Some(text) => DispatchResult::text(text),
            None => DispatchResult::failure("Missing required argument: text"),
        }
    }
}

impl ToolRegistry for BuiltinTools {
    fn list_tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new(CURRENT_TIME, "Get the current local date and time").with_input_schema(
                json!({
                    "type": "object",
                    "properties": {
                        "format": {
                            "type": "string",
                            "description": "strftime format, RFC 3339 when omitted"
                        }
                    }
                }),
            ),
            ToolDescriptor::new(ECHO, "Repeat the given text back").with_input_schema(json!({
                "type": "object",
                "properties": {"text": {"type": "string"}},
                "required": ["text"]
            })),
        ]
    }
}

#[async_trait]
impl ToolExecutor for BuiltinTools {
    async fn dispatch(&self, tool_name: &str, arguments: &Map<String, Value>) -> DispatchResult {
        tracing::debug!(tool = tool_name, "running builtin tool");
        match tool_name {
            CURRENT_TIME => Self::current_time(arguments),
            ECHO => Self::echo(arguments),
            other => DispatchResult::failure(format!("Unknown tool: {}", other)),
        }
    }
}
