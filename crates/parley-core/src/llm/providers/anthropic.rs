//! Anthropic Messages API adapter

use crate::error::{ParleyError, ParleyResult};
use crate::llm::messages::TurnInput;
use crate::llm::provider_types::ProviderId;
use crate::tools::schema::normalize;
use crate::tools::types::{ToolCall, ToolDescriptor};
use serde_json::{Map, Value, json};
use std::time::Duration;

use super::provider_trait::{ParsedReply, ProviderAdapter, ProviderOptions, SendRequest};

/// Value sent in the `anthropic-version` header
pub const API_VERSION: &str = "2023-06-01";

pub struct AnthropicAdapter {
    options: ProviderOptions,
}

impl AnthropicAdapter {
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }
}

impl ProviderAdapter for AnthropicAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn wants_sampling_params(&self, model: &str) -> bool {
        self.options
            .families
            .accepts_sampling(ProviderId::Anthropic, model)
    }

    fn format_tools(&self, tools: &[ToolDescriptor]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "input_schema": normalize(tool).into_value(),
                })
            })
            .collect()
    }

    fn endpoint(&self, _model: &str, _api_key: &str) -> ParleyResult<String> {
        Ok(format!(
            "{}/v1/messages",
            self.options.base_url_for(ProviderId::Anthropic)
        ))
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(String, String)> {
        vec![
            ("x-api-key".to_string(), api_key.to_string()),
            ("anthropic-version".to_string(), API_VERSION.to_string()),
        ]
    }

    fn encode_input(&self, input: &TurnInput) -> Option<Value> {
        match input {
            TurnInput::User(text) => Some(json!({"role": "user", "content": text})),
            // All results of one reply travel in a single user message.
            TurnInput::ToolResults(results) => {
                let blocks: Vec<Value> = results
                    .iter()
                    .map(|result| {
                        json!({
                            "type": "tool_result",
                            "tool_use_id": result.call_id,
                            "content": result.output,
                            "is_error": result.is_error,
                        })
                    })
                    .collect();
                Some(json!({"role": "user", "content": blocks}))
            }
            TurnInput::Continue => None,
        }
    }

    fn build_body(
        &self,
        request: &SendRequest<'_>,
        history: Vec<Value>,
        tools: Vec<Value>,
        include_sampling: bool,
    ) -> Value {
        let mut body = json!({
            "model": request.model,
            "max_tokens": request.max_output_tokens,
            "messages": history,
            "system": request.instructions,
        });

        if include_sampling {
            body["temperature"] = json!(request.sampling.temperature);
            body["top_p"] = json!(request.sampling.top_p);
        }

        if !tools.is_empty() {
            body["tools"] = json!(tools);
        }

        body
    }

    /// `content[]` holds `text` and `tool_use` blocks. A `stop_reason` of
    /// `tool_use` is reported separately from the blocks themselves.
    fn parse_reply(&self, body: &Value) -> ParleyResult<ParsedReply> {
        let blocks = body["content"].as_array().ok_or_else(|| {
            ParleyError::protocol("Response has no content array", ProviderId::Anthropic.as_str())
        })?;

        let mut text = String::new();
        let mut tool_calls = Vec::new();

        for block in blocks {
            match block["type"].as_str() {
                Some("text") => text.push_str(block["text"].as_str().unwrap_or("")),
                Some("tool_use") => {
                    let arguments: Map<String, Value> =
                        block["input"].as_object().cloned().unwrap_or_default();
                    tool_calls.push(ToolCall::new(
                        block["id"].as_str().unwrap_or(""),
                        block["name"].as_str().unwrap_or(""),
                        arguments,
                    ));
                }
                _ => {}
            }
        }

        let stop_reason = body["stop_reason"].as_str().map(str::to_string);

        // The Messages API rejects assistant turns with empty content, so an
        // empty reply records nothing to replay.
        let native = if blocks.is_empty() {
            Value::Null
        } else {
            json!({"role": "assistant", "content": blocks})
        };

        Ok(ParsedReply {
            text,
            tool_calls,
            tool_use_signalled: stop_reason.as_deref() == Some("tool_use"),
            stop_reason,
            native,
        })
    }

    fn request_timeout(&self) -> Duration {
        self.options.request_timeout
    }
}
