//! OpenAI Responses API adapter
//!
//! History is a flat list of input items. A reply's `output[]` items
//! (messages, function calls, reasoning) are replayed verbatim, and tool
//! results go back as `function_call_output` items keyed by `call_id`.

use crate::error::{ParleyError, ParleyResult};
use crate::llm::messages::TurnInput;
use crate::llm::provider_types::ProviderId;
use crate::tools::schema::normalize;
use crate::tools::types::{ToolCall, ToolDescriptor};
use serde_json::{Map, Value, json};
use std::time::Duration;

use super::provider_trait::{ParsedReply, ProviderAdapter, ProviderOptions, SendRequest};

pub struct OpenAiAdapter {
    options: ProviderOptions,
}

impl OpenAiAdapter {
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }
}

impl ProviderAdapter for OpenAiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn wants_sampling_params(&self, model: &str) -> bool {
        self.options.families.accepts_sampling(ProviderId::OpenAi, model)
    }

    fn format_tools(&self, tools: &[ToolDescriptor]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": normalize(tool).into_value(),
                })
            })
            .collect()
    }

    fn endpoint(&self, _model: &str, _api_key: &str) -> ParleyResult<String> {
        Ok(format!("{}/v1/responses", self.options.base_url_for(ProviderId::OpenAi)))
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(String, String)> {
        vec![("Authorization".to_string(), format!("Bearer {}", api_key))]
    }

    fn encode_input(&self, input: &TurnInput) -> Option<Value> {
        match input {
            TurnInput::User(text) => Some(json!([{"role": "user", "content": text}])),
            TurnInput::ToolResults(results) => Some(Value::Array(
                results
                    .iter()
                    .map(|result| {
                        json!({
                            "type": "function_call_output",
                            "call_id": result.call_id,
                            "output": result.output,
                        })
                    })
                    .collect(),
            )),
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
            "input": history,
            "instructions": request.instructions,
            "max_output_tokens": request.max_output_tokens,
        });

        if include_sampling {
            body["temperature"] = json!(request.sampling.temperature);
            body["top_p"] = json!(request.sampling.top_p);
            body["frequency_penalty"] = json!(request.sampling.frequency_penalty);
            body["presence_penalty"] = json!(request.sampling.presence_penalty);
        }

        if !tools.is_empty() {
            body["tools"] = json!(tools);
        }

        body
    }

    fn parse_reply(&self, body: &Value) -> ParleyResult<ParsedReply> {
        let output = body["output"].as_array().ok_or_else(|| {
            ParleyError::protocol("Response has no output array", ProviderId::OpenAi.as_str())
        })?;

        let mut text = String::new();
        let mut tool_calls = Vec::new();

        for item in output {
            match item["type"].as_str() {
                Some("message") => {
                    if let Some(parts) = item["content"].as_array() {
                        for part in parts {
                            match part["type"].as_str() {
                                Some("output_text") | Some("text") => {
                                    text.push_str(part["text"].as_str().unwrap_or(""));
                                }
                                Some("refusal") => {
                                    text.push_str(part["refusal"].as_str().unwrap_or(""));
                                }
                                _ => {}
                            }
                        }
                    }
                }
                Some("function_call") => tool_calls.push(parse_function_call(item)),
                _ => {
                    // reasoning and other items are only replayed
                }
            }
        }

        Ok(ParsedReply {
            text,
            tool_calls,
            tool_use_signalled: false,
            stop_reason: body["status"].as_str().map(str::to_string),
            native: Value::Array(output.clone()),
        })
    }

    fn request_timeout(&self) -> Duration {
        self.options.request_timeout
    }
}

fn parse_function_call(item: &Value) -> ToolCall {
    let name = item["name"].as_str().unwrap_or("");
    let id = item["call_id"]
        .as_str()
        .or_else(|| item["id"].as_str())
        .unwrap_or("");
    ToolCall::new(id, name, decode_arguments(name, &item["arguments"]))
}

// Arguments arrive as a JSON-encoded string.
fn decode_arguments(tool_name: &str, raw: &Value) -> Map<String, Value> {
    match raw {
        Value::Object(map) => map.clone(),
        Value::String(encoded) if encoded.trim().is_empty() => Map::new(),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Object(map)) => map,
            _ => {
                tracing::warn!(
                    tool = tool_name,
                    "function_call arguments are not a JSON object; using empty arguments"
                );
                Map::new()
            }
        },
        _ => Map::new(),
    }
}
