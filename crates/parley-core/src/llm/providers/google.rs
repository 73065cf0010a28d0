//! Google Gemini generateContent adapter
//!
//! Older Gemini models assign no identifiers to function calls, so such a
//! call gets a locally generated `parley_call_<uuid>` token. Results are
//! matched back by function name inside a `functionResponse` part, and echo
//! the call id only when Gemini supplied it.

use crate::error::{ParleyError, ParleyResult};
use crate::llm::messages::TurnInput;
use crate::llm::provider_types::ProviderId;
use crate::tools::schema::normalize;
use crate::tools::types::{ToolCall, ToolDescriptor};
use serde_json::{Map, Value, json};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use super::provider_trait::{ParsedReply, ProviderAdapter, ProviderOptions, SendRequest};

/// Marks call ids generated locally rather than by Gemini
const SYNTHESIZED_ID_PREFIX: &str = "parley_call_";

/// Schema keys Gemini refuses in function declarations
const UNSUPPORTED_SCHEMA_KEYS: &[&str] = &["additionalProperties"];

pub struct GoogleAdapter {
    options: ProviderOptions,
}

impl GoogleAdapter {
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }
}

impl ProviderAdapter for GoogleAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Google
    }

    fn wants_sampling_params(&self, model: &str) -> bool {
        self.options.families.accepts_sampling(ProviderId::Google, model)
    }

    fn format_tools(&self, tools: &[ToolDescriptor]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                let mut parameters = normalize(tool).into_value();
                strip_unsupported_keys(&mut parameters);
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": parameters,
                })
            })
            .collect()
    }

    fn endpoint(&self, model: &str, api_key: &str) -> ParleyResult<String> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            self.options.base_url_for(ProviderId::Google),
            model
        );
        let mut url = Url::parse(&raw).map_err(|e| {
            ParleyError::config_with_context(
                format!("Invalid Google endpoint: {}", e),
                format!("model '{}'", model),
            )
        })?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url.to_string())
    }

    fn auth_headers(&self, _api_key: &str) -> Vec<(String, String)> {
        Vec::new()
    }

    fn encode_input(&self, input: &TurnInput) -> Option<Value> {
        match input {
            TurnInput::User(text) => Some(json!({"role": "user", "parts": [{"text": text}]})),
            TurnInput::ToolResults(results) => {
                let parts: Vec<Value> = results
                    .iter()
                    .map(|result| {
                        let response = if result.is_error {
                            json!({"error": result.output})
                        } else {
                            json!({"content": result.output})
                        };
                        let mut function_response = json!({
                            "name": result.tool_name,
                            "response": response,
                        });
                        if !is_synthesized(&result.call_id) {
                            function_response["id"] = json!(result.call_id);
                        }
                        json!({"functionResponse": function_response})
                    })
                    .collect();
                Some(json!({"role": "user", "parts": parts}))
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
        let mut generation_config = json!({"maxOutputTokens": request.max_output_tokens});
        if include_sampling {
            generation_config["temperature"] = json!(request.sampling.temperature);
            generation_config["topP"] = json!(request.sampling.top_p);
        }

        let mut body = json!({
            "contents": history,
            "systemInstruction": {"parts": [{"text": request.instructions}]},
            "generationConfig": generation_config,
        });

        if !tools.is_empty() {
            body["tools"] = json!([{"functionDeclarations": tools}]);
        }

        body
    }

    fn parse_reply(&self, body: &Value) -> ParleyResult<ParsedReply> {
        let candidate = body["candidates"]
            .as_array()
            .and_then(|candidates| candidates.first())
            .ok_or_else(|| {
                let reason = body["promptFeedback"]["blockReason"]
                    .as_str()
                    .map(|r| format!(" (blocked: {})", r))
                    .unwrap_or_default();
                ParleyError::protocol(
                    format!("No candidates in Google response{}", reason),
                    ProviderId::Google.as_str(),
                )
            })?;

        let parts: Vec<Value> = candidate["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut text = String::new();
        let mut tool_calls = Vec::new();

        for part in &parts {
            if let Some(call) = part.get("functionCall") {
                let name = call["name"].as_str().unwrap_or("");
                let arguments: Map<String, Value> =
                    call["args"].as_object().cloned().unwrap_or_default();
                let id = call["id"]
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(synthesize_call_id);
                tool_calls.push(ToolCall::new(id, name.to_string(), arguments));
            } else if part["thought"].as_bool() != Some(true) {
                if let Some(segment) = part["text"].as_str() {
                    text.push_str(segment);
                }
            }
        }

        // Gemini rejects model turns with no parts when they are replayed.
        let native_parts = if parts.is_empty() {
            vec![json!({"text": ""})]
        } else {
            parts
        };

        Ok(ParsedReply {
            text,
            tool_calls,
            tool_use_signalled: false,
            stop_reason: candidate["finishReason"].as_str().map(str::to_string),
            native: json!({"role": "model", "parts": native_parts}),
        })
    }

    fn request_timeout(&self) -> Duration {
        self.options.request_timeout
    }
}

fn synthesize_call_id() -> String {
    format!("{}{}", SYNTHESIZED_ID_PREFIX, Uuid::new_v4().simple())
}

fn is_synthesized(call_id: &str) -> bool {
    call_id.is_empty() || call_id.starts_with(SYNTHESIZED_ID_PREFIX)
}

fn strip_unsupported_keys(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            for key in UNSUPPORTED_SCHEMA_KEYS {
                map.remove(*key);
            }
            for value in map.values_mut() {
                strip_unsupported_keys(value);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_unsupported_keys),
        _ => {}
    }
}
