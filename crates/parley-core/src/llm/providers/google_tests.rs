//! Tests for the Gemini adapter

#[cfg(test)]
mod tests {
    use crate::llm::messages::{Conversation, TurnInput};
    use crate::llm::model_capabilities::ModelFamilies;
    use crate::llm::provider_types::{ProviderId, SamplingParams};
    use crate::llm::providers::{GoogleAdapter, Provider, ProviderAdapter, ProviderOptions};
    use crate::test_support::{ScriptedTransport, send_request};
    use crate::tools::types::{ToolDescriptor, ToolResult};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn provider(transport: Arc<ScriptedTransport>) -> Provider {
        Provider::new(ProviderId::Google, ProviderOptions::default(), transport)
    }

    fn reply(parts: Value) -> Value {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": parts},
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_request_shape_and_query_key() {
        let transport = ScriptedTransport::ok(vec![reply(json!([{"text": "Hello"}]))]);
        let provider = provider(transport.clone());
        let conversation = Conversation::new();
        let sampling = SamplingParams::default();
        let tools = [ToolDescriptor::new("ping", "")];

        let result = provider
            .send(send_request("gemini-2.0-flash", &conversation, &tools, &sampling, TurnInput::user("hi")))
            .await
            .unwrap();
        assert!(result.finished);
        assert_eq!(result.text, "Hello");

        let request = &transport.requests()[0];
        assert_eq!(
            request.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=test-key"
        );
        assert!(request.header("authorization").is_none());

        let body = &request.body;
        assert_eq!(body["contents"], json!([{"role": "user", "parts": [{"text": "hi"}]}]));
        assert_eq!(body["systemInstruction"], json!({"parts": [{"text": "Be helpful."}]}));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert!(body["generationConfig"].get("temperature").is_some());
        assert!(body["generationConfig"].get("topP").is_some());
        assert_eq!(
            body["tools"],
            json!([{"functionDeclarations": [{
                "name": "ping",
                "description": "",
                "parameters": {"type": "object", "properties": {}}
            }]}])
        );
    }

    #[test]
    fn test_additional_properties_stripped_only_here() {
        let tool = ToolDescriptor::new("search", "Search").with_input_schema(json!({
            "type": "object",
            "properties": {
                "filter": {"type": "object", "additionalProperties": false, "properties": {}}
            },
            "additionalProperties": false
        }));

        let google = GoogleAdapter::new(ProviderOptions::default()).format_tools(&[tool.clone()]);
        let params = &google[0]["parameters"];
        assert!(params.get("additionalProperties").is_none());
        assert!(params["properties"]["filter"].get("additionalProperties").is_none());

        let anthropic = crate::llm::providers::AnthropicAdapter::new(ProviderOptions::default())
            .format_tools(&[tool]);
        assert_eq!(anthropic[0]["input_schema"]["additionalProperties"], false);
    }

    #[tokio::test]
    async fn test_function_calls_get_unique_synthesized_ids() {
        let transport = ScriptedTransport::ok(vec![reply(json!([
            {"text": "Looking up. "},
            {"functionCall": {"name": "get_post", "args": {"id": 1}}},
            {"functionCall": {"name": "get_post", "args": {"id": 2}}}
        ]))]);
        let provider = provider(transport);
        let conversation = Conversation::new();
        let sampling = SamplingParams::default();

        let result = provider
            .send(send_request("gemini-2.0-flash", &conversation, &[], &sampling, TurnInput::user("x")))
            .await
            .unwrap();

        assert!(!result.finished);
        assert_eq!(result.text, "Looking up. ");
        assert_eq!(result.tool_calls.len(), 2);
        assert_eq!(result.tool_calls[0].arguments["id"], 1);
        assert_eq!(result.tool_calls[1].arguments["id"], 2);
        assert!(result.tool_calls[0].id.starts_with("parley_call_"));
        assert_ne!(result.tool_calls[0].id, result.tool_calls[1].id);
    }

    #[tokio::test]
    async fn test_tool_results_become_function_responses() {
        let transport = ScriptedTransport::ok(vec![
            reply(json!([{"functionCall": {"name": "ping", "args": {}}}])),
            reply(json!([{"text": "pong"}])),
        ]);
        let provider = provider(transport.clone());
        let sampling = SamplingParams::default();
        let start = Conversation::new();

        let turn1 = provider
            .send(send_request("gemini-2.0-flash", &start, &[], &sampling, TurnInput::user("ping")))
            .await
            .unwrap();
        let call = &turn1.tool_calls[0];
        let results = vec![ToolResult::success(&call.id, &call.name, "pong")];
        let turn2 = provider
            .send(send_request(
                "gemini-2.0-flash",
                &turn1.conversation,
                &[],
                &sampling,
                TurnInput::ToolResults(results),
            ))
            .await
            .unwrap();
        assert_eq!(turn2.conversation.len(), 4);

        let contents = transport.body(1)["contents"].clone();
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(
            contents[2],
            json!({
                "role": "user",
                "parts": [{"functionResponse": {"name": "ping", "response": {"content": "pong"}}}]
            })
        );
    }

    #[tokio::test]
    async fn test_vendor_call_id_is_echoed_in_function_response() {
        let transport = ScriptedTransport::ok(vec![
            reply(json!([{"functionCall": {"id": "fc-42", "name": "ping", "args": {}}}])),
            reply(json!([{"text": "pong"}])),
        ]);
        let provider = provider(transport.clone());
        let sampling = SamplingParams::default();

        let turn1 = provider
            .send(send_request("gemini-2.5-flash", &Conversation::new(), &[], &sampling, TurnInput::user("ping")))
            .await
            .unwrap();
        assert_eq!(turn1.tool_calls[0].id, "fc-42");

        let results = vec![ToolResult::error("fc-42", "ping", "offline")];
        provider
            .send(send_request(
                "gemini-2.5-flash",
                &turn1.conversation,
                &[],
                &sampling,
                TurnInput::ToolResults(results),
            ))
            .await
            .unwrap();

        let response = transport.body(1)["contents"][2]["parts"][0]["functionResponse"].clone();
        assert_eq!(
            response,
            json!({"id": "fc-42", "name": "ping", "response": {"error": "offline"}})
        );
    }

    #[test]
    fn test_missing_candidates_is_protocol_error() {
        let adapter = GoogleAdapter::new(ProviderOptions::default());
        let err = adapter
            .parse_reply(&json!({"promptFeedback": {"blockReason": "SAFETY"}}))
            .unwrap_err();
        assert_eq!(err.error_code(), "PARLEY_PROTOCOL");
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_configured_reasoning_family_drops_sampling() {
        let options = ProviderOptions::default().with_families(
            ModelFamilies::default().with_reasoning_prefix(ProviderId::Google, "gemini-2.5-pro"),
        );
        let adapter = GoogleAdapter::new(options);
        assert!(!adapter.wants_sampling_params("gemini-2.5-pro"));
        assert!(adapter.wants_sampling_params("gemini-2.0-flash"));
    }
}
