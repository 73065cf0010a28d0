//! Tests for the Anthropic Messages adapter

#[cfg(test)]
mod tests {
    use crate::error::ParleyError;
    use crate::llm::messages::{Conversation, TurnInput};
    use crate::llm::provider_types::{ProviderId, SamplingParams};
    use crate::llm::providers::{AnthropicAdapter, Provider, ProviderAdapter, ProviderOptions};
    use crate::llm::transport::HttpResponse;
    use crate::test_support::{ScriptedTransport, send_request};
    use crate::tools::types::{ToolDescriptor, ToolResult};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn provider(transport: Arc<ScriptedTransport>) -> Provider {
        Provider::new(
            ProviderId::Anthropic,
            ProviderOptions::default().with_base_url("https://proxy.local/"),
            transport,
        )
    }

    fn reply(content: Value, stop_reason: &str) -> Value {
        json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4-20250514",
            "content": content,
            "stop_reason": stop_reason
        })
    }

    #[tokio::test]
    async fn test_request_shape_and_headers() {
        let transport = ScriptedTransport::ok(vec![reply(
            json!([{"type": "text", "text": "Hi there"}]),
            "end_turn",
        )]);
        let provider = provider(transport.clone());
        let conversation = Conversation::new();
        let sampling = SamplingParams::default().with_temperature(0.2);
        let tools = [ToolDescriptor::new("ping", "")];

        let result = provider
            .send(send_request(
                "claude-sonnet-4-20250514",
                &conversation,
                &tools,
                &sampling,
                TurnInput::user("hello"),
            ))
            .await
            .unwrap();
        assert!(result.finished);
        assert_eq!(result.text, "Hi there");
        assert_eq!(result.stop_reason.as_deref(), Some("end_turn"));

        let request = &transport.requests()[0];
        assert_eq!(request.url, "https://proxy.local/v1/messages");
        assert_eq!(request.header("x-api-key"), Some("test-key"));
        assert_eq!(request.header("anthropic-version"), Some("2023-06-01"));
        assert!(request.header("authorization").is_none());

        let body = &request.body;
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["system"], "Be helpful.");
        assert_eq!(body["messages"], json!([{"role": "user", "content": "hello"}]));
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(body["top_p"], 1.0);
        assert!(body.get("frequency_penalty").is_none());
        assert_eq!(
            body["tools"],
            json!([{
                "name": "ping",
                "description": "",
                "input_schema": {"type": "object", "properties": {}}
            }])
        );
    }

    #[tokio::test]
    async fn test_tool_use_blocks_in_order_with_text() {
        let transport = ScriptedTransport::ok(vec![reply(
            json!([
                {"type": "text", "text": "Let me look."},
                {"type": "tool_use", "id": "toolu_1", "name": "get_post", "input": {"id": 3}},
                {"type": "tool_use", "id": "toolu_2", "name": "get_post", "input": {"id": 4}}
            ]),
            "tool_use",
        )]);
        let provider = provider(transport);
        let conversation = Conversation::new();
        let sampling = SamplingParams::default();

        let result = provider
            .send(send_request("claude-3-5-haiku", &conversation, &[], &sampling, TurnInput::user("x")))
            .await
            .unwrap();

        assert!(!result.finished);
        assert_eq!(result.text, "Let me look.");
        let ids: Vec<_> = result.tool_calls.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["toolu_1", "toolu_2"]);
        assert_eq!(result.tool_calls[1].arguments["id"], 4);
    }

    #[test]
    fn test_stop_reason_alone_keeps_turn_open() {
        let adapter = AnthropicAdapter::new(ProviderOptions::default());
        let parsed = adapter.parse_reply(&reply(json!([]), "tool_use")).unwrap();
        assert!(parsed.tool_calls.is_empty());
        assert!(parsed.tool_use_signalled);
        assert!(!parsed.is_finished());
    }

    #[test]
    fn test_tool_use_block_without_stop_reason_keeps_turn_open() {
        let adapter = AnthropicAdapter::new(ProviderOptions::default());
        let parsed = adapter
            .parse_reply(&reply(
                json!([{"type": "tool_use", "id": "toolu_9", "name": "ping", "input": {}}]),
                "end_turn",
            ))
            .unwrap();
        assert!(!parsed.is_finished());
    }

    #[tokio::test]
    async fn test_empty_reply_is_not_replayed() {
        let transport = ScriptedTransport::ok(vec![
            reply(json!([]), "end_turn"),
            reply(json!([{"type": "text", "text": "Still here."}]), "end_turn"),
        ]);
        let provider = provider(transport.clone());
        let sampling = SamplingParams::default();

        let first = provider
            .send(send_request(
                "claude-sonnet-4-20250514",
                &Conversation::new(),
                &[],
                &sampling,
                TurnInput::user("hi"),
            ))
            .await
            .unwrap();
        assert!(first.finished);
        assert_eq!(first.conversation.len(), 2);
        assert_eq!(first.conversation.last().unwrap().native, Value::Null);

        provider
            .send(send_request(
                "claude-sonnet-4-20250514",
                &first.conversation,
                &[],
                &sampling,
                TurnInput::user("again"),
            ))
            .await
            .unwrap();
        assert_eq!(
            transport.body(1)["messages"],
            json!([
                {"role": "user", "content": "hi"},
                {"role": "user", "content": "again"}
            ])
        );
    }

    #[tokio::test]
    async fn test_batched_results_share_one_user_message() {
        let first = reply(
            json!([
                {"type": "tool_use", "id": "toolu_1", "name": "a", "input": {}},
                {"type": "tool_use", "id": "toolu_2", "name": "b", "input": {}}
            ]),
            "tool_use",
        );
        let second = reply(json!([{"type": "text", "text": "Both done."}]), "end_turn");
        let transport = ScriptedTransport::ok(vec![first, second]);
        let provider = provider(transport.clone());
        let sampling = SamplingParams::default();
        let start = Conversation::new();

        let turn1 = provider
            .send(send_request("claude-3-5-haiku", &start, &[], &sampling, TurnInput::user("go")))
            .await
            .unwrap();
        let results = vec![
            ToolResult::success("toolu_1", "a", "A"),
            ToolResult::error("toolu_2", "b", "not found"),
        ];
        let turn2 = provider
            .send(send_request(
                "claude-3-5-haiku",
                &turn1.conversation,
                &[],
                &sampling,
                TurnInput::ToolResults(results),
            ))
            .await
            .unwrap();
        assert_eq!(turn2.conversation.len(), 4);

        let messages = transport.body(1)["messages"].clone();
        assert_eq!(messages.as_array().unwrap().len(), 3);
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[1]["content"][0]["id"], "toolu_1");
        assert_eq!(
            messages[2],
            json!({
                "role": "user",
                "content": [
                    {"type": "tool_result", "tool_use_id": "toolu_1", "content": "A", "is_error": false},
                    {"type": "tool_result", "tool_use_id": "toolu_2", "content": "not found", "is_error": true}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_error_without_message_uses_status() {
        let transport = ScriptedTransport::new(vec![Ok(HttpResponse {
            status: 529,
            body: Value::Null,
        })]);
        let provider = provider(transport);
        let conversation = Conversation::new();
        let sampling = SamplingParams::default();

        let err = provider
            .send(send_request("claude-3-5-haiku", &conversation, &[], &sampling, TurnInput::user("x")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: 529");
        assert!(matches!(err, ParleyError::Api { status: 529, .. }));
    }

    #[tokio::test]
    async fn test_foreign_conversation_is_rejected() {
        let openai = Provider::new(
            ProviderId::OpenAi,
            ProviderOptions::default(),
            ScriptedTransport::ok(vec![json!({"output": []})]),
        );
        let sampling = SamplingParams::default();
        let start = Conversation::new();
        let recorded = openai
            .send(send_request("gpt-4o", &start, &[], &sampling, TurnInput::user("x")))
            .await
            .unwrap()
            .conversation;

        let transport = ScriptedTransport::ok(vec![]);
        let err = provider(transport.clone())
            .send(send_request("claude-3-5-haiku", &recorded, &[], &sampling, TurnInput::user("y")))
            .await
            .unwrap_err();
        assert!(matches!(err, ParleyError::ProviderMismatch { .. }));
        assert!(transport.requests().is_empty());
    }
}
