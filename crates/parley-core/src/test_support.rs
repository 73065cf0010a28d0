//! Shared fixtures for unit tests

use crate::error::{ParleyError, ParleyResult};
use crate::llm::messages::{Conversation, TurnInput};
use crate::llm::provider_types::SamplingParams;
use crate::llm::providers::SendRequest;
use crate::llm::transport::{HttpRequest, HttpResponse, Transport};
use crate::tools::registry::ToolExecutor;
use crate::tools::types::{DispatchResult, ToolDescriptor};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses in order and records every request
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<ParleyResult<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(replies: Vec<ParleyResult<HttpResponse>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn ok(bodies: Vec<Value>) -> Arc<Self> {
        Self::new(bodies.into_iter().map(|b| Ok(HttpResponse::ok(b))).collect())
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn body(&self, index: usize) -> Value {
        self.requests()[index].body.clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, request: HttpRequest) -> ParleyResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ParleyError::transport("no scripted reply left")))
    }
}

/// Executor answering from a fixed table and recording calls
pub(crate) struct TableExecutor {
    answers: Vec<(String, DispatchResult)>,
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl TableExecutor {
    pub(crate) fn new(answers: Vec<(&str, DispatchResult)>) -> Arc<Self> {
        Arc::new(Self {
            answers: answers
                .into_iter()
                .map(|(name, result)| (name.to_string(), result))
                .collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn called(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[async_trait]
impl ToolExecutor for TableExecutor {
    async fn dispatch(&self, tool_name: &str, arguments: &Map<String, Value>) -> DispatchResult {
        self.calls
            .lock()
            .unwrap()
            .push((tool_name.to_string(), arguments.clone()));
        self.answers
            .iter()
            .find(|(name, _)| name == tool_name)
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| DispatchResult::failure(format!("Unknown tool: {}", tool_name)))
    }
}

pub(crate) fn send_request<'a>(
    model: &'a str,
    conversation: &'a Conversation,
    tools: &'a [ToolDescriptor],
    sampling: &'a SamplingParams,
    input: TurnInput,
) -> SendRequest<'a> {
    SendRequest {
        api_key: "test-key",
        model,
        input,
        conversation,
        tools,
        instructions: "Be helpful.",
        sampling,
        max_output_tokens: 1024,
    }
}
