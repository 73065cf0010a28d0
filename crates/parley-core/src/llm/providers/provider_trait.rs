//! Adapter trait and the provider enum that dispatches to it

use crate::error::ParleyResult;
use crate::llm::messages::{Conversation, TurnInput};
use crate::llm::model_capabilities::ModelFamilies;
use crate::llm::provider_types::{ProviderId, SamplingParams};
use crate::llm::transport::{DEFAULT_REQUEST_TIMEOUT, Transport};
use crate::tools::types::{ToolCall, ToolDescriptor};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::{AnthropicAdapter, GoogleAdapter, OpenAiAdapter};

/// Everything one model request needs
#[derive(Debug, Clone)]
pub struct SendRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub input: TurnInput,
    pub conversation: &'a Conversation,
    pub tools: &'a [ToolDescriptor],
    /// Composed system prompt
    pub instructions: &'a str,
    pub sampling: &'a SamplingParams,
    pub max_output_tokens: u32,
}

/// Outcome of one adapter call
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    /// Previous conversation plus the input entry plus the reply entry
    pub conversation: Conversation,
    pub finished: bool,
    /// Vendor stop / finish reason, when reported
    pub stop_reason: Option<String>,
}

/// A vendor reply reduced to what the turn loop needs
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    /// Vendor stop reason demands a tool call, independent of `tool_calls`
    pub tool_use_signalled: bool,
    pub stop_reason: Option<String>,
    /// Assistant turn in the vendor's wire shape
    pub native: Value,
}

impl ParsedReply {
    pub fn is_finished(&self) -> bool {
        self.tool_calls.is_empty() && !self.tool_use_signalled
    }
}

/// Vendor-specific wire shapes
///
/// The request/response flow around these pieces is shared and lives in
/// [`super::base`].
pub trait ProviderAdapter: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Whether `model` may receive temperature / top_p / penalties
    fn wants_sampling_params(&self, model: &str) -> bool;

    /// Tool declarations in the vendor's shape
    fn format_tools(&self, tools: &[ToolDescriptor]) -> Vec<Value>;

    fn endpoint(&self, model: &str, api_key: &str) -> ParleyResult<String>;

    fn auth_headers(&self, api_key: &str) -> Vec<(String, String)>;

    /// Wire encoding of a new input entry. `None` for [`TurnInput::Continue`].
    fn encode_input(&self, input: &TurnInput) -> Option<Value>;

    fn build_body(
        &self,
        request: &SendRequest<'_>,
        history: Vec<Value>,
        tools: Vec<Value>,
        include_sampling: bool,
    ) -> Value;

    fn parse_reply(&self, body: &Value) -> ParleyResult<ParsedReply>;

    fn request_timeout(&self) -> Duration {
        DEFAULT_REQUEST_TIMEOUT
    }
}

/// Per-adapter settings
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    /// Overrides the vendor's public endpoint, e.g. for proxies or tests
    pub base_url: Option<String>,
    pub families: ModelFamilies,
    pub request_timeout: Duration,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            families: ModelFamilies::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ProviderOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_families(mut self, families: ModelFamilies) -> Self {
        self.families = families;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub(crate) fn base_url_for(&self, provider: ProviderId) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(provider.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }
}

enum Adapter {
    OpenAi(OpenAiAdapter),
    Anthropic(AnthropicAdapter),
    Google(GoogleAdapter),
}

/// A configured adapter bound to a transport
pub struct Provider {
    adapter: Adapter,
    transport: Arc<dyn Transport>,
}

impl Provider {
    pub fn new(id: ProviderId, options: ProviderOptions, transport: Arc<dyn Transport>) -> Self {
        let adapter = match id {
            ProviderId::OpenAi => Adapter::OpenAi(OpenAiAdapter::new(options)),
            ProviderId::Anthropic => Adapter::Anthropic(AnthropicAdapter::new(options)),
            ProviderId::Google => Adapter::Google(GoogleAdapter::new(options)),
        };
        Self { adapter, transport }
    }

    fn adapter(&self) -> &dyn ProviderAdapter {
        match &self.adapter {
            Adapter::OpenAi(a) => a,
            Adapter::Anthropic(a) => a,
            Adapter::Google(a) => a,
        }
    }

    pub fn id(&self) -> ProviderId {
        self.adapter().id()
    }

    pub fn wants_sampling_params(&self, model: &str) -> bool {
        self.adapter().wants_sampling_params(model)
    }

    pub fn format_tools(&self, tools: &[ToolDescriptor]) -> Vec<Value> {
        self.adapter().format_tools(tools)
    }

    /// Send one request and fold the reply into a new conversation
    pub async fn send(&self, request: SendRequest<'_>) -> ParleyResult<TurnResult> {
        super::base::send(self.adapter(), self.transport.as_ref(), request).await
    }
}
