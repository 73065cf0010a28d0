//! Turn state machine
//!
//! ```text
//! AwaitingModel ──reply──▶ ModelResponded ──no calls──▶ Finished
//!       ▲                        │
//!       │                   tool calls
//!       │                        ▼
//!       └──── results ────── PendingTool ──ask──▶ (suspended, AwaitingApproval)
//! ```
//!
//! All calls from one reply are resolved in order, one at a time, and their
//! results go back together in the next request.

use crate::error::{ParleyError, ParleyResult};
use crate::llm::messages::{Conversation, TurnInput};
use crate::llm::prompt::SystemPrompt;
use crate::llm::provider_types::SamplingParams;
use crate::llm::providers::{Provider, SendRequest};
use crate::tools::permission::{
    ApprovalDecision, DENIED_BY_USER, Permission, PermissionPolicy, denial_result,
};
use crate::tools::registry::{ToolExecutor, ToolRegistry};
use crate::tools::types::{ToolCall, ToolDescriptor, ToolResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use super::outcome::{PendingApproval, TurnOutcome};

/// Default ceiling on tool invocations in a single turn
pub const DEFAULT_MAX_TOOL_INVOCATIONS: usize = 10;

/// Per-session model settings
#[derive(Debug, Clone)]
pub struct TurnSettings {
    pub api_key: String,
    pub model: String,
    pub system_prompt: SystemPrompt,
    pub sampling: SamplingParams,
    pub max_output_tokens: u32,
    pub max_tool_invocations: usize,
}

impl TurnSettings {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            system_prompt: SystemPrompt::default(),
            sampling: SamplingParams::default(),
            max_output_tokens: 4096,
            max_tool_invocations: DEFAULT_MAX_TOOL_INVOCATIONS,
        }
    }

    pub fn with_system_prompt(mut self, prompt: SystemPrompt) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_max_tool_invocations(mut self, max: usize) -> Self {
        self.max_tool_invocations = max;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }
}

enum Phase {
    AwaitingModel(TurnInput),
    PendingTool { calls: Vec<ToolCall>, text: String },
    Finished(String),
}

/// Runs turns against one provider with injected tool collaborators
pub struct TurnController {
    provider: Provider,
    settings: TurnSettings,
    registry: Arc<dyn ToolRegistry>,
    executor: Arc<dyn ToolExecutor>,
    policy: Arc<dyn PermissionPolicy>,
}

impl TurnController {
    pub fn new(
        provider: Provider,
        settings: TurnSettings,
        registry: Arc<dyn ToolRegistry>,
        executor: Arc<dyn ToolExecutor>,
        policy: Arc<dyn PermissionPolicy>,
    ) -> Self {
        Self {
            provider,
            settings,
            registry,
            executor,
            policy,
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn settings(&self) -> &TurnSettings {
        &self.settings
    }

    /// Run a turn for `user_text`
    ///
    /// `conversation` is replaced by each successful model exchange and is
    /// never touched by a failed one. On a tool-limit error it still holds
    /// every entry recorded before the limit was hit.
    #[instrument(skip_all, fields(provider = %self.provider.id(), model = %self.settings.model))]
    pub async fn run_turn(
        &self,
        conversation: &mut Conversation,
        user_text: impl Into<String>,
    ) -> ParleyResult<TurnOutcome> {
        let catalog = self.registry.list_tools();
        let input = TurnInput::user(user_text);
        self.drive(conversation, &catalog, Phase::AwaitingModel(input), 0)
            .await
    }

    /// Continue a suspended turn with the user's decisions
    #[instrument(skip_all, fields(provider = %self.provider.id(), pending = pending.calls.len()))]
    pub async fn resume(
        &self,
        conversation: &mut Conversation,
        pending: PendingApproval,
        decisions: &[ApprovalDecision],
    ) -> ParleyResult<TurnOutcome> {
        if conversation.len() != pending.conversation_len {
            return Err(ParleyError::invalid_input(
                "Conversation changed since the approval was requested",
            ));
        }

        let decisions: HashMap<&str, bool> = decisions
            .iter()
            .map(|d| (d.call_id.as_str(), d.approved))
            .collect();
        for id in &pending.needs_approval {
            if !decisions.contains_key(id.as_str()) {
                return Err(ParleyError::invalid_input(format!(
                    "No decision supplied for tool call '{}'",
                    id
                )));
            }
        }

        let mut invocations = pending.tool_invocations;
        let results = self
            .resolve(&pending.calls, &decisions, &mut invocations)
            .await?;
        self.drive(
            conversation,
            &pending.tools,
            Phase::AwaitingModel(TurnInput::ToolResults(results)),
            invocations,
        )
        .await
    }

    async fn drive(
        &self,
        conversation: &mut Conversation,
        catalog: &[ToolDescriptor],
        mut phase: Phase,
        mut invocations: usize,
    ) -> ParleyResult<TurnOutcome> {
        let instructions = self.settings.system_prompt.compose();

        loop {
            phase = match phase {
                Phase::AwaitingModel(input) => {
                    let request = SendRequest {
                        api_key: &self.settings.api_key,
                        model: &self.settings.model,
                        input,
                        conversation: &*conversation,
                        tools: catalog,
                        instructions: &instructions,
                        sampling: &self.settings.sampling,
                        max_output_tokens: self.settings.max_output_tokens,
                    };
                    let result = self.provider.send(request).await?;
                    *conversation = result.conversation;

                    if result.finished {
                        Phase::Finished(result.text)
                    } else if result.tool_calls.is_empty() {
                        return Err(ParleyError::protocol(
                            "Model signalled a tool call without any call",
                            self.provider.id().as_str(),
                        ));
                    } else {
                        Phase::PendingTool {
                            calls: result.tool_calls,
                            text: result.text,
                        }
                    }
                }
                Phase::PendingTool { calls, text } => {
                    self.ensure_budget(invocations, calls.len())?;

                    let needs_approval: Vec<String> = calls
                        .iter()
                        .filter(|call| self.policy.check(call) == Permission::Ask)
                        .map(|call| call.id.clone())
                        .collect();
                    if !needs_approval.is_empty() {
                        tracing::info!(count = needs_approval.len(), "tool calls awaiting approval");
                        return Ok(TurnOutcome::AwaitingApproval(PendingApproval {
                            calls,
                            needs_approval,
                            text,
                            tool_invocations: invocations,
                            conversation_len: conversation.len(),
                            tools: catalog.to_vec(),
                        }));
                    }

                    let results = self.resolve(&calls, &HashMap::new(), &mut invocations).await?;
                    Phase::AwaitingModel(TurnInput::ToolResults(results))
                }
                Phase::Finished(text) => {
                    tracing::info!(tool_invocations = invocations, "turn finished");
                    return Ok(TurnOutcome::Finished {
                        text,
                        tool_invocations: invocations,
                    });
                }
            };
        }
    }

    /// Resolve calls in order; every call counts against the limit,
    /// executed or not.
    async fn resolve(
        &self,
        calls: &[ToolCall],
        decisions: &HashMap<&str, bool>,
        invocations: &mut usize,
    ) -> ParleyResult<Vec<ToolResult>> {
        self.ensure_budget(*invocations, calls.len())?;
        let mut results = Vec::with_capacity(calls.len());

        for call in calls {
            *invocations += 1;

            let result = match self.policy.check(call) {
                Permission::Allow => self.execute(call).await,
                Permission::Ask => match decisions.get(call.id.as_str()) {
                    Some(true) => self.execute(call).await,
                    _ => {
                        tracing::warn!(tool = %call.name, "tool call denied by user");
                        denial_result(call, DENIED_BY_USER)
                    }
                },
                Permission::Deny { reason } => {
                    tracing::warn!(tool = %call.name, "tool call denied by policy");
                    denial_result(call, &reason)
                }
            };
            results.push(result);
        }

        Ok(results)
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        tracing::debug!(tool = %call.name, call_id = %call.id, "dispatching tool call");
        let dispatched = self.executor.dispatch(&call.name, &call.arguments).await;
        let result = ToolResult::from_dispatch(call, dispatched);
        if result.is_error {
            tracing::warn!(tool = %call.name, error = %result.output, "tool reported a failure");
        }
        result
    }

    /// A reply's calls run all together or not at all, so every executed
    /// call has its result recorded.
    fn ensure_budget(&self, spent: usize, requested: usize) -> ParleyResult<()> {
        let limit = self.settings.max_tool_invocations;
        if spent + requested <= limit {
            return Ok(());
        }
        tracing::warn!(limit, spent, requested, "tool invocation limit reached");
        Err(ParleyError::ToolLimitExceeded { limit })
    }
}
