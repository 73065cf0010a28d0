//! What a turn hands back to its caller

use crate::tools::types::{ToolCall, ToolDescriptor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The model replied with no pending tool calls
    Finished {
        text: String,
        /// Tool calls resolved during this turn
        tool_invocations: usize,
    },
    /// At least one call needs the user's decision before the turn can go on
    AwaitingApproval(PendingApproval),
}

impl TurnOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Finished { text, .. } => Some(text),
            Self::AwaitingApproval(_) => None,
        }
    }
}

/// A suspended turn
///
/// Serializable so a host can park it between two requests and feed it
/// back to [`TurnController::resume`](super::TurnController::resume).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    /// Every call from the model's reply, in the order it returned them
    pub calls: Vec<ToolCall>,
    /// Ids of the calls that need a decision
    pub needs_approval: Vec<String>,
    /// Text the model sent alongside the calls
    pub text: String,
    /// Invocations already spent in this turn
    pub tool_invocations: usize,
    /// Conversation length when the turn was suspended
    pub conversation_len: usize,
    /// Tool catalog listed at the start of the turn
    pub tools: Vec<ToolDescriptor>,
}

impl PendingApproval {
    pub fn calls_needing_approval(&self) -> impl Iterator<Item = &ToolCall> {
        self.calls
            .iter()
            .filter(|call| self.needs_approval.contains(&call.id))
    }
}
