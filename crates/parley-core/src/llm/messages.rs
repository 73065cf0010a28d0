//! Provider-neutral conversation log
//!
//! Each entry keeps two views of the same turn: the neutral [`EntryContent`]
//! callers can render, and the vendor's own wire encoding that the recording
//! adapter replays verbatim on the next request. The log only ever grows.

use crate::error::{ParleyError, ParleyResult};
use crate::llm::provider_types::ProviderId;
use crate::tools::types::{ToolCall, ToolResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Neutral meaning of one conversation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryContent {
    User {
        text: String,
    },
    Assistant {
        text: String,
        #[serde(default)]
        tool_calls: Vec<ToolCall>,
    },
    ToolResults {
        results: Vec<ToolResult>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Adapter that produced `native`
    pub provider: ProviderId,
    pub content: EntryContent,
    /// Vendor wire encoding: one message object, or an array of input items
    pub native: Value,
}

impl ConversationEntry {
    pub fn new(provider: ProviderId, content: EntryContent, native: Value) -> Self {
        Self {
            provider,
            content,
            native,
        }
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self.content, EntryContent::Assistant { .. })
    }

    /// Append this entry's wire items to a vendor history list
    pub fn extend_native(&self, history: &mut Vec<Value>) {
        match &self.native {
            Value::Array(items) => history.extend(items.iter().cloned()),
            Value::Null => {}
            other => history.push(other.clone()),
        }
    }
}

/// Ordered, append-only log for one chat session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    /// Provider that recorded this conversation, if any entry exists
    pub fn provider(&self) -> Option<ProviderId> {
        self.entries.first().map(|e| e.provider)
    }

    /// Reject a conversation containing entries from another provider
    pub fn ensure_provider(&self, provider: ProviderId) -> ParleyResult<()> {
        match self.entries.iter().find(|e| e.provider != provider) {
            Some(foreign) => Err(ParleyError::ProviderMismatch {
                recorded: foreign.provider.to_string(),
                requested: provider.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Wire history for the recording adapter
    pub fn native_history(&self) -> Vec<Value> {
        let mut history = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            entry.extend_native(&mut history);
        }
        history
    }

    /// A new log with `entries` added after the existing ones
    pub fn appended(&self, entries: impl IntoIterator<Item = ConversationEntry>) -> Self {
        let mut next = self.clone();
        next.entries.extend(entries);
        next
    }
}

/// The single new input a request adds to the conversation
#[derive(Debug, Clone, PartialEq)]
pub enum TurnInput {
    User(String),
    ToolResults(Vec<ToolResult>),
    /// Resend the accumulated history without adding anything
    Continue,
}

impl TurnInput {
    /// Pending tool results win over user text; empty text adds nothing
    pub fn from_parts(new_user_text: Option<String>, pending_tool_results: Vec<ToolResult>) -> Self {
        if !pending_tool_results.is_empty() {
            return Self::ToolResults(pending_tool_results);
        }
        match new_user_text {
            Some(text) if !text.is_empty() => Self::User(text),
            _ => Self::Continue,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::from_parts(Some(text.into()), Vec::new())
    }

    /// Neutral content of the entry this input becomes
    pub fn content(&self) -> Option<EntryContent> {
        match self {
            Self::User(text) => Some(EntryContent::User { text: text.clone() }),
            Self::ToolResults(results) => Some(EntryContent::ToolResults {
                results: results.clone(),
            }),
            Self::Continue => None,
        }
    }
}
