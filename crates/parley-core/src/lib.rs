//! # Parley Core
//!
//! Provider-neutral chat turns with tool calling.
//!
//! A [`TurnController`] sends the user's message to one of the supported vendors
//! (OpenAI Responses, Anthropic Messages, Google Gemini), runs the tools the
//! model asks for through host-supplied collaborators, and keeps going until
//! the model answers with plain text or the per-turn tool limit is reached.
//! The [`Conversation`] it maintains stores every exchange in the vendor's own
//! wire format so it can be replayed verbatim on the next turn.

pub mod config;
pub mod error;
pub mod llm;
pub mod tools;
pub mod turn;

#[cfg(test)]
mod test_support;

pub use config::{ParleyConfig, ProviderSettings, load_config};
pub use error::{ParleyError, ParleyResult};
pub use llm::{
    Conversation, ConversationEntry, EntryContent, ProviderId, SamplingParams, SystemPrompt,
    TurnInput,
};
pub use llm::{Provider, ProviderOptions, ReqwestTransport, Transport};
pub use tools::{
    ApprovalDecision, DispatchResult, PermissionMode, PermissionSettings, ToolCall,
    ToolDescriptor, ToolExecutor, ToolRegistry, ToolResult,
};
pub use turn::{PendingApproval, TurnController, TurnOutcome, TurnSettings};
