//! Conversation log, transport and vendor adapters

pub mod messages;
pub mod model_capabilities;
pub mod prompt;
pub mod provider_types;
pub mod providers;
pub mod transport;

pub use messages::{Conversation, ConversationEntry, EntryContent, TurnInput};
pub use model_capabilities::ModelFamilies;
pub use prompt::SystemPrompt;
pub use provider_types::{ProviderId, SamplingParams};
pub use providers::{Provider, ProviderAdapter, ProviderOptions, SendRequest, TurnResult};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
