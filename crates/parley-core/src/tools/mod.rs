//! Tool catalog, dispatch and permission types
//!
//! The registry and executor are collaborators owned by the host; the core
//! only sees them through the traits in [`registry`].

pub mod permission;
pub mod registry;
pub mod schema;
pub mod types;

pub use permission::{
    ApprovalDecision, Permission, PermissionMode, PermissionPolicy, PermissionSettings,
};
pub use registry::{StaticToolRegistry, ToolExecutor, ToolRegistry};
pub use schema::{NormalizedSchema, normalize};
pub use types::{ContentItem, DispatchError, DispatchResult, ToolCall, ToolDescriptor, ToolResult};
