//! Backend-agnostic model provider contracts.
//!
//! The conversation model here (`Message`, `Part`, `Role`) is what the rest of
//! the workspace speaks; adapters under [`adapters`] translate it into a
//! specific backend's wire format.
//!
//! ```rust
//! use rprovider::{Message, Part, Role};
//!
//! let message = Message::new(Role::Model, vec![Part::text("hello"), Part::text(" world")]);
//! assert_eq!(message.joined_text(), "hello world");
//! assert!(!message.has_tool_calls());
//! ```

pub mod adapters;
mod credentials;
mod error;
mod model;
pub mod prelude;
mod provider;

pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    JsonObject, Message, ModelRequest, ModelRequestBuilder, ModelResponse, Part, ProviderId, Role,
    StopReason, TokenUsage, ToolCall, ToolDefinition, ToolResult,
};
pub use provider::{ModelProvider, ProviderFuture};

#[cfg(feature = "provider-gemini")]
pub use adapters::gemini::{GeminiHttpTransport, GeminiProvider, GeminiTransport};
