//! Common `rprovider` imports for downstream crates.

pub use crate::{
    JsonObject, Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, Part,
    ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, Role, StopReason, TokenUsage,
    ToolCall, ToolDefinition, ToolResult,
};
pub use rcommon::{BoxFuture, ExchangeId, GenerationOptions};
