//! Provider-agnostic request, response, and message model types.
//!
//! ```rust
//! use rprovider::{Message, ModelRequest, ProviderErrorKind};
//!
//! let ok = ModelRequest::builder("gemini-2.0-flash")
//!     .messages([Message::requester("Summarize this repository")])
//!     .build();
//! assert!(ok.is_ok());
//!
//! let err = ModelRequest::builder("gemini-2.0-flash")
//!     .messages([Message::model("I answer first")])
//!     .build()
//!     .expect_err("model-first transcript should fail");
//! assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
//! ```

use std::fmt::{Display, Formatter};

use rcommon::{ExchangeId, GenerationOptions};
use serde_json::{Map, Value};

use crate::ProviderError;

pub type JsonObject = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Gemini,
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::Gemini => "gemini",
        };

        f.write_str(id)
    }
}

/// Conversation roles as the orchestrator sees them. Adapters translate these
/// into the backend's own vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Requester,
    Model,
    Tool,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Self::Requester => "requester",
            Self::Model => "model",
            Self::Tool => "tool",
        };

        f.write_str(role)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: JsonObject,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: JsonObject) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub name: String,
    pub payload: JsonObject,
}

impl ToolResult {
    pub fn new(name: impl Into<String>, payload: JsonObject) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    ToolCall(ToolCall),
    ToolResult(ToolResult),
}

impl Part {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        match self {
            Self::ToolCall(call) => Some(call),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Message {
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self { role, parts }
    }

    pub fn text(role: Role, content: impl Into<String>) -> Self {
        Self::new(role, vec![Part::text(content)])
    }

    pub fn requester(content: impl Into<String>) -> Self {
        Self::text(Role::Requester, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::text(Role::Model, content)
    }

    pub fn tool(result: ToolResult) -> Self {
        Self::new(Role::Tool, vec![Part::ToolResult(result)])
    }

    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCall> {
        self.parts.iter().filter_map(Part::as_tool_call)
    }

    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls().next().is_some()
    }

    /// Concatenation of every text part; empty parts contribute nothing.
    pub fn joined_text(&self) -> String {
        self.parts.iter().filter_map(Part::as_text).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ToolUse,
    Blocked,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub provider: ProviderId,
    pub model: String,
    pub message: Message,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

impl ModelResponse {
    /// A response is usable when it carries non-blank text or at least one
    /// tool call.
    pub fn has_usable_content(&self) -> bool {
        self.message.has_tool_calls() || !self.message.joined_text().trim().is_empty()
    }
}

/// One backend round: the whole transcript so far plus the tool surface.
///
/// Tool definitions travel on every round; `tools_enabled` decides whether
/// the backend may call them this time.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
    pub tools: Vec<ToolDefinition>,
    pub tools_enabled: bool,
    pub exchange_id: Option<ExchangeId>,
}

impl ModelRequest {
    pub fn builder(model: impl Into<String>) -> ModelRequestBuilder {
        ModelRequestBuilder {
            request: Self::new(model, Vec::new()),
        }
    }

    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: GenerationOptions::default(),
            tools: Vec::new(),
            tools_enabled: false,
            exchange_id: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options = self.options.with_temperature(temperature);
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_tools_enabled(mut self, enabled: bool) -> Self {
        self.tools_enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        match self.violation() {
            Some(reason) => Err(ProviderError::invalid_request(reason)),
            None => Ok(()),
        }
    }

    fn violation(&self) -> Option<&'static str> {
        if self.model.trim().is_empty() {
            return Some("model must not be empty");
        }
        if self.messages.first().map(|message| message.role) != Some(Role::Requester) {
            return Some("conversation must open with a requester message");
        }
        if self.tools_enabled && self.tools.is_empty() {
            return Some("tool calling was enabled without any tool definitions");
        }
        if self.options.max_tokens == Some(0) {
            return Some("max_tokens must be greater than zero");
        }
        if self
            .options
            .temperature
            .is_some_and(|temperature| !(0.0..=2.0).contains(&temperature))
        {
            return Some("temperature must be in the inclusive range 0.0..=2.0");
        }
        None
    }
}

/// Validating builder used by the conversation driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequestBuilder {
    request: ModelRequest,
}

impl ModelRequestBuilder {
    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.request.messages.extend(messages);
        self
    }

    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.request.options = options;
        self
    }

    pub fn tool(mut self, tool: ToolDefinition) -> Self {
        self.request.tools.push(tool);
        self
    }

    pub fn tools_enabled(mut self, enabled: bool) -> Self {
        self.request.tools_enabled = enabled;
        self
    }

    pub fn exchange_id(mut self, exchange_id: ExchangeId) -> Self {
        self.request.exchange_id = Some(exchange_id);
        self
    }

    pub fn build(self) -> Result<ModelRequest, ProviderError> {
        self.request.validate()?;
        Ok(self.request)
    }
}
