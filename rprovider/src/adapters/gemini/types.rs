//! Gemini adapter types and provider-agnostic conversion logic.
//!
//! This is the only place the orchestrator's role vocabulary meets Gemini's:
//! requester and tool messages both travel as `user` content, model messages
//! as `model` content.

use std::fmt::Formatter;

use serde_json::Value;

use crate::{
    JsonObject, Message, ModelResponse, Part, ProviderId, Role, SecretString, StopReason,
    TokenUsage, ToolCall, ToolDefinition, ToolResult,
};

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiRequest {
    pub model: String,
    pub contents: Vec<GeminiContent>,
    pub functions: Vec<GeminiFunctionDeclaration>,
    pub calling_mode: GeminiCallingMode,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiCallingMode {
    Auto,
    None,
}

impl GeminiCallingMode {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::None => "NONE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiRole {
    User,
    Model,
}

impl GeminiRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl From<Role> for GeminiRole {
    fn from(value: Role) -> Self {
        match value {
            Role::Requester | Role::Tool => Self::User,
            Role::Model => Self::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeminiPart {
    Text(String),
    FunctionCall { name: String, args: JsonObject },
    FunctionResponse { name: String, response: JsonObject },
}

impl From<Part> for GeminiPart {
    fn from(value: Part) -> Self {
        match value {
            Part::Text(text) => Self::Text(text),
            Part::ToolCall(call) => Self::FunctionCall {
                name: call.name,
                args: call.arguments,
            },
            Part::ToolResult(result) => Self::FunctionResponse {
                name: result.name,
                response: result.payload,
            },
        }
    }
}

impl From<GeminiPart> for Part {
    fn from(value: GeminiPart) -> Self {
        match value {
            GeminiPart::Text(text) => Part::Text(text),
            GeminiPart::FunctionCall { name, args } => Part::ToolCall(ToolCall::new(name, args)),
            GeminiPart::FunctionResponse { name, response } => {
                Part::ToolResult(ToolResult::new(name, response))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiContent {
    pub role: GeminiRole,
    pub parts: Vec<GeminiPart>,
}

impl From<Message> for GeminiContent {
    fn from(value: Message) -> Self {
        Self {
            role: value.role.into(),
            parts: value.parts.into_iter().map(GeminiPart::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiFunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<ToolDefinition> for GeminiFunctionDeclaration {
    fn from(value: ToolDefinition) -> Self {
        Self {
            name: value.name,
            description: value.description,
            parameters: value.parameters,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiResponse {
    pub model: String,
    pub parts: Vec<GeminiPart>,
    pub finish_reason: GeminiFinishReason,
    pub usage: GeminiUsage,
}

impl GeminiResponse {
    pub(crate) fn into_model_response(self) -> ModelResponse {
        let message = Message::new(
            Role::Model,
            self.parts.into_iter().map(Part::from).collect(),
        );

        let stop_reason = if message.has_tool_calls() {
            StopReason::ToolUse
        } else {
            self.finish_reason.into()
        };

        ModelResponse {
            provider: ProviderId::Gemini,
            model: self.model,
            message,
            stop_reason,
            usage: self.usage.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiFinishReason {
    Stop,
    MaxTokens,
    Safety,
    Blocked,
    Other,
}

impl From<GeminiFinishReason> for StopReason {
    fn from(value: GeminiFinishReason) -> Self {
        match value {
            GeminiFinishReason::Stop => Self::EndTurn,
            GeminiFinishReason::MaxTokens => Self::MaxTokens,
            GeminiFinishReason::Safety | GeminiFinishReason::Blocked => Self::Blocked,
            GeminiFinishReason::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeminiUsage {
    pub prompt_token_count: u32,
    pub candidates_token_count: u32,
    pub total_token_count: u32,
}

impl From<GeminiUsage> for TokenUsage {
    fn from(value: GeminiUsage) -> Self {
        Self {
            input_tokens: value.prompt_token_count,
            output_tokens: value.candidates_token_count,
            total_tokens: value.total_token_count,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum GeminiAuth {
    ApiKey(SecretString),
}

impl std::fmt::Debug for GeminiAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("GeminiAuth::ApiKey([REDACTED])"),
        }
    }
}
