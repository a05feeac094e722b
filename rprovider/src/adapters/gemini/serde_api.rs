//! Gemini HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{JsonObject, ProviderError};

use super::types::{
    GeminiContent, GeminiFinishReason, GeminiFunctionDeclaration, GeminiPart, GeminiRequest,
    GeminiResponse, GeminiRole, GeminiUsage,
};

pub(crate) fn build_api_request(request: GeminiRequest) -> Result<GeminiApiRequest, ProviderError> {
    let contents = request
        .contents
        .into_iter()
        .map(GeminiApiContent::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    if contents.is_empty() {
        return Err(ProviderError::invalid_request(
            "Gemini request requires at least one content entry",
        ));
    }

    // Declarations stay attached even with calling disabled so the backend can
    // still interpret earlier functionCall/functionResponse parts.
    let (tools, tool_config) = if request.functions.is_empty() {
        (None, None)
    } else {
        let declarations = request
            .functions
            .into_iter()
            .map(GeminiApiFunctionDeclaration::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        (
            Some(vec![GeminiApiTool {
                function_declarations: declarations,
            }]),
            Some(GeminiApiToolConfig {
                function_calling_config: GeminiApiFunctionCallingConfig {
                    mode: request.calling_mode.as_str().to_string(),
                },
            }),
        )
    };

    let generation_config = if request.temperature.is_none() && request.max_output_tokens.is_none()
    {
        None
    } else {
        Some(GeminiApiGenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
        })
    };

    Ok(GeminiApiRequest {
        contents,
        tools,
        tool_config,
        generation_config,
    })
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> GeminiFinishReason {
    match value {
        Some("STOP") => GeminiFinishReason::Stop,
        Some("MAX_TOKENS") => GeminiFinishReason::MaxTokens,
        Some("SAFETY") | Some("RECITATION") | Some("PROHIBITED_CONTENT") => {
            GeminiFinishReason::Safety
        }
        _ => GeminiFinishReason::Other,
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<GeminiApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiErrorEnvelope {
    pub error: GeminiApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiRequest {
    pub contents: Vec<GeminiApiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<GeminiApiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<GeminiApiToolConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiApiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiApiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiApiPart>,
}

impl TryFrom<GeminiContent> for GeminiApiContent {
    type Error = ProviderError;

    fn try_from(value: GeminiContent) -> Result<Self, Self::Error> {
        if value.parts.is_empty() && value.role != GeminiRole::Model {
            return Err(ProviderError::invalid_request(
                "Gemini user content must carry at least one part",
            ));
        }

        Ok(Self {
            role: Some(value.role.as_str().to_string()),
            parts: value.parts.into_iter().map(GeminiApiPart::from).collect(),
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GeminiApiFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<GeminiApiFunctionResponse>,
}

impl From<GeminiPart> for GeminiApiPart {
    fn from(value: GeminiPart) -> Self {
        match value {
            GeminiPart::Text(text) => Self {
                text: Some(text),
                ..Self::default()
            },
            GeminiPart::FunctionCall { name, args } => Self {
                function_call: Some(GeminiApiFunctionCall { name, args }),
                ..Self::default()
            },
            GeminiPart::FunctionResponse { name, response } => Self {
                function_response: Some(GeminiApiFunctionResponse { name, response }),
                ..Self::default()
            },
        }
    }
}

impl GeminiApiPart {
    /// Parts Gemini sends that carry none of the tags we understand (inline
    /// data, executable code, ...) are dropped.
    fn into_part(self) -> Option<GeminiPart> {
        if let Some(call) = self.function_call {
            return Some(GeminiPart::FunctionCall {
                name: call.name,
                args: call.args,
            });
        }

        if let Some(response) = self.function_response {
            return Some(GeminiPart::FunctionResponse {
                name: response.name,
                response: response.response,
            });
        }

        self.text.map(GeminiPart::Text)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiApiFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: JsonObject,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiApiFunctionResponse {
    pub name: String,
    #[serde(default)]
    pub response: JsonObject,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiTool {
    pub function_declarations: Vec<GeminiApiFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiFunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl TryFrom<GeminiFunctionDeclaration> for GeminiApiFunctionDeclaration {
    type Error = ProviderError;

    fn try_from(value: GeminiFunctionDeclaration) -> Result<Self, Self::Error> {
        if !value.parameters.is_object() {
            return Err(ProviderError::invalid_request(
                "Gemini function parameters must be a JSON object schema",
            ));
        }

        Ok(Self {
            name: value.name,
            description: value.description,
            parameters: value.parameters,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiToolConfig {
    pub function_calling_config: GeminiApiFunctionCallingConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiFunctionCallingConfig {
    pub mode: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiApiCandidate>,
    pub usage_metadata: Option<GeminiApiUsage>,
    pub model_version: Option<String>,
    pub prompt_feedback: Option<GeminiApiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiCandidate {
    pub content: Option<GeminiApiContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiPromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiUsage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

impl GeminiApiResponse {
    /// A blocked prompt comes back with no candidates; it is surfaced as an
    /// empty response rather than an error so the caller's empty-output path
    /// handles it.
    pub(crate) fn into_response(self, requested_model: String) -> GeminiResponse {
        let usage = self.usage_metadata.unwrap_or_default();
        let model = self.model_version.unwrap_or(requested_model);
        let blocked = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .is_some();

        let Some(candidate) = self.candidates.into_iter().next() else {
            return GeminiResponse {
                model,
                parts: Vec::new(),
                finish_reason: if blocked {
                    GeminiFinishReason::Blocked
                } else {
                    GeminiFinishReason::Other
                },
                usage: usage.into(),
            };
        };

        let parts = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(GeminiApiPart::into_part)
            .collect();

        GeminiResponse {
            model,
            parts,
            finish_reason: parse_finish_reason(candidate.finish_reason.as_deref()),
            usage: usage.into(),
        }
    }
}

impl From<GeminiApiUsage> for GeminiUsage {
    fn from(value: GeminiApiUsage) -> Self {
        Self {
            prompt_token_count: value.prompt_token_count,
            candidates_token_count: value.candidates_token_count,
            total_token_count: value.total_token_count,
        }
    }
}

