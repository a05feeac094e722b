//! Gemini provider implementation over transport and shared models.

use std::sync::Arc;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecureCredentialManager,
};

use super::auth::resolve_gemini_auth;
use super::transport::GeminiTransport;
use super::types::{GeminiCallingMode, GeminiContent, GeminiFunctionDeclaration, GeminiRequest};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone)]
pub struct GeminiProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn GeminiTransport>,
    fallback_model: String,
}

impl GeminiProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn GeminiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
            fallback_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }

    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    pub(crate) fn build_gemini_request(&self, request: ModelRequest) -> GeminiRequest {
        let model = if request.model.trim().is_empty() {
            self.fallback_model.clone()
        } else {
            request.model
        };

        let contents = request
            .messages
            .into_iter()
            .map(GeminiContent::from)
            .collect::<Vec<_>>();

        let functions = request
            .tools
            .into_iter()
            .map(GeminiFunctionDeclaration::from)
            .collect::<Vec<_>>();

        GeminiRequest {
            model,
            contents,
            functions,
            calling_mode: if request.tools_enabled {
                GeminiCallingMode::Auto
            } else {
                GeminiCallingMode::None
            },
            temperature: request.options.temperature,
            max_output_tokens: request.options.max_tokens,
        }
    }
}

impl ModelProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn is_configured(&self) -> bool {
        self.credentials
            .has_credentials(ProviderId::Gemini)
            .unwrap_or(false)
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_gemini_auth(&self.credentials)?;
            let gemini_request = self.build_gemini_request(request);
            let response = self.transport.generate(gemini_request, auth).await?;
            Ok(response.into_model_response())
        })
    }
}
