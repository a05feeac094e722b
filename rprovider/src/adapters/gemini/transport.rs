//! Gemini transport trait and the reqwest-backed `generateContent` client.

use reqwest::{Client, StatusCode};

use crate::{ProviderError, ProviderErrorKind, ProviderFuture};

use super::serde_api::{GeminiApiResponse, build_api_request, extract_error_message};
use super::types::{GeminiAuth, GeminiRequest, GeminiResponse};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

pub trait GeminiTransport: Send + Sync + std::fmt::Debug {
    fn generate<'a>(
        &'a self,
        request: GeminiRequest,
        auth: GeminiAuth,
    ) -> ProviderFuture<'a, Result<GeminiResponse, ProviderError>>;
}

/// Talks to the Gemini REST API. The request deadline comes from the
/// `Client` it is built with.
#[derive(Debug, Clone)]
pub struct GeminiHttpTransport {
    client: Client,
    base_url: String,
}

impl GeminiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/models/{model}:generateContent")
    }

    async fn send(
        &self,
        request: GeminiRequest,
        auth: GeminiAuth,
    ) -> Result<GeminiResponse, ProviderError> {
        let model = request.model.clone();
        let body = build_api_request(request)?;
        let GeminiAuth::ApiKey(key) = auth;

        let response = self
            .client
            .post(self.endpoint(&model))
            .header(API_KEY_HEADER, key.expose())
            .json(&body)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body)
                .unwrap_or_else(|| format!("Gemini request failed with status {status}"));
            return Err(
                ProviderError::new(classify_status(status), message).with_status(status.as_u16())
            );
        }

        let parsed = response
            .json::<GeminiApiResponse>()
            .await
            .map_err(|err| ProviderError::decode(err.to_string()))?;
        Ok(parsed.into_response(model))
    }
}

impl GeminiTransport for GeminiHttpTransport {
    fn generate<'a>(
        &'a self,
        request: GeminiRequest,
        auth: GeminiAuth,
    ) -> ProviderFuture<'a, Result<GeminiResponse, ProviderError>> {
        Box::pin(self.send(request, auth))
    }
}

fn send_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

pub(crate) fn classify_status(status: StatusCode) -> ProviderErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderErrorKind::Authentication,
        StatusCode::TOO_MANY_REQUESTS => ProviderErrorKind::RateLimited,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderErrorKind::Timeout,
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderErrorKind::InvalidRequest
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            ProviderErrorKind::Unavailable
        }
        _ => ProviderErrorKind::Transport,
    }
}
