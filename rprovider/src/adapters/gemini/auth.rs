//! Gemini-specific credential helpers and auth resolution policy.

use crate::{ProviderError, ProviderId, SecureCredentialManager};

use super::types::GeminiAuth;

impl SecureCredentialManager {
    /// Stores a Gemini API key for provider-authenticated requests.
    ///
    /// Keys containing whitespace are rejected; they are almost always a
    /// copy-paste accident from an env file.
    pub fn set_gemini_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if api_key.chars().any(char::is_whitespace) {
            return Err(ProviderError::authentication(
                "Gemini API key must not contain whitespace",
            ));
        }

        self.set_api_key(ProviderId::Gemini, api_key)
    }
}

pub(crate) fn resolve_gemini_auth(
    credentials: &SecureCredentialManager,
) -> Result<GeminiAuth, ProviderError> {
    if let Some(api_key) = credentials.api_key(ProviderId::Gemini)? {
        return Ok(GeminiAuth::ApiKey(api_key));
    }

    Err(ProviderError::authentication("no Gemini API key configured"))
}
