//! In-memory API key store. Keys never appear in `Debug` output and their
//! bytes are zeroed on drop.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{ProviderError, ProviderId};

#[derive(PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes are valid UTF-8, so the string stays well formed.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

type KeyTable = HashMap<ProviderId, SecretString>;

#[derive(Default)]
pub struct SecureCredentialManager {
    api_keys: RwLock<KeyTable>,
}

impl SecureCredentialManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(
        &self,
        provider: ProviderId,
        api_key: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let api_key = SecretString::new(api_key);
        if api_key.expose().trim().is_empty() {
            return Err(ProviderError::authentication("api key must not be empty"));
        }

        self.write_keys()?.insert(provider, api_key);
        Ok(())
    }

    pub fn has_credentials(&self, provider: ProviderId) -> Result<bool, ProviderError> {
        Ok(self.read_keys()?.contains_key(&provider))
    }

    pub fn api_key(&self, provider: ProviderId) -> Result<Option<SecretString>, ProviderError> {
        Ok(self.read_keys()?.get(&provider).cloned())
    }

    pub fn clear(&self, provider: ProviderId) -> Result<bool, ProviderError> {
        Ok(self.write_keys()?.remove(&provider).is_some())
    }

    fn read_keys(&self) -> Result<RwLockReadGuard<'_, KeyTable>, ProviderError> {
        self.api_keys.read().map_err(|_| poisoned())
    }

    fn write_keys(&self) -> Result<RwLockWriteGuard<'_, KeyTable>, ProviderError> {
        self.api_keys.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> ProviderError {
    ProviderError::other("credential store lock poisoned")
}

impl std::fmt::Debug for SecureCredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureCredentialManager")
            .finish_non_exhaustive()
    }
}
