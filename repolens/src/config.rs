//! Environment-driven assistant configuration.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use rchat::DEFAULT_BACKEND_TIMEOUT;
use rchat::prompt::DEFAULT_HISTORY_PAIRS;
use rprovider::SecretString;
use rtooling::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_MAX_TOOL_PATHS};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "REPOLENS_MODEL";
pub const BASE_URL_VAR: &str = "REPOLENS_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "REPOLENS_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    InvalidValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl ConfigError {
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self {
            kind: ConfigErrorKind::InvalidValue,
            message: message.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ConfigError {}

/// Settings for [`build_assistant`](crate::build_assistant). A missing API key
/// is valid: the assistant then answers with the configuration notice.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub model: String,
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub fetch_timeout: Duration,
    pub max_tool_paths: usize,
    pub max_content_length: usize,
    pub history_pairs: usize,
    pub temperature: Option<f32>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_BACKEND_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_tool_paths: DEFAULT_MAX_TOOL_PATHS,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            history_pairs: DEFAULT_HISTORY_PAIRS,
            temperature: None,
        }
    }
}

impl AssistantConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(api_key) = read(API_KEY_VAR) {
            config.api_key = Some(SecretString::new(api_key));
        }
        if let Some(model) = read(MODEL_VAR) {
            config.model = model;
        }
        if let Some(base_url) = read(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(raw) = read(REQUEST_TIMEOUT_VAR) {
            let seconds = raw.parse::<u64>().map_err(|_| {
                ConfigError::invalid_value(format!(
                    "{REQUEST_TIMEOUT_VAR} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            if seconds == 0 {
                return Err(ConfigError::invalid_value(format!(
                    "{REQUEST_TIMEOUT_VAR} must be greater than zero"
                )));
            }
            config.request_timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn with_max_tool_paths(mut self, max_tool_paths: usize) -> Self {
        self.max_tool_paths = max_tool_paths;
        self
    }

    pub fn with_max_content_length(mut self, max_content_length: usize) -> Self {
        self.max_content_length = max_content_length;
        self
    }

    pub fn with_history_pairs(mut self, history_pairs: usize) -> Self {
        self.history_pairs = history_pairs;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|api_key| !api_key.is_empty())
    }
}
