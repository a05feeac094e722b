use serde::{Deserialize, Serialize};

/// What the caller receives for every exchange. `text` is always populated;
/// `error` is set when the text is a fallback rather than a model answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: None,
        }
    }

    pub fn fallback(text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}
