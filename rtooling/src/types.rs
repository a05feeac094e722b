//! Resolver context and per-path outcome types.

use rcommon::ExchangeId;
use serde::Serialize;

/// Identifies the repository the current exchange is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchContext {
    pub owner: String,
    pub repo: String,
    pub exchange_id: Option<ExchangeId>,
}

impl FetchContext {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            exchange_id: None,
        }
    }

    pub fn with_exchange_id(mut self, exchange_id: ExchangeId) -> Self {
        self.exchange_id = Some(exchange_id);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolStatus {
    Success,
    NotFound,
    Error,
}

impl ToolStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotFound => "not-found",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutcome {
    pub path: String,
    pub content: String,
    pub status: ToolStatus,
}

impl ToolOutcome {
    pub fn success(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            status: ToolStatus::Success,
        }
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            content: format!("// Skipped: '{path}' is not a valid file path"),
            path,
            status: ToolStatus::NotFound,
        }
    }

    pub fn error(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            content: format!("// File not found or could not be retrieved: {path}"),
            path,
            status: ToolStatus::Error,
        }
    }
}
