//! Per-exchange identity shared by the driver, resolver, and hooks.

use std::fmt::{Display, Formatter};

use rcommon::ExchangeId;
use rtooling::FetchContext;

use crate::RepositoryMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeMode {
    Summary,
    Chat,
}

impl ExchangeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Chat => "chat",
        }
    }
}

impl Display for ExchangeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two permitted backend calls is being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendRound {
    Initial,
    AfterTool,
}

impl BackendRound {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::AfterTool => "after_tool",
        }
    }

    pub fn tools_enabled(self) -> bool {
        matches!(self, Self::Initial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeContext {
    pub exchange_id: ExchangeId,
    pub mode: ExchangeMode,
    pub fetch: FetchContext,
}

impl ExchangeContext {
    pub fn new(mode: ExchangeMode, metadata: &RepositoryMetadata) -> Self {
        let exchange_id = ExchangeId::generate();
        let (owner, repo) = metadata.coordinates();
        Self {
            fetch: FetchContext::new(owner, repo).with_exchange_id(exchange_id.clone()),
            exchange_id,
            mode,
        }
    }

    pub fn with_exchange_id(mut self, exchange_id: ExchangeId) -> Self {
        self.fetch.exchange_id = Some(exchange_id.clone());
        self.exchange_id = exchange_id;
        self
    }
}
