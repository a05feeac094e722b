//! Exchange-level failures and their classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use rprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeErrorKind {
    ConfigurationMissing,
    BackendUnavailable,
    BackendEmptyResponse,
    Cancelled,
    InvalidRequest,
}

impl ExchangeErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "configuration_missing",
            Self::BackendUnavailable => "backend_unavailable",
            Self::BackendEmptyResponse => "backend_empty_response",
            Self::Cancelled => "cancelled",
            Self::InvalidRequest => "invalid_request",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeError {
    pub kind: ExchangeErrorKind,
    pub message: String,
}

impl ExchangeError {
    pub fn new(kind: ExchangeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration_missing(message: impl Into<String>) -> Self {
        Self::new(ExchangeErrorKind::ConfigurationMissing, message)
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::new(ExchangeErrorKind::BackendUnavailable, message)
    }

    pub fn backend_empty_response(message: impl Into<String>) -> Self {
        Self::new(ExchangeErrorKind::BackendEmptyResponse, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ExchangeErrorKind::Cancelled, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ExchangeErrorKind::InvalidRequest, message)
    }
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ExchangeError {}

impl From<ProviderError> for ExchangeError {
    fn from(value: ProviderError) -> Self {
        match value.kind {
            ProviderErrorKind::InvalidRequest => ExchangeError::invalid_request(value.message),
            _ => ExchangeError::backend_unavailable(value.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_map_to_backend_unavailable_with_raw_message() {
        let error: ExchangeError = ProviderError::transport("connection refused").into();
        assert_eq!(error.kind, ExchangeErrorKind::BackendUnavailable);
        assert_eq!(error.message, "connection refused");
    }

    #[test]
    fn invalid_provider_requests_stay_invalid() {
        let error: ExchangeError = ProviderError::invalid_request("no messages").into();
        assert_eq!(error.kind, ExchangeErrorKind::InvalidRequest);
        assert_eq!(error.message, "no messages");
    }

    #[test]
    fn display_includes_kind_and_message() {
        let error = ExchangeError::cancelled("caller went away");
        assert_eq!(error.to_string(), "Cancelled: caller went away");
    }
}
