//! Substitute responses for exchanges that did not produce a model answer.
//!
//! Every failure class maps to a populated [`Response`]; nothing here is
//! retried.

use std::fmt::Write;

use crate::{ExchangeError, ExchangeErrorKind, RepositoryMetadata, Response};

pub const CONFIGURATION_NOTICE: &str = "The AI assistant is not configured. \
     Set the GEMINI_API_KEY environment variable to enable repository analysis.";
pub const CANCELLED_NOTICE: &str = "The request was cancelled.";
pub const FALLBACK_NOTE: &str = "AI analysis is currently unavailable. \
     This overview was generated from repository metadata only.";

pub fn summary_response(metadata: &RepositoryMetadata, error: &ExchangeError) -> Response {
    match error.kind {
        ExchangeErrorKind::ConfigurationMissing => configuration_response(),
        ExchangeErrorKind::Cancelled => cancelled_response(error),
        _ => Response::fallback(metadata_summary(metadata), error.message.clone()),
    }
}

pub fn chat_response(error: &ExchangeError) -> Response {
    match error.kind {
        ExchangeErrorKind::ConfigurationMissing => configuration_response(),
        ExchangeErrorKind::Cancelled => cancelled_response(error),
        _ => Response::fallback(
            format!("Sorry, an error occurred: {}", error.message),
            error.message.clone(),
        ),
    }
}

fn configuration_response() -> Response {
    Response::fallback(CONFIGURATION_NOTICE, CONFIGURATION_NOTICE)
}

fn cancelled_response(error: &ExchangeError) -> Response {
    Response::fallback(CANCELLED_NOTICE, error.message.clone())
}

/// Markdown overview built only from fields already on hand.
pub fn metadata_summary(metadata: &RepositoryMetadata) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", metadata.display_name());
    let _ = writeln!(out, "> {FALLBACK_NOTE}\n");

    out.push_str("## Overview\n\n");
    let description = metadata
        .description
        .as_deref()
        .map(str::trim)
        .filter(|description| !description.is_empty())
        .unwrap_or("No description provided.");
    let _ = writeln!(out, "{description}\n");

    out.push_str("## Key Facts\n\n");
    let _ = writeln!(
        out,
        "- **Primary language:** {}",
        metadata.language.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(out, "- **Stars:** {}", metadata.stars);
    let _ = writeln!(out, "- **Forks:** {}", metadata.forks);
    let _ = writeln!(out, "- **Open issues:** {}\n", metadata.open_issues);

    out.push_str("## Topics\n\n");
    if metadata.topics.is_empty() {
        out.push_str("No topics listed.\n");
    } else {
        let topics = metadata
            .topics
            .iter()
            .map(|topic| format!("`{topic}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "{topics}");
    }

    out
}
