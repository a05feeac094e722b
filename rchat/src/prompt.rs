//! Initial message construction for the summary and chat exchanges.
//!
//! Both builders are pure: identical inputs produce identical messages.

use std::fmt::Write;

use rprovider::{Message, Role};
use rtooling::{DEFAULT_MAX_TOOL_PATHS, FILE_CONTENT_TOOL};

use crate::{ChatTurn, RepositoryMetadata, TurnRole};

pub const MAX_CONTENT_ENTRIES: usize = 50;
pub const MAX_LANGUAGES: usize = 5;
pub const DEFAULT_HISTORY_PAIRS: usize = 5;

pub const SUMMARY_SECTIONS: [&str; 5] = [
    "Overview",
    "Key Features",
    "Tech Stack",
    "Project Structure",
    "Getting Started",
];

pub const CHAT_ACKNOWLEDGMENT: &str =
    "Understood. I will answer questions about this repository using the context provided.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBuilder {
    max_tool_paths: usize,
    history_pairs: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            max_tool_paths: DEFAULT_MAX_TOOL_PATHS,
            history_pairs: DEFAULT_HISTORY_PAIRS,
        }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tool_paths(mut self, max_tool_paths: usize) -> Self {
        self.max_tool_paths = max_tool_paths;
        self
    }

    pub fn with_history_pairs(mut self, history_pairs: usize) -> Self {
        self.history_pairs = history_pairs;
        self
    }

    pub fn summary_prompt(&self, metadata: &RepositoryMetadata) -> Message {
        let mut prompt = format!(
            "Analyze the GitHub repository {} and write a structured overview in Markdown.\n\n",
            metadata.display_name()
        );

        prompt.push_str("Repository context:\n");
        push_context(&mut prompt, metadata);

        prompt.push_str("\nOrganize the analysis into exactly these sections, each as a level-2 heading:\n");
        for section in SUMMARY_SECTIONS {
            let _ = writeln!(prompt, "## {section}");
        }

        let _ = write!(
            prompt,
            "\nYou may call the {FILE_CONTENT_TOOL} tool once to read up to {} files \
             (for example the README or a package manifest) before writing. \
             Base every statement on the context above or on files you have read.",
            self.max_tool_paths
        );

        Message::requester(prompt)
    }

    pub fn chat_prompt(
        &self,
        metadata: &RepositoryMetadata,
        prior_turns: &[ChatTurn],
        question: &str,
    ) -> Vec<Message> {
        let mut instruction = format!(
            "You are RepoLens, an assistant that answers questions about the GitHub repository {}. \
             Answer concisely in Markdown. When the context below is not enough, you may call the \
             {FILE_CONTENT_TOOL} tool to read up to {} files.\n\nRepository context:\n",
            metadata.display_name(),
            self.max_tool_paths
        );
        push_context(&mut instruction, metadata);

        let keep = self.history_pairs.saturating_mul(2);
        let recent = &prior_turns[prior_turns.len().saturating_sub(keep)..];

        let mut messages = Vec::with_capacity(recent.len() + 3);
        messages.push(Message::requester(instruction));
        messages.push(Message::model(CHAT_ACKNOWLEDGMENT));
        messages.extend(recent.iter().map(turn_message));
        messages.push(Message::requester(question));
        messages
    }
}

pub fn build_summary_prompt(metadata: &RepositoryMetadata) -> Message {
    PromptBuilder::default().summary_prompt(metadata)
}

pub fn build_chat_prompt(
    metadata: &RepositoryMetadata,
    prior_turns: &[ChatTurn],
    question: &str,
) -> Vec<Message> {
    PromptBuilder::default().chat_prompt(metadata, prior_turns, question)
}

fn turn_message(turn: &ChatTurn) -> Message {
    let role = match turn.role {
        TurnRole::User => Role::Requester,
        TurnRole::Assistant => Role::Model,
    };
    Message::text(role, turn.content.clone())
}

fn push_context(out: &mut String, metadata: &RepositoryMetadata) {
    let _ = writeln!(out, "- Name: {}", metadata.display_name());
    let _ = writeln!(
        out,
        "- Description: {}",
        metadata.description.as_deref().unwrap_or("No description provided")
    );
    let _ = writeln!(
        out,
        "- Primary language: {}",
        metadata.language.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(
        out,
        "- Stars: {}, Forks: {}, Open issues: {}",
        metadata.stars, metadata.forks, metadata.open_issues
    );

    if !metadata.topics.is_empty() {
        let _ = writeln!(out, "- Topics: {}", metadata.topics.join(", "));
    }

    let languages = metadata.top_languages(MAX_LANGUAGES);
    if !languages.is_empty() {
        let listed = languages
            .iter()
            .map(|(name, bytes)| format!("{name} ({bytes} bytes)"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "- Languages: {listed}");
    }

    let _ = writeln!(out, "- Contributors: {}", metadata.contributors);

    if !metadata.contents.is_empty() {
        out.push_str("- Top-level entries:\n");
        for entry in metadata.contents.iter().take(MAX_CONTENT_ENTRIES) {
            let _ = writeln!(out, "  - {} ({})", entry.name, entry.kind.as_str());
        }

        let hidden = metadata.contents.len().saturating_sub(MAX_CONTENT_ENTRIES);
        if hidden > 0 {
            let _ = writeln!(out, "  - ... and {hidden} more");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryKind;

    fn metadata() -> RepositoryMetadata {
        RepositoryMetadata::new("acme", "widget")
            .with_description("A widget")
            .with_language("Rust")
            .with_counts(10, 2, 1)
            .with_topics(["cli", "tools"])
            .with_entry("src", EntryKind::Dir)
            .with_entry("README.md", EntryKind::File)
    }

    #[test]
    fn summary_prompt_lists_sections_and_tool_allowance() {
        let message = build_summary_prompt(&metadata());
        assert_eq!(message.role, Role::Requester);

        let text = message.joined_text();
        for section in SUMMARY_SECTIONS {
            assert!(text.contains(&format!("## {section}")), "missing {section}");
        }
        assert!(text.contains("acme/widget"));
        assert!(text.contains("Stars: 10, Forks: 2, Open issues: 1"));
        assert!(text.contains("Topics: cli, tools"));
        assert!(text.contains("get_file_content"));
        assert!(text.contains("up to 3 files"));
    }

    #[test]
    fn summary_prompt_bounds_entries_and_languages() {
        let mut repo = metadata();
        for index in 0..60 {
            repo = repo.with_entry(format!("file-{index:02}.txt"), EntryKind::File);
        }
        for index in 0..8u64 {
            repo = repo.with_language_bytes(format!("Lang{index}"), 100 + index);
        }

        let text = build_summary_prompt(&repo).joined_text();
        assert!(text.contains("file-47.txt"));
        assert!(!text.contains("file-48.txt"));
        assert!(text.contains("... and 12 more"));
        assert!(text.contains("Lang7"));
        assert!(!text.contains("Lang2 "));
    }

    #[test]
    fn summary_prompt_is_deterministic() {
        assert_eq!(
            build_summary_prompt(&metadata()),
            build_summary_prompt(&metadata())
        );
    }

    #[test]
    fn empty_history_and_question_still_produce_preamble() {
        let messages = build_chat_prompt(&metadata(), &[], "");

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::Requester);
        assert!(messages[0].joined_text().contains("RepoLens"));
        assert_eq!(messages[1], Message::model(CHAT_ACKNOWLEDGMENT));
        assert_eq!(messages[2], Message::requester(""));
    }

    #[test]
    fn chat_prompt_keeps_only_recent_pairs() {
        let turns = (0..7)
            .flat_map(|index| {
                [
                    ChatTurn::user(format!("question {index}")),
                    ChatTurn::assistant(format!("answer {index}")),
                ]
            })
            .collect::<Vec<_>>();

        let messages = PromptBuilder::new()
            .with_history_pairs(5)
            .chat_prompt(&metadata(), &turns, "what now?");

        assert_eq!(messages.len(), 2 + 10 + 1);
        assert_eq!(messages[2], Message::requester("question 2"));
        assert_eq!(messages[3], Message::model("answer 2"));
        assert_eq!(messages[11], Message::model("answer 6"));
        assert_eq!(messages[12], Message::requester("what now?"));
    }
}
