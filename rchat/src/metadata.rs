//! Repository metadata and chat history as handed over by the routing layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    #[default]
    #[serde(other)]
    Other,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::Symlink => "symlink",
            Self::Submodule => "submodule",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
}

impl ContentEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Everything the assistant knows about a repository before any tool call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryMetadata {
    pub owner: String,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(alias = "stargazers_count")]
    pub stars: u64,
    #[serde(alias = "forks_count")]
    pub forks: u64,
    #[serde(alias = "open_issues_count")]
    pub open_issues: u64,
    pub topics: Vec<String>,
    pub contents: Vec<ContentEntry>,
    pub languages: BTreeMap<String, u64>,
    pub contributors: u64,
    pub default_branch: Option<String>,
    pub html_url: Option<String>,
}

impl RepositoryMetadata {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let owner = owner.into();
        let name = name.into();
        Self {
            full_name: format!("{owner}/{name}"),
            owner,
            name,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_counts(mut self, stars: u64, forks: u64, open_issues: u64) -> Self {
        self.stars = stars;
        self.forks = forks;
        self.open_issues = open_issues;
        self
    }

    pub fn with_topics(mut self, topics: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_entry(mut self, name: impl Into<String>, kind: EntryKind) -> Self {
        self.contents.push(ContentEntry::new(name, kind));
        self
    }

    pub fn with_language_bytes(mut self, language: impl Into<String>, bytes: u64) -> Self {
        self.languages.insert(language.into(), bytes);
        self
    }

    pub fn with_contributors(mut self, contributors: u64) -> Self {
        self.contributors = contributors;
        self
    }

    /// `owner/name` when known, otherwise whatever name the caller supplied.
    pub fn display_name(&self) -> &str {
        if !self.full_name.trim().is_empty() {
            &self.full_name
        } else {
            &self.name
        }
    }

    /// Owner and repository name used for content lookups. Falls back to
    /// splitting `full_name` when either half is missing.
    pub fn coordinates(&self) -> (String, String) {
        if !self.owner.is_empty() && !self.name.is_empty() && !self.name.contains('/') {
            return (self.owner.clone(), self.name.clone());
        }

        let source = if self.full_name.contains('/') {
            self.full_name.as_str()
        } else {
            self.name.as_str()
        };

        match source.split_once('/') {
            Some((owner, name)) => (owner.to_string(), name.to_string()),
            None => (self.owner.clone(), self.name.clone()),
        }
    }

    /// Languages ordered by byte count, largest first.
    pub fn top_languages(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut languages = self
            .languages
            .iter()
            .map(|(name, bytes)| (name.as_str(), *bytes))
            .collect::<Vec<_>>();
        languages.sort_by(|left, right| right.1.cmp(&left.1).then(left.0.cmp(right.0)));
        languages.truncate(limit);
        languages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    #[serde(alias = "model")]
    Assistant,
}

/// One prior chat message supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}
