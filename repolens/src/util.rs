//! Small helpers for callers that start from user-supplied repository names.

use crate::RepositoryMetadata;

/// Parses `owner/repo`, `github.com/owner/repo`, or a full GitHub URL.
pub fn parse_repository(value: &str) -> Option<(String, String)> {
    let trimmed = value.trim().trim_end_matches('/');
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let path = without_scheme
        .strip_prefix("www.github.com/")
        .or_else(|| without_scheme.strip_prefix("github.com/"))
        .unwrap_or(without_scheme);

    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?.trim_end_matches(".git");

    // A dotted first segment that was not stripped is some other host.
    if owner.contains('.') && path == without_scheme {
        return None;
    }
    if repo.is_empty() {
        return None;
    }

    Some((owner.to_string(), repo.to_string()))
}

/// Minimal metadata for a repository known only by name.
pub fn bare_metadata(value: &str) -> Option<RepositoryMetadata> {
    let (owner, repo) = parse_repository(value)?;
    Some(RepositoryMetadata::new(owner, repo))
}
