//! GitHub contents API fetcher over reqwest.

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};

use rcommon::BoxFuture;

use crate::ContentFetcher;

pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_MAX_FILE_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct GithubContentFetcher {
    client: Client,
    base_url: String,
    max_file_bytes: usize,
}

impl GithubContentFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: GITHUB_API_BASE_URL.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: usize) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    fn endpoint(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url.trim_end_matches('/'),
            owner,
            repo,
            path.trim_start_matches('/')
        )
    }

    async fn fetch_raw(&self, owner: &str, repo: &str, path: &str) -> Option<String> {
        let response = self
            .client
            .get(self.endpoint(owner, repo, path))
            .header(ACCEPT, "application/vnd.github.raw+json")
            .header(USER_AGENT, "repolens")
            .send()
            .await
            .map_err(|err| tracing::debug!(owner, repo, path, error = %err, "content fetch failed"))
            .ok()?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(owner, repo, path, status = status.as_u16(), "content fetch rejected");
            return None;
        }

        if response
            .content_length()
            .is_some_and(|length| exceeds_ceiling(length, self.max_file_bytes))
        {
            tracing::debug!(owner, repo, path, "content exceeds size ceiling");
            return None;
        }

        let bytes = response.bytes().await.ok()?;
        if bytes.len() > self.max_file_bytes {
            return None;
        }

        String::from_utf8(bytes.to_vec()).ok()
    }
}

fn exceeds_ceiling(length: u64, max_bytes: usize) -> bool {
    usize::try_from(length).map_or(true, |length| length > max_bytes)
}

impl ContentFetcher for GithubContentFetcher {
    fn fetch<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: &'a str,
    ) -> BoxFuture<'a, Option<String>> {
        Box::pin(self.fetch_raw(owner, repo, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let fetcher =
            GithubContentFetcher::new(Client::new()).with_base_url("https://example.test/api/");

        assert_eq!(
            fetcher.endpoint("acme", "widget", "/src/lib.rs"),
            "https://example.test/api/repos/acme/widget/contents/src/lib.rs"
        );
    }

    #[test]
    fn declared_length_checked_against_ceiling() {
        assert!(!exceeds_ceiling(1_024, 1_024));
        assert!(exceeds_ceiling(1_025, 1_024));
        assert!(exceeds_ceiling(u64::MAX, usize::MAX - 1));
        // Lengths that do not fit in usize are always over the ceiling.
        if usize::BITS < 64 {
            assert!(exceeds_ceiling(u64::MAX, usize::MAX));
        }
    }
}
