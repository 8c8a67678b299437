//! Thin synchronous GitHub REST client. One page at a time, no retries.

pub mod model;

use anyhow::Context;
use tracing::debug;

use crate::error::ExitError;
use model::{Issue, TimelineEvent};

const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("issueboard/", env!("CARGO_PKG_VERSION"));

pub struct Client {
    api_url: String,
    repo: String,
    token: String,
}

impl Client {
    pub fn new(api_url: &str, repo: &str, token: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
            token: token.to_string(),
        }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Fetch issues, paging until `limit` is reached or the listing is
    /// exhausted. Pull requests are filtered out.
    pub fn fetch_issues(&self, state: &str, limit: usize) -> anyhow::Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut page = 1;

        while issues.len() < limit {
            let url = format!(
                "{}/repos/{}/issues?state={state}&per_page={PER_PAGE}&page={page}",
                self.api_url, self.repo
            );
            let body = self.get(&url)?;
            let batch: Vec<Issue> = serde_json::from_str(&body)
                .with_context(|| format!("unexpected issue list payload from {url}"))?;
            let exhausted = batch.len() < PER_PAGE;

            for issue in batch {
                if issue.is_pull_request() {
                    continue;
                }
                issues.push(issue);
                if issues.len() == limit {
                    break;
                }
            }

            if exhausted {
                break;
            }
            page += 1;
        }

        debug!(count = issues.len(), repo = %self.repo, "fetched issues");
        Ok(issues)
    }

    /// Fetch timeline events for one issue. Only the first page is read;
    /// parent inference needs the earliest cross-reference, not all of them.
    pub fn fetch_timeline(&self, number: u64) -> anyhow::Result<Vec<TimelineEvent>> {
        let url = format!(
            "{}/repos/{}/issues/{number}/timeline?per_page={PER_PAGE}",
            self.api_url, self.repo
        );
        let body = self.get(&url)?;
        let events: Vec<TimelineEvent> = serde_json::from_str(&body)
            .with_context(|| format!("unexpected timeline payload from {url}"))?;
        Ok(events)
    }

    /// Fetch an arbitrary page body for link previews. No auth header is
    /// sent: these are external URLs found in issue bodies.
    pub fn fetch_page(url: &str) -> anyhow::Result<String> {
        let body = ureq::get(url)
            .header("User-Agent", USER_AGENT)
            .call()?
            .into_body()
            .read_to_string()?;
        Ok(body)
    }

    fn get(&self, url: &str) -> anyhow::Result<String> {
        debug!(%url, "GET");
        let auth = format!("Bearer {}", self.token);
        let result = ureq::get(url)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", auth.as_str())
            .header("User-Agent", USER_AGENT)
            .call();

        match result {
            Ok(response) => {
                let body = response.into_body().read_to_string()?;
                Ok(body)
            }
            Err(ureq::Error::StatusCode(status)) => Err(ExitError::Api {
                status,
                url: url.to_string(),
            }
            .into()),
            Err(e) => Err(anyhow::Error::new(e).context(format!("request to {url} failed"))),
        }
    }
}
