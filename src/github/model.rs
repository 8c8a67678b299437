//! Serde models for the slices of the GitHub REST API we consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An issue as returned by `GET /repos/{owner}/{repo}/issues`.
///
/// The issues endpoint also returns pull requests; those records carry a
/// `pull_request` key and are filtered out by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub body: Option<String>,
    pub state: String,
    pub user: User,
    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
    /// Sub-issue parent link, present when the repository uses sub-issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_issue_url: Option<String>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// Six-digit hex color without the leading `#`.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A timeline event from `GET /repos/{owner}/{repo}/issues/{n}/timeline`.
///
/// Only the `cross-referenced` shape is modelled; all other event kinds
/// deserialize with `source: None` and are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEvent {
    pub event: String,
    #[serde(default)]
    pub source: Option<EventSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventSource {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub issue: Option<IssueRef>,
}

/// The referencing issue inside a `cross-referenced` event.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRef {
    pub number: u64,
    pub state: String,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}
