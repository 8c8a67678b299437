//! Parent/child reconstruction over the fetched issue set.
//!
//! Two sources of evidence, in precedence order:
//! 1. `parent_issue_url` on the issue itself (sub-issues API).
//! 2. The earliest `cross-referenced` timeline event whose source is an
//!    open, non-PR issue in the same repository.
//!
//! Links to issues outside the fetched set are dropped (the child stays a
//! root), as are self-references and any link that would close a cycle.

use std::collections::{BTreeMap, BTreeSet};

use crate::github::model::{Issue, TimelineEvent};

/// The fetched issues arranged as a forest.
#[derive(Debug)]
pub struct IssueForest {
    issues: BTreeMap<u64, Issue>,
    children: BTreeMap<u64, Vec<u64>>,
    roots: Vec<u64>,
}

impl IssueForest {
    /// Roots, in API listing order (most recently updated first).
    pub fn roots(&self) -> &[u64] {
        &self.roots
    }

    /// Direct children of an issue, sorted by number ascending.
    pub fn children(&self, number: u64) -> &[u64] {
        self.children.get(&number).map_or(&[], Vec::as_slice)
    }

    pub fn issue(&self, number: u64) -> Option<&Issue> {
        self.issues.get(&number)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Parse the parent issue number out of a `parent_issue_url`
/// (e.g. `https://api.github.com/repos/o/r/issues/42` -> 42).
pub fn parent_from_url(issue: &Issue) -> Option<u64> {
    let url = issue.parent_issue_url.as_deref()?;
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let number = segments.next()?.parse().ok()?;
    if segments.next() != Some("issues") {
        return None;
    }
    Some(number)
}

/// Infer a parent from timeline events: the first `cross-referenced` event
/// whose source issue is an open, non-PR issue of `repo` that is in the
/// fetched set.
pub fn parent_from_timeline(
    events: &[TimelineEvent],
    repo: &str,
    present: &BTreeSet<u64>,
) -> Option<u64> {
    let repo_suffix = format!("/repos/{repo}");
    for event in events {
        if event.event != "cross-referenced" {
            continue;
        }
        let Some(issue) = event.source.as_ref().and_then(|s| s.issue.as_ref()) else {
            continue;
        };
        if issue.pull_request.is_some() || issue.state != "open" {
            continue;
        }
        let same_repo = issue
            .repository_url
            .as_deref()
            .is_some_and(|u| u.trim_end_matches('/').ends_with(&repo_suffix));
        if same_repo && present.contains(&issue.number) {
            return Some(issue.number);
        }
    }
    None
}

/// Assemble the forest from issues plus candidate parent links.
///
/// Links are accepted in ascending child-number order; a link is rejected
/// when its parent is missing from the set, equals the child, or when the
/// accepted links already connect the parent back to the child.
pub fn build_forest(issues: Vec<Issue>, parents: &BTreeMap<u64, u64>) -> IssueForest {
    let order: Vec<u64> = issues.iter().map(|i| i.number).collect();
    let map: BTreeMap<u64, Issue> = issues.into_iter().map(|i| (i.number, i)).collect();

    let mut accepted: BTreeMap<u64, u64> = BTreeMap::new();
    for (&child, &parent) in parents {
        if parent == child || !map.contains_key(&parent) || !map.contains_key(&child) {
            continue;
        }
        if reaches(&accepted, parent, child) {
            tracing::warn!(child, parent, "dropping parent link that would form a cycle");
            continue;
        }
        accepted.insert(child, parent);
    }

    let mut children: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
    for (&child, &parent) in &accepted {
        children.entry(parent).or_default().push(child);
    }

    let roots = order
        .into_iter()
        .filter(|n| !accepted.contains_key(n))
        .collect();

    IssueForest {
        issues: map,
        children,
        roots,
    }
}

/// Walk accepted parent links upward from `from`; true if `target` is an
/// ancestor. Accepted links are acyclic, so this terminates.
fn reaches(accepted: &BTreeMap<u64, u64>, from: u64, target: u64) -> bool {
    let mut current = from;
    while let Some(&parent) = accepted.get(&current) {
        if parent == target {
            return true;
        }
        current = parent;
    }
    current == target
}
