//! The pipeline: fetch issues, link parents, render HTML, splice into the
//! template, write the page.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{debug, warn};

use crate::config::{self, Config};
use crate::github::Client;
use crate::github::model::Issue;
use crate::preview::{self, LinkPreview};
use crate::relations;
use crate::render::Renderer;
use crate::template;

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Project root directory
    #[arg(long)]
    pub project_root: Option<PathBuf>,
    /// Repository in "owner/name" form (overrides config and REPO_NAME)
    #[arg(long)]
    pub repo: Option<String>,
    /// Template file (overrides config)
    #[arg(long)]
    pub template: Option<PathBuf>,
    /// Output file (overrides config)
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Maximum number of issues to fetch (overrides config)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Fetch Open Graph link previews for URLs in issue bodies
    #[arg(long)]
    pub link_previews: bool,
    /// Render from a JSON issue dump instead of calling the API
    #[arg(long)]
    pub issues_file: Option<PathBuf>,
    /// Write the fetched issues as JSON for later replay
    #[arg(long)]
    pub dump_issues: Option<PathBuf>,
}

impl BuildArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let root = match self.project_root.clone() {
            Some(p) => p,
            None => std::env::current_dir().context("could not determine current directory")?,
        };
        let config = Config::load_or_default(&root)?;
        let env_repo = std::env::var(config::REPO_ENV).ok();

        let (issues, client) = if let Some(path) = &self.issues_file {
            let content = fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            let issues: Vec<Issue> = serde_json::from_str(&content)
                .with_context(|| format!("invalid issue dump {}", path.display()))?;
            let issues: Vec<Issue> =
                issues.into_iter().filter(|i| !i.is_pull_request()).collect();
            debug!(count = issues.len(), "loaded issues from dump");
            (issues, None)
        } else {
            let repo = config::resolve_repo(
                self.repo.as_deref(),
                env_repo.as_deref(),
                config.repo.name.as_deref(),
            )?;
            let token = config::token_from_env()?;
            let client = Client::new(&config.repo.api_url, &repo, &token);
            let limit = self.limit.unwrap_or(config.fetch.limit);
            let issues = client.fetch_issues(&config.fetch.state, limit)?;
            (issues, Some(client))
        };

        if let Some(path) = &self.dump_issues {
            let json = serde_json::to_string_pretty(&issues)?;
            fs::write(path, json)
                .with_context(|| format!("could not write {}", path.display()))?;
        }

        // Repo name for filtering self-links; may be absent in replay mode.
        let repo_name = config::resolve_repo(
            self.repo.as_deref(),
            env_repo.as_deref(),
            config.repo.name.as_deref(),
        )
        .unwrap_or_default();

        let parents = link_parents(&config, &issues, client.as_ref());
        let previews = self.collect_previews(&config, &issues, &repo_name);

        let total = issues.len();
        let forest = relations::build_forest(issues, &parents);
        let fragment = Renderer::new()?.render_fragment(&forest, &previews)?;

        let template_path = root.join(
            self.template
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.output.template)),
        );
        let content = fs::read_to_string(&template_path)
            .with_context(|| format!("could not read template {}", template_path.display()))?;
        let page = template::splice(&content, &fragment)?;

        let output_path = root.join(
            self.output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.output.path)),
        );
        let unchanged = fs::read_to_string(&output_path).is_ok_and(|existing| existing == page);
        if unchanged {
            println!("{} unchanged ({total} issue(s))", output_path.display());
        } else {
            fs::write(&output_path, &page)
                .with_context(|| format!("could not write {}", output_path.display()))?;
            println!(
                "Generated {} ({total} issue(s), {} top-level)",
                output_path.display(),
                forest.roots().len()
            );
        }
        Ok(())
    }

    fn collect_previews(
        &self,
        config: &Config,
        issues: &[Issue],
        repo: &str,
    ) -> BTreeMap<u64, LinkPreview> {
        let mut previews = BTreeMap::new();
        if !(self.link_previews || config.render.link_previews) {
            return previews;
        }

        let mut fetches = 0;
        for issue in issues {
            if fetches >= config.render.max_previews {
                break;
            }
            let Some(body) = issue.body.as_deref() else {
                continue;
            };
            let Some(url) = preview::first_external_url(body, repo) else {
                continue;
            };
            fetches += 1;
            match Client::fetch_page(&url) {
                Ok(html) => {
                    if let Some(p) = preview::from_html(&url, &html) {
                        previews.insert(issue.number, p);
                    }
                }
                Err(e) => debug!(%url, error = %e, "preview fetch failed; skipping"),
            }
        }
        previews
    }
}

/// Candidate parent links: `parent_issue_url` first, timeline second.
fn link_parents(
    config: &Config,
    issues: &[Issue],
    client: Option<&Client>,
) -> BTreeMap<u64, u64> {
    let mut parents = BTreeMap::new();
    if !config.render.group_children {
        return parents;
    }
    let present: BTreeSet<u64> = issues.iter().map(|i| i.number).collect();

    for issue in issues {
        if let Some(parent) = relations::parent_from_url(issue) {
            parents.insert(issue.number, parent);
        } else if config.fetch.timeline
            && let Some(client) = client
        {
            match client.fetch_timeline(issue.number) {
                Ok(events) => {
                    if let Some(parent) =
                        relations::parent_from_timeline(&events, client.repo(), &present)
                    {
                        parents.insert(issue.number, parent);
                    }
                }
                Err(e) => warn!(
                    number = issue.number,
                    error = %e,
                    "timeline fetch failed; issue stays a root"
                ),
            }
        }
    }
    parents
}
