use std::path::{Path, PathBuf};

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ExitError;

/// Config file name constant.
pub const CONFIG_TOML: &str = ".issueboard.toml";

/// Env var that overrides `repo.name`, matching the original workflow contract.
pub const REPO_ENV: &str = "REPO_NAME";
/// Env var supplying the API token. Never stored in the config file.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Find the config file in a directory. Returns None if it doesn't exist.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_TOML);
    if path.exists() { Some(path) } else { None }
}

/// Top-level `.issueboard.toml` config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub repo: RepoConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RepoConfig {
    /// Repository in "owner/name" form. Overridden by `REPO_NAME` or `--repo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// API root, overridable for GitHub Enterprise installs.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            name: None,
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchConfig {
    /// Maximum number of issues to fetch.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Issue state filter passed to the API.
    #[serde(default = "default_state")]
    pub state: String,
    /// Fetch timeline events to infer parents for issues without
    /// a `parent_issue_url`.
    #[serde(default = "default_true")]
    pub timeline: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            state: default_state(),
            timeline: true,
        }
    }
}

const fn default_limit() -> usize {
    200
}

fn default_state() -> String {
    "open".to_string()
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderConfig {
    /// Group child issues under their parents.
    #[serde(default = "default_true")]
    pub group_children: bool,
    /// Fetch Open Graph link previews for URLs in issue bodies.
    #[serde(default)]
    pub link_previews: bool,
    /// Cap on preview fetches per build.
    #[serde(default = "default_max_previews")]
    pub max_previews: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            group_children: true,
            link_previews: false,
            max_previews: default_max_previews(),
        }
    }
}

const fn default_max_previews() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Template file, relative to the project root.
    #[serde(default = "default_template")]
    pub template: String,
    /// Output file, relative to the project root.
    #[serde(default = "default_output")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            path: default_output(),
        }
    }
}

fn default_template() -> String {
    "template.html".to_string()
}

fn default_output() -> String {
    "index.html".to_string()
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ExitError::Config(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Load config from the project root, falling back to defaults when
    /// no config file exists.
    pub fn load_or_default(root: &Path) -> anyhow::Result<Self> {
        match find_config(root) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}

/// Resolve the repository name. Priority: CLI flag, `REPO_NAME` env,
/// config file.
pub fn resolve_repo(
    cli: Option<&str>,
    env: Option<&str>,
    config: Option<&str>,
) -> Result<String, ExitError> {
    cli.or(env)
        .or(config)
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ExitError::Config(format!(
                "repository not set: pass --repo, set {REPO_ENV}, or add repo.name to {CONFIG_TOML}"
            ))
        })
}

/// Read the API token from the environment.
pub fn token_from_env() -> Result<String, ExitError> {
    std::env::var(TOKEN_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or(ExitError::MissingEnv {
            name: TOKEN_ENV.to_string(),
        })
}
