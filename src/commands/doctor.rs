//! Validate a project before a build: config, env, template markers, output.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::config::{self, CONFIG_TOML, Config};
use crate::error::ExitError;
use crate::template;

#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Project root directory
    #[arg(long)]
    pub project_root: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Text,
    Json,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DoctorReport {
    pub config_found: bool,
    pub repo: Option<String>,
    pub api_url: Option<String>,
    pub token_present: bool,
    pub template: FileCheck,
    pub markers_ok: bool,
    pub output: FileCheck,
    pub problems: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileCheck {
    pub path: String,
    pub exists: bool,
}

impl DoctorArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let root = match self.project_root.clone() {
            Some(p) => p,
            None => std::env::current_dir().context("could not determine current directory")?,
        };

        let report = run_checks(&root);

        match self.format.unwrap_or(OutputFormat::Pretty) {
            OutputFormat::Pretty => print_pretty(&report),
            OutputFormat::Text => print_text(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }

        if report.problems.is_empty() {
            Ok(())
        } else {
            Err(ExitError::DoctorFailed.into())
        }
    }
}

fn run_checks(root: &Path) -> DoctorReport {
    let mut problems = Vec::new();

    let config_path = config::find_config(root);
    let config_found = config_path.is_some();
    let config = match &config_path {
        Some(path) => match Config::load(path) {
            Ok(config) => Some(config),
            Err(e) => {
                problems.push(format!("config does not parse: {e:#}"));
                None
            }
        },
        None => {
            problems.push(format!("no {CONFIG_TOML} in {}", root.display()));
            None
        }
    };
    let config = config.unwrap_or_default();

    let env_repo = std::env::var(config::REPO_ENV).ok();
    let repo = config::resolve_repo(None, env_repo.as_deref(), config.repo.name.as_deref()).ok();
    if repo.is_none() {
        problems.push(format!(
            "repository not set (repo.name in {CONFIG_TOML} or {} env var)",
            config::REPO_ENV
        ));
    }

    let token_present = config::token_from_env().is_ok();
    if !token_present {
        problems.push(format!("{} is not set", config::TOKEN_ENV));
    }

    let template_path = root.join(&config.output.template);
    let template_exists = template_path.exists();
    let mut markers_ok = false;
    if template_exists {
        match std::fs::read_to_string(&template_path) {
            Ok(content) => match template::validate(&content) {
                Ok(()) => markers_ok = true,
                Err(e) => problems.push(format!("{e}")),
            },
            Err(e) => problems.push(format!(
                "could not read {}: {e}",
                template_path.display()
            )),
        }
    } else {
        problems.push(format!(
            "template {} does not exist (run `issueboard init`)",
            template_path.display()
        ));
    }

    let output_path = root.join(&config.output.path);
    let output_dir_ok = output_path.parent().is_none_or(Path::exists);
    if !output_dir_ok {
        problems.push(format!(
            "output directory for {} does not exist",
            output_path.display()
        ));
    }

    DoctorReport {
        config_found,
        repo,
        api_url: Some(config.repo.api_url),
        token_present,
        template: FileCheck {
            path: config.output.template,
            exists: template_exists,
        },
        markers_ok,
        output: FileCheck {
            path: config.output.path,
            exists: output_dir_ok,
        },
        problems,
    }
}

fn print_pretty(report: &DoctorReport) {
    println!("=== Issueboard Doctor ===\n");
    println!("Config found: {}", mark(report.config_found));
    println!(
        "Repository:   {}",
        report.repo.as_deref().unwrap_or("(not set)")
    );
    println!("Token in env: {}", mark(report.token_present));
    println!(
        "Template:     {} {}",
        report.template.path,
        mark(report.template.exists && report.markers_ok)
    );
    println!("Output dir:   {}", mark(report.output.exists));

    if report.problems.is_empty() {
        println!("\nAll checks passed.");
    } else {
        println!("\nProblems:");
        for problem in &report.problems {
            println!("  • {problem}");
        }
    }
}

fn print_text(report: &DoctorReport) {
    println!("config-found  {}", report.config_found);
    println!("repo  {}", report.repo.as_deref().unwrap_or("-"));
    println!("token-present  {}", report.token_present);
    println!(
        "template  path={}  exists={}  markers-ok={}",
        report.template.path, report.template.exists, report.markers_ok
    );
    println!("output  path={}  dir-exists={}", report.output.path, report.output.exists);
    for problem in &report.problems {
        println!("problem  {problem}");
    }
}

const fn mark(ok: bool) -> &'static str {
    if ok { "ok" } else { "MISSING" }
}
