//! Scaffold a new issueboard project: config file plus starter template.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use dialoguer::{Confirm, Input};
use minijinja::{Environment, context};

use crate::config::{self, CONFIG_TOML, Config};

const PAGE_TEMPLATE: &str = include_str!("templates/page.html.jinja");

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project root directory
    #[arg(long)]
    pub project_root: Option<PathBuf>,
    /// Repository in "owner/name" form
    #[arg(long)]
    pub repo: Option<String>,
    /// Accept defaults without prompting
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl InitArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let root = match self.project_root.clone() {
            Some(p) => p,
            None => std::env::current_dir().context("could not determine current directory")?,
        };

        let env_repo = std::env::var(config::REPO_ENV).ok();
        let repo = match (self.repo.clone().or(env_repo), self.yes) {
            (Some(repo), _) => repo,
            (None, true) => "owner/repo".to_string(),
            (None, false) => Input::new()
                .with_prompt("Repository (owner/name)")
                .interact_text()?,
        };

        let config_path = root.join(CONFIG_TOML);
        if config_path.exists() {
            let overwrite = !self.yes
                && Confirm::new()
                    .with_prompt(format!("{CONFIG_TOML} exists, overwrite?"))
                    .default(false)
                    .interact()?;
            if overwrite {
                write_config(&config_path, &repo)?;
            } else {
                println!("Keeping existing {CONFIG_TOML}");
            }
        } else {
            write_config(&config_path, &repo)?;
        }

        let config = Config::load(&config_path)?;
        let template_path = root.join(&config.output.template);
        if template_path.exists() {
            println!("Keeping existing {}", config.output.template);
        } else {
            let mut env = Environment::new();
            env.add_template("page.html", PAGE_TEMPLATE)?;
            let page = env
                .get_template("page.html")?
                .render(context! { title => &repo })?;
            fs::write(&template_path, page)
                .with_context(|| format!("could not write {}", template_path.display()))?;
            println!("Created {}", config.output.template);
        }

        println!("\nNext steps:");
        println!("  1. export {}=<personal access token>", config::TOKEN_ENV);
        println!("  2. issueboard build");
        Ok(())
    }
}

fn write_config(path: &std::path::Path, repo: &str) -> anyhow::Result<()> {
    let mut config = Config::default();
    config.repo.name = Some(repo.to_string());
    let toml = toml::to_string_pretty(&config)?;
    fs::write(path, toml).with_context(|| format!("could not write {}", path.display()))?;
    println!("Created {CONFIG_TOML}");
    Ok(())
}
