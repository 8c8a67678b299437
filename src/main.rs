mod commands;
mod config;
mod error;
mod github;
mod preview;
mod relations;
mod render;
mod telemetry;
mod template;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::build::BuildArgs;
use commands::doctor::DoctorArgs;
use commands::init::InitArgs;

#[derive(Debug, Parser)]
#[command(
    name = "issueboard",
    version,
    about = "Generate a static HTML page from a GitHub repository's open issues"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch issues, render HTML, and write the page
    Build(BuildArgs),
    /// Initialize a project (config file and starter template)
    Init(InitArgs),
    /// Validate project config, env, and template markers
    Doctor(DoctorArgs),
    /// Print the JSON Schema for .issueboard.toml
    Schema,
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Build(_) => "build",
            Self::Init(_) => "init",
            Self::Doctor(_) => "doctor",
            Self::Schema => "schema",
        }
    }
}

fn main() -> ExitCode {
    telemetry::init();

    let cli = Cli::parse();

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Init(args) => args.execute(),
        Commands::Doctor(args) => args.execute(),
        Commands::Schema => commands::schema::run_schema(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(exit_err) = e.downcast_ref::<error::ExitError>() {
                eprintln!("error: {exit_err}");
                exit_err.exit_code()
            } else {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        }
    }
}
