use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use issue_bridge::commands::{fixed_issues_command, issues_command, list_providers_command};
use issue_bridge::{init_logging, resolve_config};

/// Code-health issue bridge CLI.
///
/// This CLI is a thin wrapper around `issue-bridge-core` (exposed in code as
/// `issue_bridge_core`). It loads persisted execution snapshots and prints the
/// canonical issues each registered provider reports for them.
#[derive(Parser, Debug)]
#[command(
    name = "issue-bridge",
    version,
    about = "Normalize static-analysis results into code-health issues",
    long_about = None
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Path to an issue-bridge JSON config. Defaults to ./issue-bridge.json when present.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered issue providers and their dashboard metadata.
    Providers {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the issues present on an execution.
    ///
    /// Reports every enabled origin unless `--origin` (or the config's default
    /// origin) narrows it down. Origins whose tool did not run report no issues.
    Issues {
        /// Execution snapshot file (JSON, or YAML with a .yaml/.yml extension).
        #[arg(long)]
        execution: String,

        /// Restrict the report to one origin (e.g. `pmd`).
        #[arg(long)]
        origin: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show issues fixed since the previous execution.
    ///
    /// Providers that cannot correlate executions say so instead of reporting
    /// an empty list.
    Fixed {
        /// Execution snapshot file (JSON, or YAML with a .yaml/.yml extension).
        #[arg(long)]
        execution: String,

        /// Origin to compare (e.g. `pmd`).
        #[arg(long)]
        origin: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = resolve_config(cli.config.as_deref())?;

    // Default to listing providers if no command is given.
    match cli.command.unwrap_or(Command::Providers { json: false }) {
        Command::Providers { json } => list_providers_command(&config, json)?,
        Command::Issues { execution, origin, json } => {
            issues_command(Path::new(&execution), origin.as_deref(), &config, json)?
        }
        Command::Fixed { execution, origin, json } => {
            fixed_issues_command(Path::new(&execution), Some(&origin), &config, json)?
        }
    }

    Ok(())
}
