mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use ngsetup_schematics::{
    resolve_project, run_schematic, Schematic, SchematicError, SchematicOptions, VersionResolver,
};
use ngsetup_tree::VirtualTree;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ngsetup",
    version,
    about = "Install workspace tooling (Prettier, Lefthook, Vitest, ESLint) into an Angular workspace."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Full installation: tool rules, dependency normalization, install task.
    Add(RunArgs),
    /// Tooling files and manifest edits only; you manage installation.
    Setup(RunArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Workspace root (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Target project in angular.json (default: the sole project).
    #[arg(long)]
    project: Option<String>,

    /// Stage and preview everything, write nothing.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print the unified diff before committing.
    #[arg(long, default_value_t = false)]
    diff: bool,

    /// Skip the delegated ESLint setup.
    #[arg(long, default_value_t = false)]
    no_eslint: bool,

    /// Skip Prettier.
    #[arg(long, default_value_t = false)]
    no_prettier: bool,

    /// Skip Lefthook.
    #[arg(long, default_value_t = false)]
    no_lefthook: bool,

    /// Skip the Vitest migration.
    #[arg(long, default_value_t = false)]
    no_vitest: bool,
}

/// CLI-level error split: workspace-precondition failures exit 2, everything
/// else exits 1.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Schematic(#[from] SchematicError),

    #[error(transparent)]
    Runtime(#[from] anyhow::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Schematic(e) => e.exit_code(),
            CliError::Runtime(_) => 1,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (schematic, args) = match cli.cmd {
        Command::Add(args) => (Schematic::Add, args),
        Command::Setup(args) => (Schematic::Setup, args),
    };

    let config = config::load_or_default(&args.root)
        .context("load ngsetup.toml")
        .map_err(CliError::Runtime)?;
    let versions = VersionResolver::with_pins(config.versions.clone());

    let mut tree = VirtualTree::at(args.root.clone());
    let project = resolve_project(&tree, args.project.as_deref())?;

    let options = SchematicOptions {
        project,
        eslint: config.tools.eslint && !args.no_eslint,
        prettier: config.tools.prettier && !args.no_prettier,
        lefthook: config.tools.lefthook && !args.no_lefthook,
        vitest: config.tools.vitest && !args.no_vitest,
    };

    let run = run_schematic(schematic, &mut tree, &options, &versions)?;

    if args.dry_run || args.diff {
        let patch = tree
            .diff()
            .map_err(|e| CliError::Runtime(anyhow::Error::from(e).context("render diff")))?;
        if patch.is_empty() {
            info!("nothing to change");
        } else {
            print!("{patch}");
        }
    }

    if args.dry_run {
        info!("dry-run: no files written");
    } else {
        let changes = tree
            .commit()
            .map_err(|e| CliError::Runtime(anyhow::Error::from(e).context("commit staged changes")))?;
        if changes.is_empty() {
            info!("workspace already up to date");
        } else {
            for change in &changes.changes {
                info!("{}: {}", change.kind, change.path);
            }
            info!("applied {} changes ({})", changes.len(), changes.summary());
        }
    }

    for task in &run.tasks {
        info!("follow-up: {task}");
    }

    Ok(())
}
