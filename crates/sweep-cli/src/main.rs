use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use sweep_rewrite::Feature;
use tracing_subscriber::EnvFilter;

mod discover;
mod process;

use process::RunOptions;

#[derive(Parser)]
#[command(name = "scss-sweep")]
#[command(about = "Prune empty SCSS rules and tighten transitions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove rules and at-rules that have no content
    Clean(RunArgs),

    /// Narrow `transition: all 0.15s` to the properties pseudo-classes change
    Transitions(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Directory to search for .scss files (defaults to the current directory)
    dir: Option<PathBuf>,

    /// Copy every modified file to `<file>.bak` before rewriting it
    #[arg(short, long)]
    backup: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (feature, args) = match cli.command {
        Command::Clean(args) => (Feature::CleanEmptySelectors, args),
        Command::Transitions(args) => (Feature::RefactorTransitions, args),
    };

    init_logging(args.quiet);

    match run(feature, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("An error occurred: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(feature: Feature, args: RunArgs) -> anyhow::Result<()> {
    let target_dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to resolve the current directory")?,
    };
    if !target_dir.is_dir() {
        bail!("not a directory: {}", target_dir.display());
    }

    tracing::info!("scss-sweep: {}", feature.name());
    let options = RunOptions {
        target_dir,
        backups: args.backup,
    };
    process::run(feature, &options)?;
    Ok(())
}

/// `RUST_LOG` wins; otherwise `info`, or `warn` with `--quiet`.
fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
