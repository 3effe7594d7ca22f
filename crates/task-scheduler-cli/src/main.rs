use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use task_scheduler_cli::{demo_script, render, replay, CliConfig, OutputFormat, Script};
use task_scheduler_core::{Scheduler, UnknownTaskPolicy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tsched")]
#[command(about = "Priority task scheduler script runner", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tsched.yaml")]
    config: PathBuf,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Fail when reprioritizing a task that is not pending
    #[arg(long)]
    reject_unknown: bool,

    /// Log level used when RUST_LOG is unset (overrides config)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay an operation script (YAML, or JSON for .json files)
    Run {
        /// Script file
        script: PathBuf,
    },

    /// Replay the built-in reprioritization demo
    Demo,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_found = args.config.exists();
    let mut config = if config_found {
        CliConfig::from_file(&args.config)
            .with_context(|| format!("failed to load config {}", args.config.display()))?
    } else {
        CliConfig::default()
    };

    // Override with CLI args
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }
    if args.reject_unknown {
        config.scheduler.unknown_task = UnknownTaskPolicy::Reject;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if !config_found {
        tracing::warn!("Config file {} not found, using defaults", args.config.display());
    }
    tracing::debug!("Running with config: {:?}", config);

    let script = match &args.command {
        Commands::Run { script } => load_script(script)?,
        Commands::Demo => demo_script(),
    };

    let mut scheduler = Scheduler::with_config(config.scheduler.clone())?;
    let dispatched = replay(&mut scheduler, &script)?;

    println!("{}", render(&dispatched, config.format)?);
    if !scheduler.is_empty() {
        tracing::info!("{} task(s) still pending", scheduler.len());
    }

    Ok(())
}

fn load_script(path: &Path) -> anyhow::Result<Script> {
    Script::from_file(path).with_context(|| format!("failed to load script {}", path.display()))
}
