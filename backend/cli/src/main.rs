mod ask_cmd;
mod bootstrap;
mod chat_cmd;
mod config_cmd;
mod context_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use docchat_config::{config_dir, config_file_path, ValidationReport};
use docchat_logging::{init_logger, LogOutput};

use bootstrap::Startup;

#[derive(Parser)]
#[command(name = "docchat")]
#[command(about = "docchat: ask questions about a folder of documents")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.docchat/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Documents folder, overriding the config
    #[arg(long, global = true)]
    documents: Option<PathBuf>,

    /// Answer with a canned local provider instead of the remote service
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat page (default)
    Chat,
    /// Ask one question and print the answer
    Ask {
        /// The question
        question: String,
    },
    /// Print the documents found and the context built from them
    Context,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective config with secrets masked
    Show {
        /// Print JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let (mut config, report) = docchat_config::load_and_prepare(&config_path).await?;
    if let Some(dir) = cli.documents {
        config.documents.dir = Some(dir);
    }

    let command = cli.command.unwrap_or(Commands::Chat);

    // The TUI owns the terminal; log to the file only.
    let output = match command {
        Commands::Chat => LogOutput::FileOnly,
        _ => LogOutput::Console,
    };
    let log_dir = config
        .logging
        .dir
        .clone()
        .unwrap_or_else(|| config_dir().join("logs"));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    init_logger(
        &log_dir,
        config.logging.level.as_deref().unwrap_or("info"),
        output,
    );
    info!(config = %config_path.display(), "docchat starting");
    report.log();

    if let Commands::Config {
        action: ConfigAction::Show { json },
    } = command
    {
        return config_cmd::show(&config, &report, json);
    }

    ensure_valid(&report)?;
    let startup = Startup::prepare(&config, cli.offline)?;

    match command {
        Commands::Chat => chat_cmd::run(startup, &config, &report).await,
        Commands::Ask { question } => ask_cmd::run(startup, &question).await,
        Commands::Context => context_cmd::run(&startup),
        Commands::Config { .. } => Ok(()),
    }
}

fn ensure_valid(report: &ValidationReport) -> Result<()> {
    if report.is_valid() {
        return Ok(());
    }
    for error in &report.errors {
        terminal_output::note_error(&error.to_string());
    }
    anyhow::bail!(
        "Config has {} error(s); fix them or run `docchat config show`",
        report.errors.len()
    )
}
