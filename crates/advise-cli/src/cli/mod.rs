//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "advise")]
#[command(version)]
#[command(about = "Structured AI health advice toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Parse advice markdown into structured sections
    Parse {
        /// Markdown file to parse (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Print sections as pretty JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the advice prompt from a metrics snapshot
    Prompt {
        /// JSON file with the health-metrics snapshot
        #[arg(short, long)]
        metrics: PathBuf,

        /// User age in years
        #[arg(long)]
        age: Option<u32>,

        /// User gender
        #[arg(long)]
        gender: Option<String>,

        /// Free-form health self-description
        #[arg(long)]
        describe: Option<String>,

        /// Print the full completion request body instead of the prompt
        #[arg(long)]
        request: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Create a default config file
    Init,
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse { file, json } => commands::parse::run(file.as_deref(), json),
        Commands::Prompt {
            metrics,
            age,
            gender,
            describe,
            request,
        } => commands::prompt::run(&metrics, age, gender, describe, request),
        Commands::Config { command } => match command {
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Show => commands::config::show(),
        },
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
