//! prospectus CLI: chat with the university prospectus assistant

use clap::{Parser, Subcommand};
use prospectus_engine::{
    Answer, Config, Controller, MockProvider, ServiceReply, Session, Skip, SubmitOutcome,
    Transcript, DEFAULT_CONFIG_PATH, FALLBACK_TEXT,
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Ask questions about the university prospectus
#[derive(Parser)]
#[command(name = "prospectus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Write logs to this file instead of stderr (filtered by RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Ask a single question and print the conversation
    Ask {
        /// The question to ask
        question: String,

        /// Output the reply as JSON (`question`, `answer`, `source_pages`, `session_id`)
        #[arg(long)]
        json: bool,
    },

    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        None | Some(Commands::Tui) => cmd_tui(&cli.config),
        Some(Commands::Ask { question, json }) => cmd_ask(&cli.config, &question, json),
        Some(Commands::Init { force }) => cmd_init(&cli.config, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(log_file: Option<&Path>) -> std::io::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        // Keep stdout clean for `ask` output.
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn cmd_tui(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(config_path)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(prospectus_tui::run_tui(&config))
}

fn cmd_ask(
    config_path: &Path,
    question: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(config_path)?;
    let provider = Arc::new(MockProvider::from_config(&config.mock));
    let mut controller = Controller::new(Session::start(), provider, Transcript::new());

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(controller.submit(question));

    if let SubmitOutcome::Skipped(Skip::Empty) = outcome {
        return Err("question is empty".into());
    }

    if json {
        let question = question.trim();
        let reply = match outcome.answer() {
            Some(message) => {
                let answer = Answer::new(message.text.clone(), message.sources.iter().copied());
                ServiceReply::answered(question, &answer, controller.session().id())
            }
            None => ServiceReply::error(FALLBACK_TEXT, Some(question)),
        };
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        print!("{}", controller.surface().to_plain_text());
    }

    if let SubmitOutcome::Failed = outcome {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if config_path.exists() && !force {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    Config::default().save(config_path)?;
    tracing::debug!(path = %config_path.display(), force, "config written");
    println!("Created {}", config_path.display());
    Ok(())
}
