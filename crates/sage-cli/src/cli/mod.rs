//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sage_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "sage")]
#[command(version)]
#[command(about = "Terminal client for the Sage health assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend URL (overrides config and SAGE_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage chat sessions on the backend
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Sends one message and prints the reply
    Ask {
        /// The message to send
        #[arg(value_name = "MESSAGE")]
        message: String,
    },
    /// Uploads an image or PDF for analysis
    Upload {
        /// Path of the file to upload
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Caption sent with the file
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Checks that the backend is reachable
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SessionCommands {
    /// Lists sessions, newest first
    List,
    /// Prints the messages of a session
    Show {
        #[arg(value_name = "SESSION_ID")]
        id: i64,
    },
    /// Deletes a session
    Delete {
        #[arg(value_name = "SESSION_ID")]
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, base_url } = cli;

    // Config commands never load the config file
    if let Some(Commands::Config { command }) = &command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let mut config = config::Config::load().context("load config")?;
    if let Some(url) = base_url {
        config.base_url = url;
    }
    let _log_guard = logging::init(&config.logging).context("init logging")?;

    // default to chat mode
    let Some(command) = command else {
        return sage_tui::run_interactive_chat(&config).context("interactive chat failed");
    };

    let client = commands::client(&config)?;
    match command {
        Commands::Sessions { command } => match command {
            SessionCommands::List => commands::sessions::list(&client).await,
            SessionCommands::Show { id } => commands::sessions::show(&client, &config, id).await,
            SessionCommands::Delete { id, yes } => {
                commands::sessions::delete(&client, id, yes).await
            }
        },
        Commands::Ask { message } => commands::ask::run(&client, &config, &message).await,
        Commands::Upload { file, message } => {
            commands::upload::run(&client, &config, &file, message.as_deref().unwrap_or("")).await
        }
        Commands::Health => commands::health::run(&client).await,
        Commands::Config { .. } => Ok(()),
    }
}
