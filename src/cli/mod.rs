//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments and dispatches onto the
//! settings store, API client, and chat session layers.

pub mod ask;
pub mod chat;
pub mod settings_cmd;

use std::error::Error;

use clap::{Parser, Subcommand, ValueEnum};

use crate::api::ApiClient;
use crate::core::settings::Variant;
use self::settings_cmd::SettingsAction;

#[derive(Parser)]
#[command(name = "contextiq")]
#[command(about = "Terminal client for the ContextIQ workspace assistant demo")]
#[command(
    long_about = "ContextIQ is a demo workspace assistant. This client keeps your local \
settings and talks to the optional backend for chat and Discord linking.\n\n\
Environment Variables:\n\
  CONTEXTIQ_BASE_URL   Backend base URL (optional; when unset, network \
features show guidance instead of attempting requests)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Which client variant's settings to operate on
    #[arg(long, global = true, value_enum, default_value_t = VariantArg::Web)]
    pub variant: VariantArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Web,
    Mobile,
}

impl From<VariantArg> for Variant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Web => Variant::Web,
            VariantArg::Mobile => Variant::Mobile,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (default)
    Chat,
    /// Ask a single question and print the reply
    Ask {
        /// The question to send
        #[arg(trailing_var_arg = true)]
        prompt: Vec<String>,
    },
    /// Check backend health
    Health,
    /// Open the Discord connect flow in your browser
    Connect,
    /// List Discord guilds connected to the backend
    Guilds,
    /// Inspect or change local settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let variant = Variant::from(args.variant);

    match args.command {
        None | Some(Commands::Chat) => chat::run_chat().await,
        Some(Commands::Ask { prompt }) => ask::run_ask(prompt).await,
        Some(Commands::Health) => {
            let status = ApiClient::from_env().health().await;
            if status.ok {
                println!("Backend is up.");
            } else {
                println!(
                    "Backend is down: {}",
                    status.error.unwrap_or_else(|| "unknown".to_string())
                );
            }
            Ok(())
        }
        Some(Commands::Connect) => {
            let client = ApiClient::from_env();
            let url = client.discord_login_url()?;
            match client.connect_discord() {
                Ok(()) => println!("Opened {url} in your browser."),
                Err(err) => {
                    // Browser launch is best effort; the URL still works.
                    eprintln!("Could not open a browser ({err}).");
                    println!("Visit {url} to connect Discord.");
                }
            }
            Ok(())
        }
        Some(Commands::Guilds) => {
            let rows = ApiClient::from_env().connected_guilds().await?;
            if rows.is_empty() {
                println!("No connected guilds.");
            } else {
                for row in rows {
                    println!("{}", serde_json::to_string_pretty(&row)?);
                }
            }
            Ok(())
        }
        Some(Commands::Settings { action }) => settings_cmd::run_settings(action, variant),
    }
}
