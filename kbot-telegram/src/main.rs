//! Binary for the knowledge relay bot: load config, init tracing, build components,
//! run the REPL. A config failure here is fatal; nothing else is.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use kbot_telegram::{build_chain, build_components, run_repl, Cli, Commands, RelayConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = RelayConfig::load(token)?;
            config.validate()?;

            if let Some(parent) = Path::new(&config.log_file).parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory for {}", config.log_file))?;
            }
            kbot_core::init_tracing(&config.log_file)?;

            info!(
                model = %config.chatgpt_model,
                knowledge_path = %config.knowledge_path,
                "Initializing relay"
            );

            let components = build_components(&config)?;
            let chain = build_chain(&components);

            info!("Relay started successfully");

            run_repl(
                components.teloxide_bot.clone(),
                chain,
                components.reply_bot.clone(),
            )
            .await
        }
    }
}
