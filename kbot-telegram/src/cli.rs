//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kbot")]
#[command(about = "Knowledge relay bot CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay (config from env; token overrides TELEGRAM_ACCESS_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}
