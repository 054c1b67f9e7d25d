pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "helpdesk-api")]
#[command(about = "Helpdesk ticketing backend - users and tickets over HTTP")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create tables if needed and serve the HTTP API (default)")]
    Serve {
        #[arg(long, help = "Address to bind (overrides HELPDESK_HOST)")]
        host: Option<String>,
        #[arg(long, help = "Port to bind (overrides HELPDESK_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Create the user and ticket tables, then exit")]
    InitDb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => commands::serve::handle(config, host, port).await,
        Commands::InitDb => commands::init_db::handle(config, output_format).await,
    }
}
