use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "userdesk")]
#[command(about = "Terminal UI for managing user records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a users API server
    Run {
        /// Base URL of the users API, overrides the config file
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Run with an in-memory store seeded with demo records
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}
