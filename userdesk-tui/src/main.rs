mod app;
mod cli;
mod config;
mod runtime;
mod ui;

use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::UserdeskConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;
use userdesk::{ApiClient, InMemoryUserStore, UserStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { api_url } => {
            init_tracing()?;
            let api_url = match api_url {
                Some(url) => url,
                None => UserdeskConfig::load()?.api_url,
            };
            let client = ApiClient::new(&api_url).context("Failed to set up API client")?;
            tracing::info!("using users API at {}", client.base_url());
            run(Arc::new(client), api_url).await
        }
        Commands::Dev => {
            init_tracing()?;
            tracing::info!("using in-memory store");
            run(
                Arc::new(InMemoryUserStore::seeded()),
                "dev (in-memory)".to_string(),
            )
            .await
        }
        Commands::ConfigPath => {
            let path = UserdeskConfig::config_path()?;
            if !path.exists() {
                UserdeskConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_tracing() -> Result<()> {
    let path = UserdeskConfig::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

async fn run(store: Arc<dyn UserStore>, source: String) -> Result<()> {
    let mut app = App::new(store, source);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("terminal UI failed: {:?}", err);
    }
    res
}
