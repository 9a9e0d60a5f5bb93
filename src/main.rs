mod api;
mod app;
mod cli;
mod client;
mod config;
mod inventory;
mod notify;
mod theme;
mod ui;
mod view;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{HttpApi, InventoryApi};
use app::{App, Popup};
use client::InventoryClient;
use config::AppConfig;
use notify::{Notifier, Severity, ToastNotifier};
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "swagtrackr")]
#[command(version = "0.1.0")]
#[command(about = "Track swag inventory: stock levels, checkouts and restocks")]
struct Args {
    /// Base URL of the inventory API (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<cli::Command>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so they never land inside the TUI or piped JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref())?;
    let api_url = args.api_url.unwrap_or_else(|| config.api_url.clone());
    let api = HttpApi::new(&api_url)?;

    // One-shot commands skip the TUI entirely
    if let Some(command) = args.command {
        return cli::run(command, api).await;
    }

    run_tui(api, &config).await?;
    Ok(ExitCode::SUCCESS)
}

async fn run_tui(api: HttpApi, config: &AppConfig) -> Result<()> {
    let source = api.base_url().to_string();
    let notifier = ToastNotifier::new(config.toast_lifetime(), config.notifications);
    let client = InventoryClient::new(api, notifier);
    let mut app = App::new(client, Theme::from_overrides(&config.theme), source);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = match app.refresh().await {
        Ok(()) => run_app(&mut terminal, &mut app).await,
        Err(e) => Err(e),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<A: InventoryApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<A>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            if let Err(e) = app.handle_key(key).await {
                                tracing::warn!("Key handler failed: {}", e);
                                app.client
                                    .notifier_mut()
                                    .notify(&format!("Error: {}", e), Severity::Warning);
                            }
                        }
                    }
                }
            }
        }

        app.tick();
    }
}
