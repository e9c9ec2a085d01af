use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use storage_tui::app::App;
use storage_tui::catalog::{CatalogProvider, StaticProvider};
use storage_tui::config::Config;
use storage_tui::events::handle_events;
use storage_tui::logging;
use storage_tui::ui::Screen;

/// Browse subscriptions, storage accounts, containers and blobs.
#[derive(Debug, Parser)]
#[command(name = "storage-tui", version, about)]
struct Cli {
    /// Config file (default: <config dir>/storage-tui/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON catalog to browse instead of the built-in sample
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Load accounts only when a subscription is expanded
    #[arg(long)]
    lazy: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "storage_tui=trace"
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if self.fixture.is_some() {
            config.fixture = self.fixture;
        }
        if self.lazy {
            config.eager_expand = false;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let config = cli.apply(config);

    logging::init(&config.log_path(), &config.log_level)?;
    tracing::info!(?config, "starting");

    let provider: Arc<dyn CatalogProvider> = match &config.fixture {
        Some(path) => Arc::new(StaticProvider::from_json_file(path)?),
        None => Arc::new(StaticProvider::sample()),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(provider, config.eager_expand);

    // Main loop
    let res = run_app(&mut terminal, &mut app, config.tick_rate()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("{:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    let mut screen = Screen::default();
    app.reload().await;

    loop {
        app.sync_view(&mut screen);
        terminal
            .draw(|f| screen.render(f))
            .context("Failed to draw frame")?;

        handle_events(app, tick).await?;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
