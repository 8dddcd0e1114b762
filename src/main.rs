//! ReelTUI - movie catalog browser for the terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! reeltui
//! reeltui --route /search
//!
//! # CLI mode (for automation)
//! reeltui search "dark" --json
//! reeltui info 1
//! reeltui downloads --status downloading
//! ```

use std::fs::{self, File};
use std::io::{self, stdout, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use reeltui::api::{InMemoryCatalog, InMemoryDownloads};
use reeltui::app::App;
use reeltui::cli::{Cli, Command, ExitCode, Output};
use reeltui::config::Config;
use reeltui::route::Route;
use reeltui::{commands, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// One frame at ~60 fps
const FRAME: Duration = Duration::from_millis(16);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(!cli.is_cli_mode());

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        let start = cli.route.as_deref().map(Route::parse).transpose()?;
        run_tui(config, start).await
    }
}

// =============================================================================
// Logging
// =============================================================================

fn log_file() -> Option<File> {
    let dir = dirs::cache_dir()?.join("reeltui");
    fs::create_dir_all(&dir).ok()?;
    File::options()
        .create(true)
        .append(true)
        .open(dir.join("reeltui.log"))
        .ok()
}

/// CLI output goes to stdout, so logs go to stderr; the TUI owns the
/// terminal, so logs go to a file.
fn init_tracing(tui: bool) {
    let default_level = if tui { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if !tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(io::stderr)
            .init();
        return;
    }

    match log_file() {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
}

// =============================================================================
// CLI Mode
// =============================================================================

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);
    let catalog = InMemoryCatalog::with_latency(config.search.latency());
    let downloads = InMemoryDownloads::new();

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &catalog, &output).await,
        Some(Command::Home(cmd)) => commands::home_cmd(cmd, &catalog, &output).await,
        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &catalog, &output).await,
        Some(Command::Downloads(cmd)) => commands::downloads_cmd(cmd, &downloads, &output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: Config, start: Option<Route>) -> Result<()> {
    let mut app = App::new(&config)?;
    app.load().await;
    if let Some(route) = start {
        app.navigate(route);
    }
    info!(route = %app.route, "starting tui");

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, advances animation, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut last_frame = Instant::now();

    while app.running {
        let size = terminal.size()?;
        let content = ui::content_area(Rect::new(0, 0, size.width, size.height));
        app.set_viewport(content.width, content.height);

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(FRAME)? {
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                _ => {}
            }
        }

        app.process_pending().await;

        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;
    }

    info!("tui exited");
    Ok(())
}
