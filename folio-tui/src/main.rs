//! Folio TUI - a terminal rendition of a creative portfolio page.
//!
//! Hero, about, a filterable project gallery with a modal viewer, an
//! animated education timeline and a footer, all in one scrolling page.

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use folio_tui::app::{App, AppConfig};
use folio_tui::gallery::Gallery;
use folio_tui::models::{default_education, Catalog, CatalogKind};
use folio_tui::{markup, ui};

/// Frame rate for animations (approximately 30 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(33);

#[derive(Debug, Parser)]
#[command(name = "folio-tui", version, about = "Browse a creative portfolio in the terminal")]
struct Cli {
    /// Built-in project list
    #[arg(long, value_enum, default_value_t = CatalogKind::Home)]
    catalog: CatalogKind,

    /// TOML file with [[projects]] tables, replaces the built-in list
    #[arg(long, value_name = "FILE")]
    projects: Option<PathBuf>,

    /// Initial filter, e.g. "photography" or "video editing"
    #[arg(long, value_name = "NAME", default_value = "all")]
    category: String,

    /// Hide the about section and its hero button
    #[arg(long)]
    no_about: bool,

    /// Write the projects section as HTML and exit
    #[arg(long, value_name = "FILE")]
    export_html: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

/// Main entry point
fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install().ok();

    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio-tui")
            .join("logs")
    });
    // Guard must live until the end of main so buffered lines get flushed.
    // Without a usable log directory the app still runs, just unlogged.
    let _log_guard = match init_logging(&log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {:#}", e);
            None
        }
    };

    let catalog = match &cli.projects {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load projects from {}", path.display()))?,
        None => Catalog::builtin(cli.catalog),
    };
    info!(projects = catalog.len(), category = %cli.category, "starting");

    if let Some(path) = &cli.export_html {
        return export_html(catalog, &cli.category, path);
    }

    let mut app = App::new(AppConfig {
        catalog,
        education: default_education(),
        show_about: !cli.no_about,
    });
    app.set_category_name(&cli.category)
        .context("Invalid --category")?;
    run_tui(app)
}

/// Daily rolling log file inside `log_dir`, created if missing
fn log_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("folio-tui.log")
        .build(log_dir)
        .with_context(|| format!("Failed to open log directory {}", log_dir.display()))
}

fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(log_appender(log_dir)?);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,folio_tui=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}

/// Render the projects section for the chosen filter and write it out
fn export_html(catalog: Catalog, category: &str, path: &Path) -> Result<()> {
    let mut gallery = Gallery::new(catalog);
    gallery
        .set_category_name(category)
        .context("Invalid --category")?;
    std::fs::write(path, markup::render_section(&gallery))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), count = gallery.filtered_len(), "exported projects section");
    println!("Wrote {} projects to {}", gallery.filtered_len(), path.display());
    Ok(())
}

/// Run the TUI application
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Main event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("shutting down");
    result
}

/// Run the main event loop
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let size = terminal.size()?;

        // Update animations and layout
        app.tick(size.width, size.height);

        // Render the UI, keeping the regions for mouse dispatch
        let mut hits = None;
        terminal.draw(|frame| hits = Some(ui::render(frame, app)))?;
        if let Some(hits) = hits {
            app.hit_map = hits;
        }

        // Handle input events with timeout for animation
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
