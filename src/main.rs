mod app;
mod config;
mod domain;
mod errors;
mod input;
mod notifications;
mod persistence;
mod report;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{config_file, ensure_data_dir, get_data_dir, init_local_data_dir, log_file};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "universe")]
#[command(about = "A terminal student workspace: pomodoro timer, tasks, notes and expenses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .universe directory in the current directory
    Init,
    /// Write a markdown summary of tasks, notes, expenses and budgets
    Summary {
        /// Output file path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Send tracing output to the data directory's log file (the TUI owns the terminal).
/// Falls back to stderr when the file cannot be opened.
fn init_logging(data_dir: &Path) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_path = log_file(data_dir);
    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
            tracing::warn!(path = %log_path.display(), error = %e, "Could not open log file");
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            // Initialize local .universe directory
            let data_dir = init_local_data_dir()?;
            init_logging(&data_dir);
            AppConfig::default()
                .save(config_file(&data_dir))
                .context("Failed to write default config")?;
            info!(dir = %data_dir.display(), "Initialized data directory");

            println!("Initialized universe directory: {}", data_dir.display());
            println!();
            println!("UniVerse will now use this local directory for its data.");
            println!("Run 'universe' to start.");
            Ok(())
        }
        Some(Commands::Summary { output }) => {
            let data_dir = get_data_dir()?;
            init_logging(&data_dir);

            let summary = report::generate_summary(&data_dir, chrono::Local::now().date_naive());
            match output {
                Some(path) => {
                    fs::write(&path, &summary)
                        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
                    println!("Summary written: {}", path.display());
                }
                None => print!("{}", summary),
            }
            Ok(())
        }
        None => {
            // Run the normal TUI application
            run_tui()
        }
    }
}

fn run_tui() -> Result<()> {
    // Ensure data directory exists
    let data_dir = ensure_data_dir()?;
    init_logging(&data_dir);
    info!(dir = %data_dir.display(), "Starting UniVerse");

    let config = AppConfig::load(config_file(&data_dir));
    let mut app = AppState::load(&data_dir, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Stop the ticker and save timer state on exit
    app.shutdown();

    // Print any errors
    if let Err(err) = result {
        error!(error = %err, "Event loop failed");
        eprintln!("Error: {}", err);
    }

    info!("Exiting UniVerse");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Advance the pomodoro by whole elapsed seconds
        let now = Instant::now();
        app.tick(now);
        app.expire_status(now);
    }
}
