//! # net-tui
//!
//! A live terminal dashboard for host network introspection: active
//! connections, listening ports and interface statistics in one polled,
//! navigable view.
//!
//! ## Architecture
//!
//! - [`source::NetSource`] is the acquisition capability; [`platform`]
//!   provides the host implementation.
//! - [`normalize::normalize`] turns one acquisition pass into a
//!   [`records::Snapshot`].
//! - [`poller::Poller`] runs passes on a worker thread, one at a time.
//! - [`state::Dashboard`] is the navigation state machine.
//! - [`display::render`] draws a frame from the dashboard.
//! - [`app`] is the single-threaded coordinator tying them together.
//!
//! ## Example
//!
//! ```rust,no_run
//! use net_tui::cli::Args;
//! use net_tui::run;
//!
//! let args = Args {
//!     dump: true,
//!     ..Default::default()
//! };
//!
//! run(args).expect("Failed to run net-tui");
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod event;
pub mod input;
pub mod logger;
pub mod normalize;
pub mod platform;
pub mod poller;
pub mod records;
pub mod source;
pub mod state;
pub mod validation;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::AppEvent;
use ratatui::{backend::CrosstermBackend, Terminal};
use source::NetSource;
use state::Dashboard;
use std::io::Stdout;
use std::sync::mpsc;

/// Main entry point for the net-tui application.
///
/// Dispatches to one of the one-shot modes (`--list`, `--dump`,
/// `--snapshot`) or starts the interactive dashboard.
pub fn run(args: Args) -> Result<()> {
    let config = Config::from_args(&args)?;
    let interactive = !(args.list || args.dump || args.snapshot);
    logger::init(config.log_file.as_deref(), interactive)?;

    let source = platform::create_source()?;

    if args.list {
        return list_interfaces(source.as_ref());
    }

    if args.dump {
        let snapshot = normalize::normalize(source.as_ref());
        print!("{}", snapshot.to_toml()?);
        return Ok(());
    }

    if args.snapshot {
        return print_snapshot(source.as_ref(), &config);
    }

    run_dashboard(source, &config)
}

fn list_interfaces(source: &dyn NetSource) -> Result<()> {
    let interfaces = source.interfaces()?;

    for interface in interfaces.into_iter().filter(|i| !i.loopback) {
        println!("{}", interface.name);
    }

    Ok(())
}

fn print_snapshot(source: &dyn NetSource, config: &Config) -> Result<()> {
    let mut dashboard = Dashboard::new();
    dashboard.resize(config.snapshot_width, config.snapshot_height);
    dashboard.handle_command(input::Command::SelectTab(config.snapshot_tab));
    dashboard.apply_snapshot(normalize::normalize(source));

    let clock = chrono::Local::now().format("%H:%M:%S").to_string();
    println!(
        "{}",
        display::render_text(&dashboard, &config.theme(), &clock)?
    );
    Ok(())
}

fn run_dashboard(source: Box<dyn NetSource>, config: &Config) -> Result<()> {
    let mut terminal = setup_terminal().context("failed to initialize terminal")?;
    log::info!(
        "dashboard started, polling every {:?}",
        config.refresh_interval
    );

    let result = event_loop(&mut terminal, source, config);

    let restored = restore_terminal(&mut terminal);
    result?;
    restored.context("failed to restore terminal")
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    source: Box<dyn NetSource>,
    config: &Config,
) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let size = terminal.size()?;
    tx.send(AppEvent::Resize {
        width: size.width,
        height: size.height,
    })?;

    app::spawn_input(tx.clone());
    poller::spawn_ticker(config.refresh_interval, tx.clone());
    let poller = poller::Poller::spawn(source, tx).context("failed to start poller")?;

    let mut app = app::App::new(poller, config.theme());
    app.start();
    app::run(terminal, &mut app, rx)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
            Err(e.into())
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
