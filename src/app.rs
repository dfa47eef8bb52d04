//! The coordinator.
//!
//! One thread owns the [`Dashboard`] and the terminal. Key presses, resizes,
//! timer ticks and poll results all arrive through a single channel and are
//! applied strictly in arrival order, with a redraw after each one.

use crate::display::{self, Theme};
use crate::event::AppEvent;
use crate::input::Command;
use crate::poller::Poller;
use crate::state::{Dashboard, Flow};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, Frame, Terminal};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

pub struct App {
    dashboard: Dashboard,
    poller: Poller,
    theme: Theme,
}

impl App {
    pub fn new(poller: Poller, theme: Theme) -> Self {
        Self {
            dashboard: Dashboard::new(),
            poller,
            theme,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    /// Kick off the first pass.
    pub fn start(&mut self) {
        self.poller.request();
    }

    pub fn handle(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Input(Command::Refresh) | AppEvent::Tick => {
                self.poller.request();
                Flow::Continue
            }
            AppEvent::Input(command) => self.dashboard.handle_command(command),
            AppEvent::Resize { width, height } => {
                self.dashboard.resize(width, height);
                Flow::Continue
            }
            AppEvent::Data(snapshot) => {
                self.poller.complete();
                self.dashboard.apply_snapshot(snapshot);
                Flow::Continue
            }
        }
    }

    pub fn draw(&self, f: &mut Frame, clock: &str) {
        display::render(f, &self.dashboard, &self.theme, clock);
    }
}

fn clock() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Process events until quit or until every producer has gone away.
pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: Receiver<AppEvent>,
) -> Result<()> {
    terminal.draw(|f| app.draw(f, &clock()))?;

    for event in events {
        if app.handle(event) == Flow::Quit {
            log::info!("quit requested");
            break;
        }
        terminal.draw(|f| app.draw(f, &clock()))?;
    }

    Ok(())
}

/// Forward terminal key and resize events into the coordinator channel.
pub fn spawn_input(events: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("net-tui-input".to_string())
        .spawn(move || loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    events.send(AppEvent::Input(Command::from_key_event(key)))
                }
                Ok(Event::Resize(width, height)) => {
                    events.send(AppEvent::Resize { width, height })
                }
                Ok(_) => Ok(()),
                Err(e) => {
                    log::error!("terminal input failed: {e}");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });
    if let Err(e) = spawned {
        log::error!("failed to spawn input thread: {e}");
    }
}
