//! Background acquisition.
//!
//! A single worker thread runs normalization passes on request and posts
//! each result back into the coordinator's event channel. The coordinator
//! tracks whether a pass is outstanding and drops new requests until it
//! completes, so passes never overlap and never queue up behind a slow one.
//!
//! There is no timeout: a pass that hangs simply postpones every later
//! refresh while input and redraw carry on.

use crate::event::AppEvent;
use crate::normalize::normalize;
use crate::source::NetSource;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Default interval between scheduled passes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

pub struct Poller {
    requests: Sender<()>,
    in_flight: bool,
}

impl Poller {
    /// Start the worker. Results arrive on `events` as [`AppEvent::Data`].
    pub fn spawn(source: Box<dyn NetSource>, events: Sender<AppEvent>) -> std::io::Result<Self> {
        let (requests, pending) = mpsc::channel();
        thread::Builder::new()
            .name("net-tui-poller".to_string())
            .spawn(move || worker(source, pending, events))?;

        Ok(Self {
            requests,
            in_flight: false,
        })
    }

    /// Ask for a pass. Returns `false` when one is already outstanding and
    /// the request was skipped.
    pub fn request(&mut self) -> bool {
        if self.in_flight {
            log::debug!("poll skipped: previous pass still running");
            return false;
        }
        if self.requests.send(()).is_err() {
            log::warn!("poller worker has stopped");
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Mark the outstanding pass as delivered.
    pub fn complete(&mut self) {
        self.in_flight = false;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }
}

fn worker(source: Box<dyn NetSource>, pending: Receiver<()>, events: Sender<AppEvent>) {
    for () in pending {
        let snapshot = normalize(source.as_ref());
        if events.send(AppEvent::Data(snapshot)).is_err() {
            break;
        }
    }
    log::debug!("poller worker exiting");
}

/// Post [`AppEvent::Tick`] every `interval` until the receiver goes away.
pub fn spawn_ticker(interval: Duration, events: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("net-tui-ticker".to_string())
        .spawn(move || loop {
            thread::sleep(interval);
            if events.send(AppEvent::Tick).is_err() {
                break;
            }
        });
    if let Err(e) = spawned {
        log::error!("failed to spawn ticker thread: {e}");
    }
}
