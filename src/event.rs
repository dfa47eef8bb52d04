use crate::input::Command;
use crate::records::Snapshot;

/// Everything the coordinator reacts to, merged into one ordered channel.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Input(Command),
    Resize { width: u16, height: u16 },
    Tick,
    Data(Snapshot),
}
