use crate::state::Tab;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Navigation
    NextTab,         // Tab, l, Right
    PrevTab,         // Shift+Tab, h, Left
    SelectTab(Tab),  // 1, 2, 3
    MoveDown,        // Down arrow, j
    MoveUp,          // Up arrow, k
    JumpStart,       // g, Home
    JumpEnd,         // G, End

    // Control
    Quit,    // 'q' or Ctrl+C
    Refresh, // 'r' - Poll now

    // Unknown/unhandled
    Unknown,
}

impl Command {
    pub fn from_key_event(key_event: KeyEvent) -> Self {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Self::Quit,
            (KeyCode::Char('q'), _) => Self::Quit,

            (KeyCode::Tab, m) if m.contains(KeyModifiers::SHIFT) => Self::PrevTab,
            (KeyCode::BackTab, _) => Self::PrevTab,
            (KeyCode::Tab | KeyCode::Right | KeyCode::Char('l'), _) => Self::NextTab,
            (KeyCode::Left | KeyCode::Char('h'), _) => Self::PrevTab,

            (KeyCode::Char('1'), _) => Self::SelectTab(Tab::Connections),
            (KeyCode::Char('2'), _) => Self::SelectTab(Tab::Ports),
            (KeyCode::Char('3'), _) => Self::SelectTab(Tab::Interfaces),

            (KeyCode::Down | KeyCode::Char('j'), _) => Self::MoveDown,
            (KeyCode::Up | KeyCode::Char('k'), _) => Self::MoveUp,
            (KeyCode::Home | KeyCode::Char('g'), _) => Self::JumpStart,
            (KeyCode::End | KeyCode::Char('G'), _) => Self::JumpEnd,

            (KeyCode::Char('r'), _) => Self::Refresh,

            _ => Self::Unknown,
        }
    }
}
