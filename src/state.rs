//! Navigation state machine.
//!
//! [`Dashboard`] owns the current records and the cursor/scroll window over
//! the active list. Every transition re-establishes two invariants:
//! the cursor stays inside the active list, and the scroll offset keeps the
//! cursor row visible.

use crate::input::Command;
use crate::records::Snapshot;

/// Rows not available to list data: title, tab bar, column header, count
/// line and help line.
pub const CHROME_ROWS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Connections,
    Ports,
    Interfaces,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Connections, Tab::Ports, Tab::Interfaces];

    pub fn title(self) -> &'static str {
        match self {
            Self::Connections => "Connections",
            Self::Ports => "Ports",
            Self::Interfaces => "Interfaces",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Connections => Self::Ports,
            Self::Ports => Self::Interfaces,
            Self::Interfaces => Self::Connections,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Connections => Self::Interfaces,
            Self::Ports => Self::Connections,
            Self::Interfaces => Self::Ports,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub tab: Tab,
    pub cursor: usize,
    pub offset: usize,
    pub width: u16,
    pub height: u16,
}

impl NavigationState {
    /// Visible data rows, never less than one.
    pub fn page_size(&self) -> usize {
        usize::from(self.height.saturating_sub(CHROME_ROWS)).max(1)
    }

    /// Whether a resize has told us the terminal dimensions yet.
    pub fn has_viewport(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Clamp the cursor into `[0, len - 1]` and scroll so it stays visible.
    fn settle(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));

        let page = self.page_size();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + page {
            self.offset = self.cursor + 1 - page;
        }
    }

    fn reset_position(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }
}

/// Outcome of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub nav: NavigationState,
    pub data: Snapshot,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the list shown by `tab`.
    pub fn list_len(&self, tab: Tab) -> usize {
        match tab {
            Tab::Connections => self.data.connections.len(),
            Tab::Ports => self.data.ports.len(),
            Tab::Interfaces => self.data.interfaces.len(),
        }
    }

    pub fn active_len(&self) -> usize {
        self.list_len(self.nav.tab)
    }

    /// Apply one input command. `Refresh` is a poller concern and leaves
    /// navigation untouched.
    pub fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::NextTab => self.switch_tab(self.nav.tab.next()),
            Command::PrevTab => self.switch_tab(self.nav.tab.prev()),
            Command::SelectTab(tab) => self.switch_tab(tab),
            Command::MoveDown => self.nav.cursor = self.nav.cursor.saturating_add(1),
            Command::MoveUp => self.nav.cursor = self.nav.cursor.saturating_sub(1),
            Command::JumpStart => self.nav.reset_position(),
            Command::JumpEnd => self.nav.cursor = self.active_len().saturating_sub(1),
            Command::Refresh | Command::Unknown => {}
        }
        self.settle();
        Flow::Continue
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.nav.width = width;
        self.nav.height = height;
        self.settle();
    }

    /// Replace all three lists with a freshly normalized pass.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.data = snapshot;
        self.settle();
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.nav.tab = tab;
        self.nav.reset_position();
    }

    fn settle(&mut self) {
        let len = self.active_len();
        self.nav.settle(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ConnectionRecord, InterfaceRecord, PortRecord};

    fn connection(i: usize) -> ConnectionRecord {
        ConnectionRecord {
            proto: "tcp".to_string(),
            local: format!("10.0.0.1:{}", 1000 + i),
            remote: "10.0.0.2:443".to_string(),
            state: "ESTABLISHED".to_string(),
            pid: 0,
            process: String::new(),
        }
    }

    fn snapshot(connections: usize, ports: usize, interfaces: usize) -> Snapshot {
        Snapshot {
            connections: (0..connections).map(connection).collect(),
            ports: (0..ports)
                .map(|i| PortRecord {
                    port: i as u16,
                    proto: "tcp".to_string(),
                    addr: "*".to_string(),
                    pid: 0,
                    process: String::new(),
                })
                .collect(),
            interfaces: (0..interfaces)
                .map(|i| InterfaceRecord {
                    name: format!("eth{i}"),
                    up: true,
                    addrs: Vec::new(),
                    rx: 0,
                    tx: 0,
                })
                .collect(),
        }
    }

    fn dashboard(height: u16, data: Snapshot) -> Dashboard {
        let mut dash = Dashboard::new();
        dash.resize(80, height);
        dash.apply_snapshot(data);
        dash
    }

    #[test]
    fn test_tab_cycle_returns_to_origin() {
        for tab in Tab::ALL {
            assert_eq!(tab.next().next().next(), tab);
            assert_eq!(tab.prev().prev().prev(), tab);
            assert_eq!(tab.next().prev(), tab);
        }
    }

    #[test]
    fn test_every_tab_has_title_and_list() {
        let dash = dashboard(20, snapshot(1, 2, 3));
        let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
        assert_eq!(titles, ["Connections", "Ports", "Interfaces"]);
        let lens: Vec<usize> = Tab::ALL.iter().map(|t| dash.list_len(*t)).collect();
        assert_eq!(lens, [1, 2, 3]);
    }

    #[test]
    fn test_move_down_clamps_at_end() {
        let mut dash = dashboard(20, snapshot(3, 0, 0));
        for _ in 0..10 {
            dash.handle_command(Command::MoveDown);
        }
        assert_eq!(dash.nav.cursor, 2);
    }

    #[test]
    fn test_move_up_floors_at_zero() {
        let mut dash = dashboard(20, snapshot(3, 0, 0));
        dash.handle_command(Command::MoveUp);
        assert_eq!(dash.nav.cursor, 0);
    }

    #[test]
    fn test_move_down_on_empty_list() {
        let mut dash = dashboard(20, Snapshot::default());
        dash.handle_command(Command::MoveDown);
        dash.handle_command(Command::JumpEnd);
        assert_eq!(dash.nav.cursor, 0);
        assert_eq!(dash.nav.offset, 0);
    }

    #[test]
    fn test_tab_switch_resets_position() {
        let mut dash = dashboard(20, snapshot(10, 10, 10));
        dash.handle_command(Command::JumpEnd);
        assert_eq!(dash.nav.cursor, 9);

        dash.handle_command(Command::NextTab);
        assert_eq!(dash.nav.tab, Tab::Ports);
        assert_eq!((dash.nav.cursor, dash.nav.offset), (0, 0));

        dash.handle_command(Command::JumpEnd);
        dash.handle_command(Command::SelectTab(Tab::Interfaces));
        assert_eq!(dash.nav.tab, Tab::Interfaces);
        assert_eq!((dash.nav.cursor, dash.nav.offset), (0, 0));

        dash.handle_command(Command::PrevTab);
        assert_eq!(dash.nav.tab, Tab::Ports);
    }

    #[test]
    fn test_jump_end_scrolls_window() {
        // height 10 leaves a page of 5 rows
        let mut dash = dashboard(10, snapshot(50, 0, 0));
        dash.handle_command(Command::JumpEnd);
        assert_eq!(dash.nav.cursor, 49);
        assert_eq!(dash.nav.offset, 45);

        dash.handle_command(Command::JumpStart);
        assert_eq!((dash.nav.cursor, dash.nav.offset), (0, 0));
    }

    #[test]
    fn test_scroll_follow_moving_down_and_up() {
        let mut dash = dashboard(10, snapshot(50, 0, 0));
        for _ in 0..7 {
            dash.handle_command(Command::MoveDown);
        }
        assert_eq!(dash.nav.cursor, 7);
        assert_eq!(dash.nav.offset, 3);

        for _ in 0..5 {
            dash.handle_command(Command::MoveUp);
        }
        assert_eq!(dash.nav.cursor, 2);
        assert_eq!(dash.nav.offset, 2);
    }

    #[test]
    fn test_refresh_shrinks_list_below_cursor() {
        let mut dash = dashboard(10, snapshot(50, 0, 0));
        dash.handle_command(Command::JumpEnd);

        dash.apply_snapshot(snapshot(3, 0, 0));
        assert_eq!(dash.nav.cursor, 2);
        assert_eq!(dash.nav.offset, 2);

        dash.apply_snapshot(Snapshot::default());
        assert_eq!((dash.nav.cursor, dash.nav.offset), (0, 0));
    }

    #[test]
    fn test_resize_keeps_cursor_visible() {
        let mut dash = dashboard(40, snapshot(50, 0, 0));
        for _ in 0..20 {
            dash.handle_command(Command::MoveDown);
        }
        assert_eq!(dash.nav.offset, 0);

        dash.resize(80, 10);
        assert_eq!(dash.nav.cursor, 20);
        assert_eq!(dash.nav.offset, 16);
    }

    #[test]
    fn test_degenerate_height_uses_single_row_page() {
        let mut dash = dashboard(3, snapshot(5, 0, 0));
        assert_eq!(dash.nav.page_size(), 1);
        dash.handle_command(Command::MoveDown);
        dash.handle_command(Command::MoveDown);
        assert_eq!(dash.nav.offset, dash.nav.cursor);
    }

    #[test]
    fn test_quit_and_unknown() {
        let mut dash = dashboard(20, snapshot(3, 0, 0));
        assert_eq!(dash.handle_command(Command::Unknown), Flow::Continue);
        assert_eq!(dash.handle_command(Command::Refresh), Flow::Continue);
        assert_eq!(dash.handle_command(Command::Quit), Flow::Quit);
    }

    #[test]
    fn test_viewport_unknown_until_resize() {
        let mut dash = Dashboard::new();
        assert!(!dash.nav.has_viewport());
        dash.resize(100, 30);
        assert!(dash.nav.has_viewport());
        assert_eq!(dash.nav.page_size(), 25);
    }
}
