//! Frame rendering.
//!
//! Rendering is a pure function of the [`Dashboard`], the [`Theme`] and the
//! clock text: it reads nothing from the terminal and mutates nothing.

use crate::records::{ConnectionRecord, InterfaceRecord, PortRecord};
use crate::state::{Dashboard, Tab};
use ratatui::{
    backend::TestBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const TITLE: &str = " net-tui ";
pub const HELP: &str = "q quit • tab/1-3 switch • j/k navigate • r refresh";
pub const PLACEHOLDER: &str = "loading...";

/// Marker appended to truncated values.
const ELLIPSIS: &str = "...";

/// Read-only style table, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub title: Style,
    pub dim: Style,
    pub header: Style,
    pub selected: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub state_up: Style,
    pub state_down: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

impl Theme {
    pub fn colored() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Rgb(0x88, 0xC0, 0xD0))
                .add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(0x4C, 0x56, 0x6A)),
            header: Style::default()
                .fg(Color::Rgb(0x81, 0xA1, 0xC1))
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::Rgb(0x2E, 0x34, 0x40))
                .bg(Color::Rgb(0x88, 0xC0, 0xD0))
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Rgb(0x88, 0xC0, 0xD0))
                .bg(Color::Rgb(0x3B, 0x42, 0x52))
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Rgb(0x4C, 0x56, 0x6A)),
            state_up: Style::default().fg(Color::Rgb(0xA3, 0xBE, 0x8C)),
            state_down: Style::default().fg(Color::Rgb(0xBF, 0x61, 0x6A)),
        }
    }

    /// No colors; the selection is shown in reverse video.
    pub fn monochrome() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            dim: Style::default(),
            header: Style::default().add_modifier(Modifier::BOLD),
            selected: Style::default().add_modifier(Modifier::REVERSED),
            tab_active: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            tab_inactive: Style::default(),
            state_up: Style::default(),
            state_down: Style::default(),
        }
    }
}

struct Column {
    header: &'static str,
    width: usize,
}

const fn col(header: &'static str, width: usize) -> Column {
    Column { header, width }
}

const CONNECTION_COLUMNS: [Column; 5] = [
    col("PROTO", 7),
    col("LOCAL", 21),
    col("REMOTE", 21),
    col("STATE", 11),
    col("PROCESS", 15),
];

const PORT_COLUMNS: [Column; 5] = [
    col("PORT", 7),
    col("PROTO", 7),
    col("ADDRESS", 16),
    col("PID", 8),
    col("PROCESS", 20),
];

const INTERFACE_COLUMNS: [Column; 5] = [
    col("NAME", 12),
    col("STATE", 6),
    col("ADDRESS", 22),
    col("RX", 12),
    col("TX", 12),
];

fn columns(tab: Tab) -> &'static [Column] {
    match tab {
        Tab::Connections => &CONNECTION_COLUMNS,
        Tab::Ports => &PORT_COLUMNS,
        Tab::Interfaces => &INTERFACE_COLUMNS,
    }
}

/// Coloring hint for a single cell of an unselected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Up,
    Down,
}

/// Cut `s` to at most `limit` terminal columns, ending in `...` when there
/// is room for at least one column of content before it.
///
/// A double-width character that would straddle the cut is dropped, so the
/// result can be one column short of `limit`.
pub fn truncate(s: &str, limit: usize) -> String {
    if s.width() <= limit {
        return s.to_string();
    }
    let budget = if limit > ELLIPSIS.len() {
        limit - ELLIPSIS.len()
    } else {
        limit
    };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if limit > ELLIPSIS.len() {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Human-scaled byte count using 1024 multiples.
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    // Note: Precision loss acceptable for display formatting
    #[allow(clippy::cast_precision_loss)]
    let scaled = bytes as f64 / div as f64;
    format!("{scaled:.1} {}B", PREFIXES[exp])
}

fn connection_cells(c: &ConnectionRecord) -> Vec<(String, Tone)> {
    [&c.proto, &c.local, &c.remote, &c.state, &c.process]
        .into_iter()
        .map(|v| (v.clone(), Tone::Plain))
        .collect()
}

fn port_cells(p: &PortRecord) -> Vec<(String, Tone)> {
    vec![
        (p.port.to_string(), Tone::Plain),
        (p.proto.clone(), Tone::Plain),
        (p.addr.clone(), Tone::Plain),
        (p.pid.to_string(), Tone::Plain),
        (p.process.clone(), Tone::Plain),
    ]
}

fn interface_cells(ifc: &InterfaceRecord) -> Vec<(String, Tone)> {
    let state = if ifc.up {
        ("up".to_string(), Tone::Up)
    } else {
        ("down".to_string(), Tone::Down)
    };
    vec![
        (ifc.name.clone(), Tone::Plain),
        state,
        (ifc.display_addr().to_string(), Tone::Plain),
        (format_bytes(ifc.rx), Tone::Plain),
        (format_bytes(ifc.tx), Tone::Plain),
    ]
}

fn row_cells(dash: &Dashboard, tab: Tab, index: usize) -> Option<Vec<(String, Tone)>> {
    match tab {
        Tab::Connections => dash.data.connections.get(index).map(connection_cells),
        Tab::Ports => dash.data.ports.get(index).map(port_cells),
        Tab::Interfaces => dash.data.interfaces.get(index).map(interface_cells),
    }
}

fn count_label(tab: Tab, len: usize) -> String {
    match tab {
        Tab::Connections => format!("{len} connections"),
        Tab::Ports => format!("{len} listening ports"),
        Tab::Interfaces => format!("{len} interfaces"),
    }
}

/// Pad every cell to its column, separated by one space. The last column is
/// truncated but not padded.
fn layout_cells(cells: Vec<(String, Tone)>, columns: &[Column]) -> Vec<(String, Tone)> {
    let last = columns.len().saturating_sub(1);
    cells
        .into_iter()
        .zip(columns)
        .enumerate()
        .map(|(i, ((value, tone), column))| {
            let text = truncate(&value, column.width);
            let text = if i == last {
                text
            } else {
                let pad = column.width.saturating_sub(text.width());
                format!("{text}{} ", " ".repeat(pad))
            };
            (text, tone)
        })
        .collect()
}

fn header_line(tab: Tab, theme: &Theme) -> Line<'static> {
    let cells = columns(tab)
        .iter()
        .map(|c| (c.header.to_string(), Tone::Plain))
        .collect();
    let text: String = layout_cells(cells, columns(tab))
        .into_iter()
        .map(|(t, _)| t)
        .collect();
    Line::from(Span::styled(text, theme.header))
}

fn data_line(cells: Vec<(String, Tone)>, tab: Tab, selected: bool, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span> = layout_cells(cells, columns(tab))
        .into_iter()
        .map(|(text, tone)| match (selected, tone) {
            (false, Tone::Up) => Span::styled(text, theme.state_up),
            (false, Tone::Down) => Span::styled(text, theme.state_down),
            _ => Span::raw(text),
        })
        .collect();

    let line = Line::from(spans);
    if selected {
        line.style(theme.selected)
    } else {
        line
    }
}

fn title_line(width: u16, clock: &str, theme: &Theme) -> Line<'static> {
    let gap = usize::from(width).saturating_sub(TITLE.chars().count() + clock.chars().count());
    Line::from(vec![
        Span::styled(TITLE, theme.title),
        Span::raw(" ".repeat(gap)),
        Span::styled(clock.to_string(), theme.dim),
    ])
}

fn tabs_line(active: Tab, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, tab) in Tab::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if tab == active {
            theme.tab_active
        } else {
            theme.tab_inactive
        };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
    }
    Line::from(spans)
}

/// Draw one frame for `dash` into `f`.
pub fn render(f: &mut Frame, dash: &Dashboard, theme: &Theme, clock: &str) {
    let nav = &dash.nav;
    let area = Rect::new(0, 0, nav.width, nav.height).intersection(f.area());

    if !nav.has_viewport() {
        f.render_widget(Paragraph::new(PLACEHOLDER), f.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title and clock
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Column header
            Constraint::Min(0),    // Rows
            Constraint::Length(1), // Count
            Constraint::Length(1), // Help
        ])
        .split(area);

    f.render_widget(Paragraph::new(title_line(nav.width, clock, theme)), chunks[0]);
    f.render_widget(Paragraph::new(tabs_line(nav.tab, theme)), chunks[1]);
    f.render_widget(Paragraph::new(header_line(nav.tab, theme)), chunks[2]);

    let len = dash.active_len();
    let end = (nav.offset + nav.page_size()).min(len);
    let rows: Vec<Line> = (nav.offset..end)
        .filter_map(|i| {
            row_cells(dash, nav.tab, i).map(|cells| data_line(cells, nav.tab, i == nav.cursor, theme))
        })
        .collect();
    f.render_widget(Paragraph::new(rows), chunks[3]);

    f.render_widget(
        Paragraph::new(Span::styled(count_label(nav.tab, len), theme.dim)),
        chunks[4],
    );
    f.render_widget(Paragraph::new(Span::styled(HELP, theme.dim)), chunks[5]);
}

/// Render one frame off-screen and return it as plain text, one line per
/// terminal row with trailing blanks removed.
pub fn render_text(dash: &Dashboard, theme: &Theme, clock: &str) -> anyhow::Result<String> {
    let width = dash.nav.width.max(PLACEHOLDER.len() as u16);
    let height = dash.nav.height.max(1);
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| render(f, dash, theme, clock))?;

    let buffer = terminal.backend().buffer();
    let mut lines = Vec::with_capacity(usize::from(height));
    for y in 0..height {
        let mut line = String::new();
        let mut x = 0;
        while x < width {
            let symbol = buffer.cell((x, y)).map_or(" ", |c| c.symbol());
            line.push_str(symbol);
            // a wide symbol covers the cells after it
            x += u16::try_from(symbol.width()).unwrap_or(1).max(1);
        }
        lines.push(line.trim_end().to_string());
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    Ok(lines.join("\n"))
}
