use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "net-tui",
    about = "A terminal dashboard for connections, listening ports and interfaces"
)]
#[command(version, long_about = None)]
pub struct Args {
    /// Refresh interval in milliseconds
    #[arg(short = 't', long = "interval", default_value = "2000")]
    pub refresh_interval: u64,

    /// Disable colors (selection shown in reverse video)
    #[arg(long)]
    pub no_color: bool,

    /// Write log records here instead of stderr (enable with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// List non-loopback network interfaces and exit
    #[arg(short, long)]
    pub list: bool,

    /// Run one poll, print it as TOML and exit (bypass TUI)
    #[arg(long, conflicts_with = "snapshot")]
    pub dump: bool,

    /// Run one poll, print a single rendered frame and exit (bypass TUI)
    #[arg(long)]
    pub snapshot: bool,

    /// Tab shown by --snapshot (1 = connections, 2 = ports, 3 = interfaces)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=3))]
    pub tab: u8,

    /// Frame width for --snapshot
    #[arg(long, default_value = "120")]
    pub width: u16,

    /// Frame height for --snapshot
    #[arg(long, default_value = "40")]
    pub height: u16,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            refresh_interval: 2000,
            no_color: false,
            log_file: None,
            list: false,
            dump: false,
            snapshot: false,
            tab: 1,
            width: 120,
            height: 40,
        }
    }
}
