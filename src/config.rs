use crate::cli::Args;
use crate::display::Theme;
use crate::error::{NetTuiError, Result};
use crate::state::Tab;
use crate::validation;
use std::path::PathBuf;
use std::time::Duration;

/// Validated runtime settings. Built once from the command line; there is
/// no configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub refresh_interval: Duration,
    pub color: bool,
    pub log_file: Option<PathBuf>,
    pub snapshot_tab: Tab,
    pub snapshot_width: u16,
    pub snapshot_height: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval: crate::poller::DEFAULT_INTERVAL,
            color: true,
            log_file: None,
            snapshot_tab: Tab::Connections,
            snapshot_width: 120,
            snapshot_height: 40,
        }
    }
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        validation::validate_refresh_interval(args.refresh_interval)?;
        if args.snapshot {
            validation::validate_frame_size(args.width, args.height)?;
        }
        if let Some(path) = &args.log_file {
            validation::validate_log_path(path)?;
        }

        let snapshot_tab = usize::from(args.tab)
            .checked_sub(1)
            .and_then(|i| Tab::ALL.get(i).copied())
            .ok_or_else(|| {
                NetTuiError::Config(format!("Tab must be 1-{}, got {}", Tab::ALL.len(), args.tab))
            })?;

        Ok(Self {
            refresh_interval: Duration::from_millis(args.refresh_interval),
            color: !args.no_color,
            log_file: args.log_file.clone(),
            snapshot_tab,
            snapshot_width: args.width,
            snapshot_height: args.height,
        })
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        if self.color {
            Theme::colored()
        } else {
            Theme::monochrome()
        }
    }
}
