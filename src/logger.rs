use crate::validation;
use env_logger::Target;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// File the dashboard logs to when `--log-file` is not given.
pub const DEFAULT_LOG_NAME: &str = "net-tui.log";

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stderr,
    File(PathBuf),
}

/// Pick the log sink. While the dashboard owns the terminal, stderr would
/// draw over the frame, so interactive runs always log to a file.
pub fn destination(log_file: Option<&Path>, interactive: bool) -> Destination {
    match log_file {
        Some(path) => Destination::File(path.to_path_buf()),
        None if interactive => Destination::File(std::env::temp_dir().join(DEFAULT_LOG_NAME)),
        None => Destination::Stderr,
    }
}

/// Install the global logger when `RUST_LOG` is set.
pub fn init(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder.parse_default_env();

    if let Destination::File(path) = destination(log_file, interactive) {
        validation::validate_log_path(&path)?;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}
