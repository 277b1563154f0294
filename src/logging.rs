//! Logger setup.
//!
//! The local TUI owns stdout and stderr, so terminal mode only logs to a
//! file. The SSH server has a free terminal and also logs there.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

/// Where the process runs, which decides where logs go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Local TUI: file only.
    File,
    /// SSH server: file and stderr.
    FileAndStderr,
}

#[derive(Debug)]
pub enum LogError {
    Level(String),
    File(io::Error),
    AlreadySet,
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::Level(level) => write!(f, "unknown log level '{level}'"),
            LogError::File(e) => write!(f, "could not open log file: {e}"),
            LogError::AlreadySet => write!(f, "logger already initialized"),
        }
    }
}

impl std::error::Error for LogError {}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_level(level: &str) -> Result<LevelFilter, LogError> {
    LevelFilter::from_str(level.trim()).map_err(|_| LogError::Level(level.to_string()))
}

pub fn init(target: LogTarget, file: &Path, level: &str) -> Result<(), LogError> {
    let level = parse_level(level)?;
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let log_file = File::create(file).map_err(LogError::File)?;

    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![WriteLogger::new(level, config.clone(), log_file)];
    if target == LogTarget::FileAndStderr {
        loggers.push(TermLogger::new(
            level,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    CombinedLogger::init(loggers).map_err(|_| LogError::AlreadySet)
}
