use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use log::{LevelFilter, SetLoggerError};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

/// Log levels, lowest verbosity first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Nothing = 0,
    User = 1,
    Error = 2,
    Warning = 3,
    Info = 4,
    Debug = 5,
    All = 6,
}

impl LogLevel {
    /// Create a LogLevel from an integer
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Nothing,
            1 => LogLevel::User,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::All,
            _ => LogLevel::Info,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Parse a level name such as `warning` or `debug`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nothing" | "off" => Some(LogLevel::Nothing),
            "user" => Some(LogLevel::User),
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "all" | "trace" => Some(LogLevel::All),
            _ => None,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Nothing => LevelFilter::Off,
            LogLevel::User | LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::All => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("Cannot create log file: {0}")]
    Io(#[from] io::Error),
    #[error("Another logger is already installed")]
    AlreadyInstalled(#[from] SetLoggerError),
}

/// Whether our logger has been installed
static INSTALLED: Mutex<bool> = Mutex::new(false);

/// Initialize the logging system
///
/// The first call installs a `simplelog` logger writing to `log_file`, or to
/// stderr when no file is given. Later calls only change the level, so the
/// level can be set early and refined once the config has been read.
///
/// # Errors
/// Returns an error if `log_file` cannot be created or if a different logger
/// was installed first.
pub fn log_init(level: LogLevel, log_file: Option<&Path>) -> Result<(), LogInitError> {
    let mut installed = INSTALLED.lock().unwrap_or_else(|e| e.into_inner());
    if !*installed {
        // Filtering happens through `log::set_max_level` below.
        let logger: Box<dyn SharedLogger> = match log_file {
            Some(path) => WriteLogger::new(LevelFilter::Trace, Config::default(), File::create(path)?),
            None => TermLogger::new(
                LevelFilter::Trace,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ),
        };
        CombinedLogger::init(vec![logger])?;
        *installed = true;
    }
    log::set_max_level(level.to_level_filter());
    Ok(())
}

/// Convenience macro for fatal errors
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {
        $crate::log::error!($($arg)*)
    };
}

/// Convenience macro for errors
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log::error!($($arg)*)
    };
}

/// Convenience macro for warnings
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::log::warn!($($arg)*)
    };
}

/// Convenience macro for info messages
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::log::info!($($arg)*)
    };
}

/// Convenience macro for debug messages
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::log::debug!($($arg)*)
    };
}
