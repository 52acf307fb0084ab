use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::dialogue::{KeyValueParser, DEFAULT_DELIMITER};
use crate::io::{LineStore, LoadStatus};
use crate::logging::LogLevel;

/// Name of the config file looked up inside the config directory
pub const CONFIG_FILE_NAME: &str = "sprite-cycle.cfg";

/// Application options that can be set via CLI or config file
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub dialogue_file: PathBuf,
    pub delimiter: char,
    pub dialogue_key: String,
    pub interval_ms: u64,
    pub ticks: u32,
    pub tick_ms: u64,
    pub caption: String,
    pub transcript: Option<PathBuf>,
    pub log_level: LogLevel,

    // Commandline-only options
    pub log_file: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dialogue_file: PathBuf::from("darkrai.txt"),
            delimiter: DEFAULT_DELIMITER,
            dialogue_key: "string1".to_string(),
            interval_ms: 250,
            ticks: 40,
            tick_ms: 33,
            caption: "Christian Zeidan".to_string(),
            transcript: None,
            log_file: None,
            log_level: LogLevel::Info,
            config_dir: None,
        }
    }
}

impl Options {
    /// Apply one `key = value` setting from the config file.
    ///
    /// Returns `Ok(false)` for keys this program does not know.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool> {
        match key {
            "dialogue" => self.dialogue_file = PathBuf::from(value),
            "delimiter" => self.delimiter = parse_delimiter(value)?,
            "key" => self.dialogue_key = value.to_string(),
            "interval" => self.interval_ms = parse_interval(value)?,
            "ticks" => self.ticks = value.parse().context("Invalid tick count")?,
            "tickms" => self.tick_ms = value.parse().context("Invalid tick length")?,
            "caption" => self.caption = value.to_string(),
            "transcript" => self.transcript = Some(PathBuf::from(value)),
            "loglevel" => self.log_level = parse_log_level(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Load configuration from `sprite-cycle.cfg` in `config_dir`
///
/// A missing directory or file yields the default options. Lines are
/// `key = value`; blank lines and `#` comments are skipped.
pub fn load_config(config_dir: Option<&Path>) -> Result<Options> {
    let mut opts = Options::default();
    let Some(dir) = config_dir else {
        return Ok(opts);
    };
    opts.config_dir = Some(dir.to_path_buf());

    let path = dir.join(CONFIG_FILE_NAME);
    let store = LineStore::open(&path);
    if store.status() == LoadStatus::SourceUnavailable {
        log::info!("No config file at {:?}, using defaults", path);
        return Ok(opts);
    }

    let parser = KeyValueParser::new('=');
    for (i, raw) in store.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = parser
            .parse(line)
            .with_context(|| format!("{}:{}", path.display(), i + 1))?;
        let (key, value) = (key.trim(), value.trim());
        let known = opts
            .apply(key, value)
            .with_context(|| format!("{}:{}: bad value for {}", path.display(), i + 1, key))?;
        if !known {
            log::warn!("{}:{}: unknown config key {:?}", path.display(), i + 1, key);
        }
    }
    Ok(opts)
}

/// Parse a delimiter, which must be exactly one character
pub fn parse_delimiter(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => anyhow::bail!("Delimiter must be a single character, got {:?}", s),
    }
}

/// Parse an interval in milliseconds; zero is rejected
pub fn parse_interval(s: &str) -> Result<u64> {
    let ms: u64 = s.parse().context("Invalid interval value")?;
    if ms == 0 {
        anyhow::bail!("Interval must be positive");
    }
    Ok(ms)
}

pub fn parse_log_level(s: &str) -> Result<LogLevel> {
    LogLevel::from_name(s).with_context(|| format!("Unknown log level {:?}", s))
}
