use std::path::PathBuf;

use crate::config::{load_config, parse_delimiter, parse_interval, parse_log_level, Options};
use crate::logging::{log_init, LogLevel};
use anyhow::{Context, Result};
use clap::Parser;

/// Cycles a row of sprites on a timer and shows a line of dialogue
#[derive(Parser, Debug)]
#[command(name = "sprite-cycle")]
#[command(version)]
#[command(about = "Timer-driven sprite cycling with dialogue lookup", long_about = None)]
pub struct Cli {
    /// Dialogue file with one KEY*VALUE entry per line
    #[arg(short, long, value_name = "FILE")]
    pub dialogue: Option<PathBuf>,

    /// Character separating key and value in the dialogue file
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Dialogue key to display
    #[arg(short, long, value_name = "KEY")]
    pub key: Option<String>,

    /// Milliseconds between sprite changes
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<String>,

    /// Number of frames to run
    #[arg(short, long, value_name = "COUNT")]
    pub ticks: Option<u32>,

    /// Milliseconds per frame
    #[arg(long = "tick-ms", value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Caption drawn in the corner
    #[arg(long, value_name = "TEXT")]
    pub caption: Option<String>,

    /// Write one line per rendered frame to this file
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Configuration directory path
    #[arg(short, long, value_name = "CONFIGDIR")]
    pub configdir: Option<PathBuf>,

    /// Log file path
    #[arg(short, long, value_name = "FILE")]
    pub logfile: Option<PathBuf>,

    /// Log level (nothing, error, warning, info, debug, all)
    #[arg(long, value_name = "LEVEL")]
    pub loglevel: Option<String>,
}

impl Cli {
    /// Start logging, load the config file and overlay the command line.
    ///
    /// Logging comes up first with the command-line level (or the default)
    /// so that config warnings are not lost; the level is then refined from
    /// the merged options.
    pub fn resolve_options(&self) -> Result<Options> {
        let early_level = match self.loglevel {
            Some(ref level) => parse_log_level(level)?,
            None => Options::default().log_level,
        };
        log_init(early_level, self.logfile.as_deref()).context("Failed to start logging")?;

        let options = load_config(self.configdir.as_deref())?;
        let options = self.merge_into_options(options)?;
        if options.log_level != early_level {
            log_init(options.log_level, None).context("Failed to start logging")?;
        }
        Ok(options)
    }

    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref dialogue) = self.dialogue {
            opts.dialogue_file = dialogue.clone();
        }

        if let Some(ref delimiter) = self.delimiter {
            opts.delimiter = parse_delimiter(delimiter)?;
        }

        if let Some(ref key) = self.key {
            opts.dialogue_key = key.clone();
        }

        if let Some(ref interval) = self.interval {
            opts.interval_ms = parse_interval(interval).context("Invalid --interval")?;
        }

        if let Some(ticks) = self.ticks {
            opts.ticks = ticks;
        }

        if let Some(tick_ms) = self.tick_ms {
            opts.tick_ms = tick_ms;
        }

        if let Some(ref caption) = self.caption {
            opts.caption = caption.clone();
        }

        if let Some(ref transcript) = self.transcript {
            opts.transcript = Some(transcript.clone());
        }

        if let Some(ref config_dir) = self.configdir {
            opts.config_dir = Some(config_dir.clone());
        }

        if let Some(ref log_file) = self.logfile {
            opts.log_file = Some(log_file.clone());
        }

        if let Some(ref level) = self.loglevel {
            opts.log_level = parse_log_level(level)?;
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_keeps_options() {
        let cli = Cli::parse_from(["sprite-cycle"]);
        let opts = cli.merge_into_options(Options::default()).unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "sprite-cycle",
            "--dialogue",
            "lines.txt",
            "--delimiter",
            "|",
            "-k",
            "string2",
            "--interval",
            "100",
            "--ticks",
            "5",
            "--transcript",
            "out.txt",
            "--loglevel",
            "debug",
        ]);
        let mut base = Options::default();
        base.interval_ms = 900;

        let opts = cli.merge_into_options(base).unwrap();

        assert_eq!(opts.dialogue_file, PathBuf::from("lines.txt"));
        assert_eq!(opts.delimiter, '|');
        assert_eq!(opts.dialogue_key, "string2");
        assert_eq!(opts.interval_ms, 100);
        assert_eq!(opts.ticks, 5);
        assert_eq!(opts.transcript, Some(PathBuf::from("out.txt")));
        assert_eq!(opts.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cli = Cli::parse_from(["sprite-cycle", "--interval", "0"]);
        assert!(cli.merge_into_options(Options::default()).is_err());

        let cli = Cli::parse_from(["sprite-cycle", "--delimiter", "::"]);
        assert!(cli.merge_into_options(Options::default()).is_err());
    }
}
