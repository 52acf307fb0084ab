//! Buffered, write-only line accumulator
//!
//! Lines are collected in memory and only reach the destination on an
//! explicit [`LineSink::flush`], which overwrites the whole file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::files;

/// What happens to the pending lines after a successful flush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Keep them; a later flush rewrites them along with anything appended since
    #[default]
    Retain,
    /// Drop them; a later flush only writes lines appended since
    Clear,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Cannot write {path:?}: {source}")]
    WriteFault {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct LineSink {
    destination: PathBuf,
    pending: Vec<String>,
    policy: FlushPolicy,
}

impl LineSink {
    /// Create an empty sink for `destination`. No I/O happens here.
    pub fn new<P: AsRef<Path>>(destination: P) -> Self {
        Self::with_policy(destination, FlushPolicy::default())
    }

    pub fn with_policy<P: AsRef<Path>>(destination: P, policy: FlushPolicy) -> Self {
        Self {
            destination: destination.as_ref().to_path_buf(),
            pending: Vec::new(),
            policy,
        }
    }

    /// Probe whether `path` can be opened for reading right now.
    pub fn exists<P: AsRef<Path>>(path: P) -> bool {
        files::is_readable(path.as_ref())
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn policy(&self) -> FlushPolicy {
        self.policy
    }

    /// Queue a line for the next flush
    pub fn append<S: Into<String>>(&mut self, line: S) {
        self.pending.push(line.into());
    }

    /// Number of pending lines
    pub fn count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Overwrite the destination with every pending line, one per line.
    ///
    /// Returns the number of lines written. On failure the pending lines are
    /// left untouched whatever the policy.
    pub fn flush(&mut self) -> Result<usize, SinkError> {
        let written = self.write_pending().map_err(|source| {
            log::warn!(
                "LineSink: flush to {:?} abandoned: {}",
                self.destination,
                source
            );
            SinkError::WriteFault {
                path: self.destination.clone(),
                source,
            }
        })?;

        if self.policy == FlushPolicy::Clear {
            self.pending.clear();
        }
        Ok(written)
    }

    fn write_pending(&self) -> std::io::Result<usize> {
        let file = File::create(&self.destination)?;
        let mut out = BufWriter::new(file);
        for line in &self.pending {
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(self.pending.len())
    }
}
