//! Eager-loaded, read-only line buffer
//!
//! A [`LineStore`] drains its source in one pass at construction and closes
//! the handle before it is handed back. After that the line sequence never
//! changes; callers read it by index or through a forward-only cursor.
//!
//! Opening never fails the caller. A missing source produces an empty store
//! and a read fault part-way through keeps whatever was read so far. The
//! outcome is available through [`LineStore::status`].

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::files;

/// How the load of a store ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Every line up to end-of-stream was read
    Complete,
    /// The source could not be opened; the store is empty
    SourceUnavailable,
    /// An I/O error stopped the read; the lines before it are kept
    ReadFault { lines_read: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Line index {index} out of range (store holds {count} lines)")]
    OutOfRange { index: usize, count: usize },
}

#[derive(Debug, Clone)]
pub struct LineStore {
    source: PathBuf,
    lines: Vec<String>,
    cursor: usize,
    status: LoadStatus,
}

impl LineStore {
    /// Load every line of `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match files::open_for_read(path) {
            Ok(file) => Self::from_reader(path, BufReader::new(file)),
            Err(err) => {
                log::warn!("LineStore: cannot open {:?} ({}), using empty store", path, err);
                Self {
                    source: path.to_path_buf(),
                    lines: Vec::new(),
                    cursor: 0,
                    status: LoadStatus::SourceUnavailable,
                }
            }
        }
    }

    /// Drain `reader` into a new store labelled `source`.
    ///
    /// Lines end at `\n` or `\r\n`. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD rather than ending the read. The reader is
    /// consumed and dropped before this returns, on the fault path as well
    /// as at end-of-stream.
    pub fn from_reader<P: AsRef<Path>, R: BufRead>(source: P, mut reader: R) -> Self {
        let source = source.as_ref().to_path_buf();
        let mut lines = Vec::new();
        let mut status = LoadStatus::Complete;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    if buf.last() == Some(&b'\n') {
                        buf.pop();
                        if buf.last() == Some(&b'\r') {
                            buf.pop();
                        }
                    }
                    lines.push(String::from_utf8_lossy(&buf).into_owned());
                }
                Err(err) => {
                    log::warn!(
                        "LineStore: read fault in {:?} after {} lines: {}",
                        source,
                        lines.len(),
                        err
                    );
                    status = LoadStatus::ReadFault {
                        lines_read: lines.len(),
                    };
                    break;
                }
            }
        }

        Self {
            source,
            lines,
            cursor: 0,
            status,
        }
    }

    /// Probe whether `path` can be opened for reading right now.
    pub fn exists<P: AsRef<Path>>(path: P) -> bool {
        files::is_readable(path.as_ref())
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Number of loaded lines
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a specific line by 0-based index
    pub fn line_at(&self, index: usize) -> Result<&str, StoreError> {
        self.lines
            .get(index)
            .map(String::as_str)
            .ok_or(StoreError::OutOfRange {
                index,
                count: self.lines.len(),
            })
    }

    /// Return the line under the cursor and advance it.
    ///
    /// Returns `None` once every line has been handed out. The cursor is
    /// never rewound.
    pub fn next_line(&mut self) -> Option<&str> {
        let line = self.lines.get(self.cursor)?;
        self.cursor += 1;
        Some(line.as_str())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Lines not yet handed out by [`LineStore::next_line`]
    pub fn remaining(&self) -> usize {
        self.lines.len() - self.cursor
    }

    /// Iterate over all lines without touching the cursor
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use std::io::{self, Read};
    use tempfile::TempDir;

    /// Reader that yields `good` then fails every subsequent read
    struct FaultyReader {
        good: io::Cursor<Vec<u8>>,
    }

    impl Read for FaultyReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.good.read(buf)?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            Ok(n)
        }
    }

    fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_open_reads_all_lines_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "dialogue.txt", "a*1\nb*2\nc*3\n");

        let store = LineStore::open(&path);

        assert_eq!(store.status(), LoadStatus::Complete);
        assert_eq!(store.count(), 3);
        assert_eq!(store.line_at(0), Ok("a*1"));
        assert_eq!(store.line_at(1), Ok("b*2"));
        assert_eq!(store.line_at(2), Ok("c*3"));
        assert_eq!(store.source(), path.as_path());
    }

    #[test]
    fn test_open_strips_crlf() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "crlf.txt", "first\r\nsecond\r\n");

        let store = LineStore::open(&path);
        assert_eq!(store.lines().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn test_open_missing_source_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = LineStore::open(dir.path().join("nope.txt"));

        assert_eq!(store.status(), LoadStatus::SourceUnavailable);
        assert_eq!(store.count(), 0);
        assert!(store.is_empty());
        assert_eq!(store.next_line(), None);
    }

    #[test]
    fn test_open_directory_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = LineStore::open(dir.path());

        assert_eq!(store.status(), LoadStatus::SourceUnavailable);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_line_at_out_of_range() {
        let store = LineStore::from_reader("mem", io::Cursor::new("only\n"));

        assert_eq!(
            store.line_at(1),
            Err(StoreError::OutOfRange { index: 1, count: 1 })
        );
        assert!(store.line_at(usize::MAX).is_err());
    }

    #[test]
    fn test_next_line_exhausts_without_wrapping() {
        let mut store = LineStore::from_reader("mem", io::Cursor::new("x\ny\n"));

        assert_eq!(store.remaining(), 2);
        assert_eq!(store.next_line(), Some("x"));
        assert_eq!(store.next_line(), Some("y"));
        assert_eq!(store.next_line(), None);
        assert_eq!(store.next_line(), None);
        assert_eq!(store.cursor(), 2);
        assert_eq!(store.remaining(), 0);
    }

    #[test]
    fn test_lines_does_not_move_cursor() {
        let mut store = LineStore::from_reader("mem", io::Cursor::new("x\ny\n"));
        assert_eq!(store.lines().count(), 2);
        assert_eq!(store.next_line(), Some("x"));
    }

    #[test]
    fn test_read_fault_keeps_partial_content() {
        let reader = io::BufReader::new(FaultyReader {
            good: io::Cursor::new(b"one\ntwo\n".to_vec()),
        });

        let store = LineStore::from_reader("faulty", reader);

        assert_eq!(store.status(), LoadStatus::ReadFault { lines_read: 2 });
        assert_eq!(store.lines().collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let bytes: Vec<u8> = b"string0*ok\nstring1*caf\xe9\nstring2*Sleep\nstring3*more\n".to_vec();
        let store = LineStore::from_reader("latin1", io::Cursor::new(bytes));

        assert_eq!(store.status(), LoadStatus::Complete);
        assert_eq!(store.count(), 4);
        assert_eq!(store.line_at(1), Ok("string1*caf\u{FFFD}"));
        assert_eq!(store.line_at(3), Ok("string3*more"));
    }

    #[test]
    fn test_last_line_without_newline() {
        let store = LineStore::from_reader("mem", io::Cursor::new("a\r\nb"));
        assert_eq!(store.lines().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_exists_probe() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "probe.txt", "");

        assert!(LineStore::exists(&path));
        assert!(!LineStore::exists(dir.path().join("absent.txt")));
    }

    proptest! {
        #[test]
        fn prop_store_preserves_lines(lines in proptest::collection::vec("[^\r\n]*", 0..32)) {
            let mut content = String::new();
            for line in &lines {
                content.push_str(line);
                content.push('\n');
            }
            let mut store = LineStore::from_reader("prop", io::Cursor::new(content));

            prop_assert_eq!(store.count(), lines.len());
            for (i, line) in lines.iter().enumerate() {
                prop_assert_eq!(store.line_at(i).unwrap(), line.as_str());
            }
            for line in &lines {
                prop_assert_eq!(store.next_line(), Some(line.as_str()));
            }
            prop_assert_eq!(store.next_line(), None);
        }
    }
}
