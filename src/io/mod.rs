//! Line-oriented file I/O
//!
//! [`LineStore`] loads a whole text file up front, [`LineSink`] collects
//! lines and writes them out in one go. Neither keeps a handle open between
//! calls.

pub mod files;
pub mod line_sink;
pub mod line_store;

pub use files::{file_exists, is_readable, FileError};
pub use line_sink::{FlushPolicy, LineSink, SinkError};
pub use line_store::{LineStore, LoadStatus, StoreError};
