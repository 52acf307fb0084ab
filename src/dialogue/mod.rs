//! Dialogue text loaded from delimited `KEY*VALUE` files

pub mod map;
pub mod parser;

pub use map::{DialogueError, DialogueMap, LineError, SaveError};
pub use parser::{KeyValueParser, ParseError, DEFAULT_DELIMITER};
