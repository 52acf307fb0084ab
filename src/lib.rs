// Sprite cycling with dialogue lookup
// Line-oriented file stores plus a timer-gated cyclic selector

pub mod cli;
pub mod config;
pub mod dialogue;
pub mod io;
pub mod logging;
pub mod scene;
pub mod select;
pub mod time;
pub mod transcript;

#[doc(hidden)]
pub use log;

pub use cli::Cli;
pub use config::Options;
pub use logging::LogLevel;
