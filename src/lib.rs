//! twinlog - leveled logging to a colored console and a plain-text log file
//!
//! Every record goes to both sinks; the file copy is the console copy with its
//! color sequences stripped.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{LogError, SinkKind};
pub use logging::{ExitOnFatal, Level, Logger, Outcome, Palette, Termination};
