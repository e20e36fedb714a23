//! Leveled logging to a colored console and a plain-text log file
//!
//! Provides the level dispatcher, the sink writer and ANSI stripping, plus the
//! stderr diagnostics used by the crate itself.

mod diagnostics;
mod level;
mod logger;
mod macros;
mod sink;

pub use diagnostics::{diagnostic_filter, init_diagnostics, DEFAULT_DIAGNOSTIC_FILTER};
pub use level::{Level, Palette};
pub use logger::{
    ExitOnFatal, Logger, Outcome, Record, Termination, DEFAULT_TIMESTAMP_FORMAT, FATAL_EXIT_CODE,
};
pub use sink::{strip_ansi, write_to_sink};
