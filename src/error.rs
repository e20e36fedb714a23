//! Error types for log delivery

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two sinks a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    File,
}

impl SinkKind {
    /// Get the display name for this sink
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::Console => "console",
            SinkKind::File => "log file",
        }
    }
}

/// Errors produced while opening or writing to a logger's sinks
#[derive(Debug, Error)]
pub enum LogError {
    /// Writing to the console stream failed; the file write was skipped
    #[error("failed to write to console")]
    Console(#[source] io::Error),

    /// Writing to the log file failed after the console write succeeded
    #[error("failed to write to log file")]
    File(#[source] io::Error),

    /// The log file could not be opened for appending
    #[error("failed to open log file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LogError {
    /// The sink the failure belongs to
    pub fn sink(&self) -> SinkKind {
        match self {
            LogError::Console(_) => SinkKind::Console,
            LogError::File(_) | LogError::Open { .. } => SinkKind::File,
        }
    }

    /// The underlying I/O error
    pub fn io_error(&self) -> &io::Error {
        match self {
            LogError::Console(e) | LogError::File(e) => e,
            LogError::Open { source, .. } => source,
        }
    }
}
