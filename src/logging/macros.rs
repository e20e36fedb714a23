//! Formatting macros over a `Logger`
//!
//! Each macro interpolates its arguments with `format_args!` and forwards to the
//! matching `*f` method, returning its `Result<Outcome, LogError>`.
//!
//! ```rust,ignore
//! use twinlog::{log_warn, Logger};
//!
//! let mut logger = Logger::open("app.log", false)?;
//! log_warn!(logger, "failed {} times", 3)?;
//! ```

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.infof(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debugf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_success {
    ($logger:expr, $($arg:tt)*) => {
        $logger.successf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warnf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.errorf(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)*) => {
        $logger.fatalf(format_args!($($arg)*))
    };
}

/// Info record in an explicit color: `log_info_color!(logger, Color::Cyan, "{} ready", name)`
#[macro_export]
macro_rules! log_info_color {
    ($logger:expr, $color:expr, $($arg:tt)*) => {
        $logger.info_colorf($color, format_args!($($arg)*))
    };
}
