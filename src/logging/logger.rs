//! Dual-sink leveled logger
//!
//! Every record is rendered once with a color for the console, then written to the
//! log file with the color sequences stripped. Console and file text never differ
//! in anything but the escape sequences.

use std::fmt::{self, Write as _};
use std::fs::{File, OpenOptions};
use std::io::{self, Stdout, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::style::{Color, Stylize};

use super::level::{Level, Palette};
use super::sink::{strip_ansi, write_to_sink};
use crate::config::LoggerConfig;
use crate::error::LogError;

/// Default chrono format for the timestamp inside the level prefix
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z";

/// Exit status used when a fatal record terminates the process
pub const FATAL_EXIT_CODE: i32 = 1;

/// A single record, alive for the duration of one log call
#[derive(Debug, Clone)]
pub struct Record {
    /// Time the record was emitted
    pub timestamp: DateTime<Local>,
    /// Severity
    pub level: Level,
    /// Message text, terminated by exactly one newline
    pub message: String,
}

impl Record {
    /// Create a record stamped with the current time
    pub fn new(level: Level, message: &str) -> Self {
        let mut message = message.trim_end_matches('\n').to_string();
        message.push('\n');
        Self {
            timestamp: Local::now(),
            level,
            message,
        }
    }
}

/// What a log call did
#[derive(Debug)]
pub enum Outcome {
    /// Both sinks received the record
    Written,
    /// Nothing was written: debug output is disabled or the level code is unknown
    Suppressed,
    /// A fatal record was emitted and the caller must end the process
    Terminate(Termination),
}

impl Outcome {
    pub fn is_terminate(&self) -> bool {
        matches!(self, Outcome::Terminate(_))
    }
}

/// Signal raised by a fatal record once its writes were attempted
#[derive(Debug)]
pub struct Termination {
    write_error: Option<LogError>,
}

impl Termination {
    /// Exit status the process should end with
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }

    /// The write failure that happened while emitting the fatal record, if any
    pub fn write_error(&self) -> Option<&LogError> {
        self.write_error.as_ref()
    }

    pub fn into_write_error(self) -> Option<LogError> {
        self.write_error
    }

    /// End the process with the fatal exit status
    pub fn exit(self) -> ! {
        if let Some(err) = &self.write_error {
            tracing::warn!("Fatal record was not fully written: {}", err);
        }
        std::process::exit(self.exit_code())
    }
}

/// Acts on the termination signal carried by a log call result
pub trait ExitOnFatal {
    /// Exit the process if the call emitted a fatal record, otherwise pass the result through
    fn exit_on_fatal(self) -> Self;
}

impl ExitOnFatal for Result<Outcome, LogError> {
    fn exit_on_fatal(self) -> Self {
        match self {
            Ok(Outcome::Terminate(termination)) => termination.exit(),
            other => other,
        }
    }
}

/// Logger writing every record to a console stream and a log file
///
/// Calls take `&mut self`; wrap the logger in a `Mutex` to share it between threads.
pub struct Logger<C = Stdout, F = File> {
    console: C,
    file: F,
    show_debug: bool,
    palette: Palette,
    timestamp_format: String,
}

impl Logger<Stdout, File> {
    /// Open `path` for appending (creating it if needed) and log to stdout alongside it
    pub fn open(path: impl AsRef<Path>, show_debug: bool) -> Result<Self, LogError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!("Logging to {}", path.display());

        Ok(Self::with_sinks(io::stdout(), file, show_debug))
    }

    /// Build a logger from configuration, creating the log file's directory if needed
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let path = config.log_file_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create log directory")?;
        }

        let palette = config.palette()?;
        let logger = Self::open(&path, config.show_debug)?
            .with_palette(palette)
            .with_timestamp_format(config.timestamp_format.clone());
        Ok(logger)
    }
}

impl<C: Write, F: Write> Logger<C, F> {
    /// Create a logger over arbitrary console and file writers
    pub fn with_sinks(console: C, file: F, show_debug: bool) -> Self {
        Self {
            console,
            file,
            show_debug,
            palette: Palette::default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Replace the level colors
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Replace the chrono format used for timestamps
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    pub fn set_show_debug(&mut self, show_debug: bool) {
        self.show_debug = show_debug;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn file(&self) -> &F {
        &self.file
    }

    /// Give back the console and file sinks
    pub fn into_sinks(self) -> (C, F) {
        (self.console, self.file)
    }

    /// Log `message` at `level` with the level's palette color
    pub fn log(&mut self, message: &str, level: Level) -> Result<Outcome, LogError> {
        let color = self.palette.color(level);
        self.dispatch(message, level, color)
    }

    /// Log `message` at `level` in a caller-chosen color
    pub fn log_with_color(
        &mut self,
        message: &str,
        level: Level,
        color: Color,
    ) -> Result<Outcome, LogError> {
        self.dispatch(message, level, color)
    }

    /// Log by numeric level code; unknown codes write nothing and succeed
    pub fn log_code(&mut self, message: &str, code: u16) -> Result<Outcome, LogError> {
        match Level::from_code(code) {
            Some(level) => self.log(message, level),
            None => Ok(Outcome::Suppressed),
        }
    }

    pub fn info(&mut self, message: &str) -> Result<Outcome, LogError> {
        self.log(message, Level::Info)
    }

    pub fn debug(&mut self, message: &str) -> Result<Outcome, LogError> {
        self.log(message, Level::Debug)
    }

    pub fn success(&mut self, message: &str) -> Result<Outcome, LogError> {
        self.log(message, Level::Success)
    }

    pub fn warn(&mut self, message: &str) -> Result<Outcome, LogError> {
        self.log(message, Level::Warning)
    }

    pub fn error(&mut self, message: &str) -> Result<Outcome, LogError> {
        self.log(message, Level::Error)
    }

    /// Log a fatal record; the result carries the termination signal
    pub fn fatal(&mut self, message: &str) -> Result<Outcome, LogError> {
        self.log(message, Level::Fatal)
    }

    pub fn infof(&mut self, args: fmt::Arguments<'_>) -> Result<Outcome, LogError> {
        self.info(&args.to_string())
    }

    pub fn debugf(&mut self, args: fmt::Arguments<'_>) -> Result<Outcome, LogError> {
        // Skip the interpolation when the record would be dropped anyway
        if !self.show_debug {
            return Ok(Outcome::Suppressed);
        }
        self.debug(&args.to_string())
    }

    pub fn successf(&mut self, args: fmt::Arguments<'_>) -> Result<Outcome, LogError> {
        self.success(&args.to_string())
    }

    pub fn warnf(&mut self, args: fmt::Arguments<'_>) -> Result<Outcome, LogError> {
        self.warn(&args.to_string())
    }

    pub fn errorf(&mut self, args: fmt::Arguments<'_>) -> Result<Outcome, LogError> {
        self.error(&args.to_string())
    }

    pub fn fatalf(&mut self, args: fmt::Arguments<'_>) -> Result<Outcome, LogError> {
        self.fatal(&args.to_string())
    }

    /// Info record in a caller-chosen color
    pub fn info_color(&mut self, message: &str, color: Color) -> Result<Outcome, LogError> {
        self.log_with_color(message, Level::Info, color)
    }

    pub fn info_colorf(
        &mut self,
        color: Color,
        args: fmt::Arguments<'_>,
    ) -> Result<Outcome, LogError> {
        self.info_color(&args.to_string(), color)
    }

    fn dispatch(&mut self, message: &str, level: Level, color: Color) -> Result<Outcome, LogError> {
        if level == Level::Debug && !self.show_debug {
            return Ok(Outcome::Suppressed);
        }

        let record = Record::new(level, message);
        let console_line = self.render(&record, color);
        let delivered = self.deliver(&console_line);

        if level.is_terminal() {
            tracing::debug!("Fatal record emitted, signalling termination");
            return Ok(Outcome::Terminate(Termination {
                write_error: delivered.err(),
            }));
        }

        delivered.map(|()| Outcome::Written)
    }

    /// Console first; a console failure skips the file
    fn deliver(&mut self, console_line: &str) -> Result<(), LogError> {
        write_to_sink(&mut self.console, console_line.as_bytes()).map_err(LogError::Console)?;

        let file_line = strip_ansi(console_line);
        write_to_sink(&mut self.file, file_line.as_bytes()).map_err(LogError::File)
    }

    fn render(&self, record: &Record, color: Color) -> String {
        let line = match record.level.prefix() {
            Some(prefix) => format!(
                "{}[{}] {}",
                prefix,
                self.format_timestamp(&record.timestamp),
                record.message
            ),
            None => record.message.clone(),
        };
        line.with(color).to_string()
    }

    fn format_timestamp(&self, timestamp: &DateTime<Local>) -> String {
        let mut out = String::new();
        // chrono reports a malformed format as a fmt error rather than text
        if write!(out, "{}", timestamp.format(&self.timestamp_format)).is_err() {
            out.clear();
            let _ = write!(out, "{}", timestamp.format(DEFAULT_TIMESTAMP_FORMAT));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::sink::strip_ansi;
    use tempfile::TempDir;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn memory_logger(show_debug: bool) -> Logger<Vec<u8>, Vec<u8>> {
        Logger::with_sinks(Vec::new(), Vec::new(), show_debug)
    }

    fn sinks(logger: Logger<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (console, file) = logger.into_sinks();
        (
            String::from_utf8(console).unwrap(),
            String::from_utf8(file).unwrap(),
        )
    }

    #[test]
    fn test_file_matches_stripped_console_for_every_level() {
        for level in [Level::Info, Level::Success, Level::Warning, Level::Error] {
            let mut logger = memory_logger(false);
            let outcome = logger.log("disk at 91%", level).unwrap();
            assert!(matches!(outcome, Outcome::Written));

            let (console, file) = sinks(logger);
            assert!(console.contains('\x1b') || std::env::var_os("NO_COLOR").is_some());
            assert!(!file.contains('\x1b'));
            assert_eq!(strip_ansi(&console), file);
        }
    }

    #[test]
    fn test_info_example() {
        let mut logger = memory_logger(false);
        logger.info("hello").unwrap();
        let (console, file) = sinks(logger);

        let ts = file
            .strip_prefix("INFO[")
            .and_then(|rest| rest.strip_suffix("] hello\n"))
            .expect("file line has INFO prefix");
        assert!(!ts.is_empty());

        let expected = format!("INFO[{}] hello\n", ts).with(Color::Blue).to_string();
        assert_eq!(console, expected);
    }

    #[test]
    fn test_debug_suppressed_when_disabled() {
        let mut logger = memory_logger(false);
        let outcome = logger.debug("hidden").unwrap();
        assert!(matches!(outcome, Outcome::Suppressed));

        let outcome = logger.debugf(format_args!("hidden {}", 2)).unwrap();
        assert!(matches!(outcome, Outcome::Suppressed));

        let (console, file) = sinks(logger);
        assert!(console.is_empty());
        assert!(file.is_empty());
    }

    #[test]
    fn test_debug_written_when_enabled() {
        let mut logger = memory_logger(true);
        logger.debug("visible").unwrap();
        let (console, file) = sinks(logger);

        assert!(file.starts_with("DEBUG["));
        assert!(file.ends_with("] visible\n"));
        assert_eq!(strip_ansi(&console), file);
    }

    #[test]
    fn test_debug_flag_can_be_toggled() {
        let mut logger = memory_logger(false);
        logger.set_show_debug(true);
        assert!(logger.show_debug());
        assert!(matches!(logger.debug("now on").unwrap(), Outcome::Written));
    }

    #[test]
    fn test_exactly_one_trailing_newline() {
        for message in ["plain", "already\n", "many\n\n\n", ""] {
            let mut logger = memory_logger(true);
            logger.warn(message).unwrap();
            let (_, file) = sinks(logger);

            assert!(file.ends_with('\n'));
            assert!(!file.ends_with("\n\n"), "double newline for {:?}", message);
        }
    }

    #[test]
    fn test_success_has_no_prefix() {
        let mut logger = memory_logger(false);
        logger.success("deployed").unwrap();
        let (console, file) = sinks(logger);

        assert_eq!(file, "deployed\n");
        assert_eq!(strip_ansi(&console), "deployed\n");
    }

    #[test]
    fn test_console_failure_skips_file() {
        let mut logger = Logger::with_sinks(FailingWriter, Vec::<u8>::new(), false);
        let err = logger.error("lost").unwrap_err();

        assert!(matches!(err, LogError::Console(_)));
        assert!(logger.file().is_empty());
    }

    #[test]
    fn test_file_failure_is_returned_after_console_write() {
        let mut logger = Logger::with_sinks(Vec::<u8>::new(), FailingWriter, false);
        let err = logger.info("half").unwrap_err();

        assert!(matches!(err, LogError::File(_)));
        let console = String::from_utf8(logger.console().clone()).unwrap();
        assert!(strip_ansi(&console).ends_with("] half\n"));
    }

    #[test]
    fn test_fatal_signals_termination() {
        let mut logger = memory_logger(false);
        let outcome = logger.fatal("boom").unwrap();

        match outcome {
            Outcome::Terminate(termination) => {
                assert_eq!(termination.exit_code(), 1);
                assert!(termination.write_error().is_none());
            }
            other => panic!("expected termination, got {:?}", other),
        }

        let (console, file) = sinks(logger);
        assert!(file.starts_with("FATAL["));
        assert!(file.ends_with("] boom\n"));
        assert_eq!(
            console,
            file.clone().with(Palette::default().fatal).to_string()
        );
    }

    #[test]
    fn test_fatal_terminates_even_when_writes_fail() {
        let mut logger = Logger::with_sinks(Vec::<u8>::new(), FailingWriter, false);
        let outcome = logger.fatal("boom").unwrap();
        let Outcome::Terminate(termination) = outcome else {
            panic!("expected termination");
        };
        assert!(matches!(termination.into_write_error(), Some(LogError::File(_))));

        let mut logger = Logger::with_sinks(FailingWriter, Vec::<u8>::new(), false);
        let outcome = logger.fatalf(format_args!("boom {}", 2)).unwrap();
        assert!(outcome.is_terminate());
        assert!(logger.file().is_empty());
    }

    #[test]
    fn test_formatted_matches_plain() {
        let mut formatted = memory_logger(false).with_timestamp_format("fixed");
        let mut plain = memory_logger(false).with_timestamp_format("fixed");

        formatted.warnf(format_args!("failed {} times", 3)).unwrap();
        plain.warn("failed 3 times").unwrap();

        assert_eq!(sinks(formatted), sinks(plain));
    }

    #[test]
    fn test_info_color_override() {
        let mut logger = memory_logger(false).with_timestamp_format("t");
        logger.info_color("custom", Color::Magenta).unwrap();
        logger
            .info_colorf(Color::Cyan, format_args!("{} and {}", "a", "b"))
            .unwrap();
        let (console, file) = sinks(logger);

        let expected_console = format!(
            "{}{}",
            "INFO[t] custom\n".with(Color::Magenta),
            "INFO[t] a and b\n".with(Color::Cyan)
        );
        assert_eq!(console, expected_console);
        assert_eq!(file, "INFO[t] custom\nINFO[t] a and b\n");
    }

    #[test]
    fn test_embedded_color_codes_are_stripped_from_file() {
        let mut logger = memory_logger(false).with_timestamp_format("t");
        let message = format!("status {}", "ok".with(Color::Green));
        logger.info(&message).unwrap();
        let (console, file) = sinks(logger);

        assert!(console.contains(&message));
        assert_eq!(file, "INFO[t] status ok\n");
    }

    #[test]
    fn test_log_code_dispatch() {
        let mut logger = memory_logger(false).with_timestamp_format("t");
        assert!(matches!(logger.log_code("by code", 3).unwrap(), Outcome::Written));
        assert!(matches!(logger.log_code("unknown", 42).unwrap(), Outcome::Suppressed));

        let (_, file) = sinks(logger);
        assert_eq!(file, "WARN[t] by code\n");
    }

    #[test]
    fn test_prefixes_per_level() {
        let mut logger = memory_logger(true).with_timestamp_format("t");
        logger.info("a").unwrap();
        logger.debug("b").unwrap();
        logger.success("c").unwrap();
        logger.warn("d").unwrap();
        logger.error("e").unwrap();
        let (_, file) = sinks(logger);

        assert_eq!(file, "INFO[t] a\nDEBUG[t] b\nc\nWARN[t] d\nERROR[t] e\n");
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back() {
        let mut logger = memory_logger(false).with_timestamp_format("%Q");
        logger.info("still logged").unwrap();
        let (_, file) = sinks(logger);

        assert!(file.starts_with("INFO["));
        assert!(!file.starts_with("INFO[%Q]"));
        assert!(file.ends_with("] still logged\n"));
    }

    #[test]
    fn test_independent_instances() {
        let mut first = memory_logger(false).with_timestamp_format("t");
        let mut second = memory_logger(true).with_timestamp_format("t");

        first.info("one").unwrap();
        second.debug("two").unwrap();

        assert_eq!(sinks(first).1, "INFO[t] one\n");
        assert_eq!(sinks(second).1, "DEBUG[t] two\n");
    }

    #[test]
    fn test_open_appends_to_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        std::fs::write(&path, "earlier\n").unwrap();

        let mut logger = Logger::open(&path, false).unwrap();
        logger.success("appended").unwrap();
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier\nappended\n");
    }

    #[test]
    fn test_open_reports_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("app.log");

        let err = Logger::open(&path, false).err().expect("open should fail");
        assert!(matches!(err, LogError::Open { .. }));
    }
}
