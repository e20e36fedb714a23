//! Severity levels and their console colors

use crossterm::style::Color;

/// Severity of a log record
///
/// The order only matters for the numeric codes; there is no threshold filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Debug,
    Success,
    Warning,
    Error,
    Fatal,
}

impl Level {
    /// All levels in code order
    pub const ALL: [Level; 6] = [
        Level::Info,
        Level::Debug,
        Level::Success,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Success => "SUCCESS",
            Level::Warning => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Tag written before the timestamp, or `None` for levels rendered without a prefix
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Level::Success => None,
            other => Some(other.as_str()),
        }
    }

    /// Numeric code of this level
    pub fn code(&self) -> u16 {
        match self {
            Level::Info => 0,
            Level::Debug => 1,
            Level::Success => 2,
            Level::Warning => 3,
            Level::Error => 4,
            Level::Fatal => 5,
        }
    }

    /// Look up a level by numeric code
    pub fn from_code(code: u16) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.code() == code)
    }

    /// Parse a level name as typed on the command line
    pub fn from_name(name: &str) -> Option<Level> {
        match name.to_ascii_lowercase().as_str() {
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            "success" => Some(Level::Success),
            "warn" | "warning" => Some(Level::Warning),
            "error" => Some(Level::Error),
            "fatal" => Some(Level::Fatal),
            _ => None,
        }
    }

    /// Whether a record of this level ends the hosting process
    pub fn is_terminal(&self) -> bool {
        matches!(self, Level::Fatal)
    }
}

/// Console color for each level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub info: Color,
    pub debug: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub fatal: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            info: Color::Blue,
            debug: Color::DarkBlue,
            success: Color::DarkGreen,
            warning: Color::Yellow,
            error: Color::DarkRed,
            fatal: Color::Red,
        }
    }
}

impl Palette {
    /// Color used for a level
    pub fn color(&self, level: Level) -> Color {
        match level {
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Success => self.success,
            Level::Warning => self.warning,
            Level::Error => self.error,
            Level::Fatal => self.fatal,
        }
    }

    /// Replace the color used for a level
    pub fn set(&mut self, level: Level, color: Color) {
        match level {
            Level::Info => self.info = color,
            Level::Debug => self.debug = color,
            Level::Success => self.success = color,
            Level::Warning => self.warning = color,
            Level::Error => self.error = color,
            Level::Fatal => self.fatal = color,
        }
    }
}
