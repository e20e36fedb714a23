//! Configuration management for twinlog

use anyhow::{anyhow, Context, Result};
use chrono::format::{Item, StrftimeItems};
use crossterm::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::{Level, Palette, DEFAULT_TIMESTAMP_FORMAT};

/// Categories of disk errors for user-friendly messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskErrorKind {
    /// Disk is full or quota exceeded
    DiskFull,
    /// Permission denied
    PermissionDenied,
    /// File or directory not found
    NotFound,
    /// Stream closed by the reader (e.g. stdout piped into `head`)
    BrokenPipe,
    /// Other IO error
    Other,
}

impl DiskErrorKind {
    /// Get a user-friendly message for this error kind
    pub fn user_message(&self) -> &'static str {
        match self {
            DiskErrorKind::DiskFull => "disk full",
            DiskErrorKind::PermissionDenied => "permission denied",
            DiskErrorKind::NotFound => "file or directory not found",
            DiskErrorKind::BrokenPipe => "output closed",
            DiskErrorKind::Other => "write failed",
        }
    }
}

/// Categorize an IO error into a user-friendly category
pub fn categorize_io_error(e: &std::io::Error) -> DiskErrorKind {
    use std::io::ErrorKind;

    match e.kind() {
        ErrorKind::StorageFull | ErrorKind::WriteZero => DiskErrorKind::DiskFull,
        ErrorKind::PermissionDenied => DiskErrorKind::PermissionDenied,
        ErrorKind::NotFound => DiskErrorKind::NotFound,
        ErrorKind::BrokenPipe => DiskErrorKind::BrokenPipe,
        _ => {
            #[cfg(unix)]
            {
                if let Some(os_error) = e.raw_os_error() {
                    // ENOSPC = 28, EDQUOT = 122 on Linux and 69 on macOS
                    if os_error == 28 || os_error == 122 || os_error == 69 {
                        return DiskErrorKind::DiskFull;
                    }
                    // EACCES
                    if os_error == 13 {
                        return DiskErrorKind::PermissionDenied;
                    }
                }
            }
            DiskErrorKind::Other
        }
    }
}

/// Create a user-friendly error message from an IO error
pub fn friendly_io_error_message(e: &std::io::Error, context: &str) -> String {
    match categorize_io_error(e) {
        DiskErrorKind::Other => format!("{}: {}", context, e),
        kind => format!("{}: {}", context, kind.user_message()),
    }
}

/// Parse a crossterm color name such as `blue`, `dark_red` or `grey`
pub fn parse_color(name: &str) -> Result<Color> {
    Color::try_from(name.trim()).map_err(|_| anyhow!("Unknown color '{}'", name))
}

/// Check that a chrono format string renders without errors
pub fn validate_timestamp_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        anyhow::bail!("Invalid timestamp format '{}'", format);
    }
    Ok(())
}

/// Color names per level, as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorConfig {
    #[serde(default = "default_info_color")]
    pub info: String,
    #[serde(default = "default_debug_color")]
    pub debug: String,
    #[serde(default = "default_success_color")]
    pub success: String,
    #[serde(default = "default_warning_color")]
    pub warning: String,
    #[serde(default = "default_error_color")]
    pub error: String,
    #[serde(default = "default_fatal_color")]
    pub fatal: String,
}

fn default_info_color() -> String {
    "blue".to_string()
}

fn default_debug_color() -> String {
    "dark_blue".to_string()
}

fn default_success_color() -> String {
    "dark_green".to_string()
}

fn default_warning_color() -> String {
    "yellow".to_string()
}

fn default_error_color() -> String {
    "dark_red".to_string()
}

fn default_fatal_color() -> String {
    "red".to_string()
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            info: default_info_color(),
            debug: default_debug_color(),
            success: default_success_color(),
            warning: default_warning_color(),
            error: default_error_color(),
            fatal: default_fatal_color(),
        }
    }
}

impl ColorConfig {
    /// Get the configured color name for a level
    pub fn name(&self, level: Level) -> &str {
        match level {
            Level::Info => &self.info,
            Level::Debug => &self.debug,
            Level::Success => &self.success,
            Level::Warning => &self.warning,
            Level::Error => &self.error,
            Level::Fatal => &self.fatal,
        }
    }

    /// Resolve every name into a palette
    pub fn palette(&self) -> Result<Palette> {
        let mut palette = Palette::default();
        for level in Level::ALL {
            let color = parse_color(self.name(level))
                .with_context(|| format!("Invalid color for {} level", level.as_str()))?;
            palette.set(level, color);
        }
        Ok(palette)
    }
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Log file path; a leading `~` expands to the home directory
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Whether debug records are written
    #[serde(default)]
    pub show_debug: bool,

    /// chrono format for the timestamp in level prefixes
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Console colors per level
    #[serde(default)]
    pub colors: ColorConfig,
}

fn default_log_file() -> String {
    config_dir().join("twinlog.log").display().to_string()
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            show_debug: false,
            timestamp_format: default_timestamp_format(),
            colors: ColorConfig::default(),
        }
    }
}

impl LoggerConfig {
    /// Load configuration from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Reject colors and timestamp formats the logger could not render
    pub fn validate(&self) -> Result<()> {
        validate_timestamp_format(&self.timestamp_format)?;
        self.colors.palette()?;
        Ok(())
    }

    /// Resolved log file path with `~` expanded
    pub fn log_file_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.log_file).as_ref())
    }

    /// Resolved console palette
    pub fn palette(&self) -> Result<Palette> {
        self.colors.palette()
    }
}

/// Get the base configuration directory (~/.twinlog)
/// Falls back to ./.twinlog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".twinlog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".twinlog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
