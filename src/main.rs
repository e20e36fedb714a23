use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use twinlog::config::{self, LoggerConfig};
use twinlog::logging;
use twinlog::{ExitOnFatal, Level, Logger};

/// Exit status when a record could not be written
const WRITE_FAILURE_EXIT_CODE: u8 = 2;

/// Write one record to the console and the log file
#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Config file to read instead of ~/.twinlog/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file to append to, overriding the config
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Emit debug records
    #[arg(long, short = 'd', default_value_t = false)]
    debug: bool,

    /// Console color for this record (e.g. `cyan`, `dark_magenta`)
    #[arg(long, short = 'c')]
    color: Option<String>,

    /// Level: info, debug, success, warn, error or fatal
    #[arg(value_parser = parse_level)]
    level: Level,

    /// Message words, joined with spaces
    #[arg(required = true, allow_hyphen_values = true)]
    message: Vec<String>,
}

fn parse_level(name: &str) -> Result<Level, String> {
    Level::from_name(name).ok_or_else(|| format!("unknown level '{}'", name))
}

fn main() -> ExitCode {
    logging::init_diagnostics();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("twinlog: {:#}", e);
            ExitCode::from(WRITE_FAILURE_EXIT_CODE)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => LoggerConfig::load_from(path)?,
        None => LoggerConfig::load()?,
    };
    if let Some(file) = &cli.file {
        config.log_file = file.display().to_string();
    }
    if cli.debug {
        config.show_debug = true;
    }

    let mut logger = Logger::from_config(&config)?;
    let message = cli.message.join(" ");

    let result = match &cli.color {
        Some(name) => {
            let color = config::parse_color(name)?;
            logger.log_with_color(&message, cli.level, color)
        }
        None => logger.log(&message, cli.level),
    };

    match result.exit_on_fatal() {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            let context = format!("Failed to write to {}", e.sink().as_str());
            eprintln!(
                "twinlog: {}",
                config::friendly_io_error_message(e.io_error(), &context)
            );
            Ok(ExitCode::from(WRITE_FAILURE_EXIT_CODE))
        }
    }
}
