//! icon-dump - save the shell icon of any path as a PNG
//!
//! Looks up the icon Windows Explorer shows for a file, folder or shortcut
//! and writes it next to you as `<name>_<size>.png`. Shortcuts are resolved
//! to their target first.
//!
//! ## Usage
//!
//! ```bash
//! icon_dump.exe -xl "C:\Program Files\App\app.exe"
//! icon_dump.exe -s "%USERPROFILE%\Desktop\Browser.lnk"
//! ```
//!
//! Set `RUST_LOG=debug` to see which lookup produced the icon.

#![cfg_attr(not(windows), allow(dead_code))]

// Modules
mod args;
mod config;
mod dump;
mod error;
mod icons;
mod platform;
mod png;
mod shortcut;
mod size;
mod utils;

use args::Command;
use config::Config;
use error::{IconDumpError, Result};
use size::IconSize;
use std::path::PathBuf;

/// Application entry point
///
/// Initializes logging, parses the command line and maps the outcome to
/// the process exit code.
fn main() {
    init_logging();

    let config = Config::load();
    let command = match args::parse(std::env::args().skip(1), config.default_size) {
        Ok(command) => command,
        Err(e) => {
            println!("{}", usage_error_text(&e));
            std::process::exit(e.exit_code());
        }
    };

    let (path, size) = match command {
        Command::Help => {
            println!("{}", args::USAGE);
            return;
        }
        Command::Dump { path, size } => (path, size),
    };

    match run(&config, &path, size) {
        Ok(output) => println!("Saved: {}", output.display()),
        Err(e) => {
            log::debug!("{:?}", e);
            println!("{}", failure_message(&e));
            std::process::exit(e.exit_code());
        }
    }
}

/// Runs the dump against the real shell
#[cfg(windows)]
fn run(config: &Config, path: &str, size: IconSize) -> Result<PathBuf> {
    let platform = platform::win32::Win32Platform;
    let stdout = std::io::stdout();
    dump::run(&platform, config, path, size, &mut stdout.lock())
}

#[cfg(not(windows))]
fn run(_config: &Config, _path: &str, _size: IconSize) -> Result<PathBuf> {
    Err(IconDumpError::Unsupported(std::env::consts::OS))
}

/// Console text for a command line error
///
/// A missing path prints the usage alone.
fn usage_error_text(error: &IconDumpError) -> String {
    match error {
        IconDumpError::MissingPath => args::USAGE.to_string(),
        _ => format!("{}\n{}", error, args::USAGE),
    }
}

/// Console message for a failed run
fn failure_message(error: &IconDumpError) -> String {
    let stage = match error {
        IconDumpError::Resolve { .. } => "Failed to resolve shortcut",
        IconDumpError::IconUnavailable { .. } => "Failed to get icon",
        IconDumpError::Encode { .. } => "Failed to save PNG",
        IconDumpError::Usage(_) | IconDumpError::MissingPath | IconDumpError::Unsupported(_) => {
            return error.to_string()
        }
    };
    format!("{}: {}", stage, error)
}

/// Initializes the logging system
///
/// Uses env_logger with a custom format on stderr.
/// Set RUST_LOG environment variable to control log level.
fn init_logging() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let level_style = match record.level() {
                log::Level::Error => "\x1b[31m", // Red
                log::Level::Warn => "\x1b[33m",  // Yellow
                log::Level::Info => "\x1b[32m",  // Green
                log::Level::Debug => "\x1b[36m", // Cyan
                log::Level::Trace => "\x1b[90m", // Gray
            };

            writeln!(
                buf,
                "{}{:5}\x1b[0m {} - {}",
                level_style,
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
