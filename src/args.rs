//! Command line parsing
//!
//! Flags take one or two dashes and an optional `=bool` value. Parsing
//! stops at the first positional argument, at a lone `-`, or after `--`.

use crate::error::{IconDumpError, Result};
use crate::size::IconSize;

pub const USAGE: &str = "Usage: icon_dump [-s|-m|-l|-xl] <file, folder or shortcut (.lnk)>

  -s     save the 16x16 small icon
  -m     save the 32x32 medium icon
  -l     save the 48x48 large icon (default)
  -xl    save the 256x256 jumbo icon, where the system provides one";

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dump the icon of `path`
    Dump { path: String, size: IconSize },
    /// Print usage and exit successfully
    Help,
}

#[derive(Debug, Default)]
struct SizeFlags {
    small: bool,
    medium: bool,
    large: bool,
    extra_large: bool,
}

impl SizeFlags {
    fn slot(&mut self, name: &str) -> Option<&mut bool> {
        match name {
            "s" => Some(&mut self.small),
            "m" => Some(&mut self.medium),
            "l" => Some(&mut self.large),
            "xl" => Some(&mut self.extra_large),
            _ => None,
        }
    }
}

/// Parses an `=value` boolean in any of its usual spellings
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses the arguments after the program name
///
/// # Errors
/// `Usage` for an unknown flag or a bad boolean value, `MissingPath` when
/// no positional argument follows the flags.
pub fn parse<I, S>(args: I, default_size: IconSize) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = SizeFlags::default();
    let mut path = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let arg = arg.as_ref();

        if arg == "--" {
            path = args.next().map(|a| a.as_ref().to_string());
            break;
        }
        if arg.len() < 2 || !arg.starts_with('-') {
            path = Some(arg.to_string());
            break;
        }

        let flag = arg.strip_prefix("--").unwrap_or(&arg[1..]);
        if flag.is_empty() || flag.starts_with('-') || flag.starts_with('=') {
            return Err(IconDumpError::usage(format!("bad flag syntax: {}", arg)));
        }

        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };

        if matches!(name, "h" | "help") {
            return Ok(Command::Help);
        }

        let slot = flags.slot(name).ok_or_else(|| {
            IconDumpError::usage(format!("flag provided but not defined: -{}", name))
        })?;
        *slot = match value {
            None => true,
            Some(v) => parse_bool(v).ok_or_else(|| {
                IconDumpError::usage(format!("invalid boolean value {:?} for -{}", v, name))
            })?,
        };
    }

    let path = path.ok_or(IconDumpError::MissingPath)?;

    let size = IconSize::from_flags(flags.small, flags.medium, flags.large, flags.extra_large)
        .unwrap_or(default_size);

    Ok(Command::Dump { path, size })
}
