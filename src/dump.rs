//! Dump pipeline: shortcut resolution, icon lookup, PNG encoding

use crate::config::Config;
use crate::error::Result;
use crate::platform::Platform;
use crate::size::IconSize;
use crate::utils::{is_shortcut, output_file_name};
use crate::{icons, png, shortcut};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Saves the icon of `input` as a PNG and returns the written path
///
/// Shortcuts are resolved first and both the shortcut and its absolute
/// target are reported on `out`. The icon handle is released before this
/// returns, whether or not the save worked.
pub fn run<P: Platform>(
    platform: &P,
    config: &Config,
    input: &str,
    size: IconSize,
    out: &mut impl Write,
) -> Result<PathBuf> {
    let target;
    let effective = if is_shortcut(input) {
        target = shortcut::resolve(platform, Path::new(input))?;
        let absolute = std::path::absolute(&target).unwrap_or_else(|_| PathBuf::from(&target));

        // Console output is best effort
        let _ = writeln!(out, "Shortcut: {:?}", input);
        let _ = writeln!(out, "Target  : {:?}", absolute.display().to_string());
        target.as_str()
    } else {
        input
    };

    let icon = icons::locate(platform, Path::new(effective), size)?;

    let output = config.output_path(&output_file_name(effective, size));
    log::info!("Saving {} icon of {} to {}", size, effective, output.display());

    png::save_as_png(platform, &icon, &output)?;
    Ok(output)
}
