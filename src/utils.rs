//! Utility functions for icon-dump
//!
//! Path helpers follow Windows rules on every host, so `C:\a\b.txt` and
//! `C:/a/b.txt` split the same way even when the tests run elsewhere.

use crate::size::IconSize;

/// Name used when a path has no stem to build the output name from
pub const FALLBACK_STEM: &str = "icon";

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

/// Strips a leading drive volume such as `C:`
fn strip_volume(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        &path[2..]
    } else {
        path
    }
}

/// Returns the last element of a path
///
/// Trailing separators are ignored. A bare root (`C:\`, `/`) or an empty
/// path has no last element and yields an empty string.
pub fn base_name(path: &str) -> &str {
    let trimmed = strip_volume(path).trim_end_matches(is_separator);
    match trimmed.rfind(is_separator) {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

/// Splits a file name at its last dot
///
/// The extension keeps its dot. `.ico` splits into `("", ".ico")` and
/// `a.tar.gz` into `("a.tar", ".gz")`.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) => name.split_at(i),
        None => (name, ""),
    }
}

/// Checks if a path names a Windows shortcut (.lnk file)
pub fn is_shortcut(path: &str) -> bool {
    let (_, ext) = split_extension(base_name(path));
    ext.eq_ignore_ascii_case(".lnk")
}

/// Builds the PNG file name for a source path and size
///
/// # Example
/// `C:\Target\App.exe` at 48x48 becomes `App_48.png`.
pub fn output_file_name(path: &str, size: IconSize) -> String {
    let (stem, _) = split_extension(base_name(path));
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
    format!("{}{}.png", stem, size.suffix())
}

/// Converts a wide string (UTF-16) to a Rust String
///
/// Stops at the first null, lossy on invalid surrogates.
pub fn from_wide_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

/// Converts an OS string to a null-terminated wide string (UTF-16)
///
/// This is required for Windows API calls that expect LPCWSTR.
#[cfg(windows)]
pub fn to_wide_string(s: impl AsRef<std::ffi::OsStr>) -> Vec<u16> {
    use std::os::windows::ffi::OsStrExt;

    s.as_ref()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}
