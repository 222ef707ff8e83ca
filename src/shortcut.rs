//! Shortcut (.lnk) resolution
//!
//! Loads the shortcut into a shell link object inside a COM apartment that
//! lives only for the duration of the call.

use crate::error::{ApiError, ApiResult, IconDumpError, Result};
use crate::platform::{LinkPathMode, Platform, ShellLink};
use std::path::Path;

/// Returns the target path stored in a shortcut file
///
/// The raw path with UNC priority is requested first and the short path
/// second; callers get whichever succeeded.
///
/// # Errors
/// `Resolve` when COM cannot be initialized, the shortcut cannot be
/// created or loaded, both path requests fail, or the target is empty.
pub fn resolve<P: Platform>(platform: &P, shortcut: &Path) -> Result<String> {
    let fail = |reason: String| IconDumpError::resolve(shortcut, reason);

    let apartment = platform
        .initialize_com()
        .map_err(|e| fail(e.to_string()))?;
    // Declared after the apartment so it is released first
    let link = platform
        .create_shell_link(&apartment)
        .map_err(|e| fail(e.to_string()))?;

    link.load(shortcut).map_err(|e| fail(e.to_string()))?;

    let target = match link.target_path(LinkPathMode::RawUncPriority).and_then(non_empty) {
        Ok(target) => target,
        Err(raw) => {
            log::debug!("Raw path request failed ({}), retrying with short path", raw);
            link.target_path(LinkPathMode::ShortPath)
                .map_err(|short| fail(format!("{} / {}", raw, short)))?
        }
    };

    if target.is_empty() {
        return Err(fail("shortcut has no filesystem target".to_string()));
    }

    log::debug!("{} -> {}", shortcut.display(), target);
    Ok(target)
}

/// `GetPath` reports `S_FALSE` with an empty buffer when the link has no path
fn non_empty(target: String) -> ApiResult<String> {
    if target.is_empty() {
        return Err(ApiError::status("IShellLinkW::GetPath", 1));
    }
    Ok(target)
}
