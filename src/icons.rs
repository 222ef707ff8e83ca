//! Icon lookup for files, folders and resolved shortcuts
//!
//! The system image lists are tried first since they carry every size up
//! to 256x256. When that path fails the legacy `SHGetFileInfoW` icon query
//! is used, which only knows large and small icons.

use crate::error::{ApiResult, IconDumpError, Result};
use crate::platform::{ImageList, Platform};
use crate::size::IconSize;
use std::path::Path;

/// Extracts the shell icon for `path` at `size`
///
/// The returned guard owns the icon handle and destroys it when dropped.
///
/// # Errors
/// `IconUnavailable` when both the image list and the legacy query fail.
pub fn locate<P: Platform>(platform: &P, path: &Path, size: IconSize) -> Result<P::Icon> {
    match from_image_list(platform, path, size) {
        Ok(icon) => {
            log::debug!("Icon for {} from {:?} image list", path.display(), size.group());
            return Ok(icon);
        }
        Err(e) => log::debug!(
            "Image list lookup failed for {} ({}), using legacy query",
            path.display(),
            e
        ),
    }

    let large = size.legacy_large();
    platform.file_icon(path, large).map_err(|source| {
        log::debug!("Legacy icon query failed for {}: {}", path.display(), source);
        IconDumpError::IconUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Indexed lookup through the system image list for the size group
fn from_image_list<P: Platform>(platform: &P, path: &Path, size: IconSize) -> ApiResult<P::Icon> {
    let index = platform.system_icon_index(path)?;
    log::trace!("System icon index for {}: {}", path.display(), index);

    // Released at the end of this scope whether or not GetIcon worked
    let list = platform.image_list(size.group())?;
    list.icon(index)
}
