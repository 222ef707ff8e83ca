//! Icon to PNG conversion
//!
//! Wraps the icon in a GDI+ bitmap and saves it through the PNG encoder.

use crate::error::{ApiError, IconDumpError, Result};
use crate::platform::{Bitmap, GraphicsSession, Platform};
use std::path::Path;

/// Writes `icon` to `output` as a PNG
///
/// The bitmap is disposed before the graphics subsystem shuts down, on
/// success and failure alike. The icon itself stays with the caller.
pub fn save_as_png<P: Platform>(platform: &P, icon: &P::Icon, output: &Path) -> Result<()> {
    let encode_error = |source: ApiError| IconDumpError::Encode {
        path: output.to_path_buf(),
        source,
    };

    let graphics = platform.start_graphics().map_err(encode_error)?;
    let bitmap = graphics.bitmap_from_icon(icon).map_err(encode_error)?;

    bitmap.save_png(output).map_err(|source| {
        if source.is_status() {
            log::debug!("Encoder returned a bare status for {}", output.display());
        }
        encode_error(source)
    })?;

    log::debug!("Wrote {}", output.display());
    Ok(())
}
