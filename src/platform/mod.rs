//! Boundary between the dump pipeline and the operating system
//!
//! Every OS resource the pipeline touches is handed out as an associated
//! guard type. Dropping the guard releases the resource, so the pipeline
//! never calls a release function itself.

use crate::error::ApiResult;
use crate::size::SizeGroup;
use std::path::Path;

#[cfg(windows)]
pub mod win32;

#[cfg(test)]
pub mod mock;

/// Path format requested from a shell link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPathMode {
    /// `SLGP_RAWPATH | SLGP_UNCPRIORITY`
    RawUncPriority,
    /// `SLGP_SHORTPATH`
    ShortPath,
}

/// Shell, COM and graphics services used by the pipeline
pub trait Platform {
    /// Owned icon handle, destroyed on drop
    type Icon;

    /// Borrowed reference to a system image list, released on drop
    type ImageList: ImageList<Icon = Self::Icon>;

    /// Initialized COM apartment, uninitialized on drop
    type Apartment;

    /// Shell link object, released on drop
    type Link: ShellLink;

    /// Running graphics subsystem, shut down on drop
    type Graphics: GraphicsSession<Icon = Self::Icon>;

    /// Index of the path's icon in the system image lists
    fn system_icon_index(&self, path: &Path) -> ApiResult<i32>;

    /// Acquires the system image list for a size group
    fn image_list(&self, group: SizeGroup) -> ApiResult<Self::ImageList>;

    /// Legacy direct lookup, which only knows large and small icons
    fn file_icon(&self, path: &Path, large: bool) -> ApiResult<Self::Icon>;

    /// Initializes COM for the calling thread in apartment-threaded mode
    fn initialize_com(&self) -> ApiResult<Self::Apartment>;

    /// Creates a shell link object inside an initialized apartment
    fn create_shell_link(&self, apartment: &Self::Apartment) -> ApiResult<Self::Link>;

    /// Starts the graphics subsystem
    fn start_graphics(&self) -> ApiResult<Self::Graphics>;
}

/// System image list
pub trait ImageList {
    type Icon;

    /// Extracts a caller-owned icon at `index`. A null handle is an error.
    fn icon(&self, index: i32) -> ApiResult<Self::Icon>;
}

/// Shell link (`.lnk`) reader
pub trait ShellLink {
    /// Loads a shortcut file read-only
    fn load(&self, path: &Path) -> ApiResult<()>;

    /// Target path stored in the loaded shortcut
    fn target_path(&self, mode: LinkPathMode) -> ApiResult<String>;
}

/// Graphics subsystem session
pub trait GraphicsSession {
    type Icon;

    /// Bitmap wrapping an icon, disposed on drop
    type Bitmap: Bitmap;

    fn bitmap_from_icon(&self, icon: &Self::Icon) -> ApiResult<Self::Bitmap>;
}

/// Bitmap owned by a graphics session
pub trait Bitmap {
    /// Encodes the bitmap as PNG and writes it to `path`
    fn save_png(&self, path: &Path) -> ApiResult<()>;
}
