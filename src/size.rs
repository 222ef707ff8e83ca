//! Icon size classes
//!
//! Maps the four sizes the tool can produce onto the shell's system image
//! list groups and onto the output file name suffix.

use std::fmt;

/// Requested output size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconSize {
    /// 16x16
    Small,
    /// 32x32
    Medium,
    /// 48x48
    #[default]
    Large,
    /// 256x256, only where the shell provides a jumbo list
    ExtraLarge,
}

/// System image list size group (`SHIL_*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeGroup {
    Small,
    Large,
    ExtraLarge,
    Jumbo,
}

impl IconSize {
    pub const ALL: [IconSize; 4] = [
        IconSize::Small,
        IconSize::Medium,
        IconSize::Large,
        IconSize::ExtraLarge,
    ];

    /// Edge length in pixels
    pub fn pixels(self) -> u32 {
        match self {
            IconSize::Small => 16,
            IconSize::Medium => 32,
            IconSize::Large => 48,
            IconSize::ExtraLarge => 256,
        }
    }

    /// Image list group holding icons of this size
    pub fn group(self) -> SizeGroup {
        match self {
            IconSize::Small => SizeGroup::Small,
            IconSize::Medium => SizeGroup::Large,
            IconSize::Large => SizeGroup::ExtraLarge,
            IconSize::ExtraLarge => SizeGroup::Jumbo,
        }
    }

    /// Whether the legacy file-info fallback should ask for the large icon.
    /// That call only knows "small" and "large".
    pub fn legacy_large(self) -> bool {
        !matches!(self, IconSize::Small)
    }

    /// Output file name suffix, e.g. `_48`
    pub fn suffix(self) -> String {
        format!("_{}", self.pixels())
    }

    /// Picks the size from the command line flags. The largest set flag
    /// wins; with none set the default applies.
    pub fn from_flags(small: bool, medium: bool, large: bool, extra_large: bool) -> Option<Self> {
        if extra_large {
            Some(IconSize::ExtraLarge)
        } else if large {
            Some(IconSize::Large)
        } else if medium {
            Some(IconSize::Medium)
        } else if small {
            Some(IconSize::Small)
        } else {
            None
        }
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let px = self.pixels();
        write!(f, "{}x{}", px, px)
    }
}

impl SizeGroup {
    /// `SHIL_*` value passed to `SHGetImageList`
    pub fn shell_id(self) -> i32 {
        match self {
            SizeGroup::Small => 0,
            SizeGroup::Large => 1,
            SizeGroup::ExtraLarge => 2,
            SizeGroup::Jumbo => 4,
        }
    }
}
