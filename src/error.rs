//! Error types for icon-dump
//!
//! Two layers: [`ApiError`] describes a single failed platform call, and
//! [`IconDumpError`] is what the pipeline stages report to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using IconDumpError
pub type Result<T> = std::result::Result<T, IconDumpError>;

/// Result of a single platform call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// GDI+ `Win32Error` status, the only one backed by the thread's last error
pub const GDIPLUS_WIN32_ERROR: i32 = 7;

/// A failed call into the operating system
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The call failed and the OS reported an error code
    #[error("{call} failed: {message} (0x{code:08X})")]
    Os {
        call: &'static str,
        code: u32,
        message: String,
    },

    /// The call returned a non-success status with no OS error attached
    #[error("{call} failed, status={status}")]
    Status { call: &'static str, status: i32 },
}

impl ApiError {
    pub fn os(call: &'static str, code: u32, message: impl Into<String>) -> Self {
        Self::Os {
            call,
            code,
            message: message.into(),
        }
    }

    pub fn status(call: &'static str, status: i32) -> Self {
        Self::Status { call, status }
    }

    /// Error for a GDI+ call that returned `status`
    ///
    /// `last_error` is only read for `Win32Error`; every other status is
    /// reported as is, whatever an earlier call left in the last error.
    pub fn gdiplus(
        call: &'static str,
        status: i32,
        last_error: impl FnOnce() -> Option<ApiError>,
    ) -> Self {
        if status == GDIPLUS_WIN32_ERROR {
            if let Some(os) = last_error() {
                return os;
            }
        }
        Self::status(call, status)
    }

    /// Name of the platform call that failed
    pub fn call(&self) -> &'static str {
        match self {
            ApiError::Os { call, .. } | ApiError::Status { call, .. } => call,
        }
    }

    /// True when the failure is a bare status code without an OS error
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

/// Main error type for icon-dump operations
#[derive(Error, Debug)]
pub enum IconDumpError {
    /// The shortcut could not be loaded or has no usable target
    #[error("cannot resolve shortcut {path}: {reason}")]
    Resolve { path: PathBuf, reason: String },

    /// Neither the image list nor the legacy lookup produced an icon
    #[error("no icon available for {path}: {source}")]
    IconUnavailable {
        path: PathBuf,
        #[source]
        source: ApiError,
    },

    /// The graphics subsystem failed to produce or write the PNG
    #[error("cannot write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: ApiError,
    },

    /// Bad command line input
    #[error("{0}")]
    Usage(String),

    /// No file, folder or shortcut was given
    #[error("missing path argument")]
    MissingPath,

    /// Host without the shell icon APIs
    #[error("icon extraction is only supported on Windows (running on {0})")]
    Unsupported(&'static str),
}

impl IconDumpError {
    pub fn resolve(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Resolve {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            IconDumpError::Usage(_) | IconDumpError::MissingPath => 2,
            _ => 1,
        }
    }
}

#[cfg(windows)]
impl ApiError {
    /// Wraps a `windows` crate error raised by `call`
    pub fn from_windows(call: &'static str, err: windows::core::Error) -> Self {
        Self::os(call, err.code().0 as u32, err.message())
    }
}
