//! Win32 implementation of the platform boundary
//!
//! Shell icon lookup goes through `SHGetFileInfoW` and `SHGetImageList`,
//! shortcuts through `IShellLinkW`/`IPersistFile`, and PNG encoding through
//! GDI+. Each handle is wrapped in a guard that releases it on drop.

use super::{Bitmap, GraphicsSession, ImageList, LinkPathMode, Platform, ShellLink};
use crate::error::{ApiError, ApiResult};
use crate::size::SizeGroup;
use crate::utils::{from_wide_string, to_wide_string};
use std::marker::PhantomData;
use std::path::Path;
use windows::core::{Interface, GUID, PCWSTR};
use windows::Win32::Foundation::{SetLastError, ERROR_SUCCESS, MAX_PATH};
use windows::Win32::Graphics::GdiPlus::{
    GdipCreateBitmapFromHICON, GdipDisposeImage, GdipSaveImageToFile, GdiplusShutdown,
    GdiplusStartup, GdiplusStartupInput, GpBitmap, GpImage, Status,
};
use windows::Win32::Storage::FileSystem::{FILE_FLAGS_AND_ATTRIBUTES, WIN32_FIND_DATAW};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, IPersistFile, CLSCTX_INPROC_SERVER,
    COINIT_APARTMENTTHREADED, STGM_READ,
};
use windows::Win32::UI::Controls::{IImageList, ILD_NORMAL};
use windows::Win32::UI::Shell::{
    IShellLinkW, SHGetFileInfoW, SHGetImageList, ShellLink as ShellLinkClass, SHFILEINFOW,
    SHGFI_FLAGS, SHGFI_ICON, SHGFI_LARGEICON, SHGFI_SMALLICON, SHGFI_SYSICONINDEX, SLGP_RAWPATH,
    SLGP_SHORTPATH, SLGP_UNCPRIORITY,
};
use windows::Win32::UI::WindowsAndMessaging::{DestroyIcon, HICON};

/// GDI+ PNG encoder, `image/png`
const CLSID_ENCODER_PNG: GUID = GUID::from_u128(0x557cf406_1a04_11d3_9a73_0000f81ef32e);

/// Real shell, COM and GDI+ services
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Platform;

/// Icon handle wrapper for safe cleanup
pub struct IconHandle {
    handle: HICON,
}

impl IconHandle {
    fn new(handle: HICON) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> HICON {
        self.handle
    }
}

impl Drop for IconHandle {
    fn drop(&mut self) {
        if !self.handle.is_invalid() {
            log::trace!("DestroyIcon({:?})", self.handle);
            unsafe {
                let _ = DestroyIcon(self.handle);
            }
        }
    }
}

/// System image list; the COM reference is released when dropped
pub struct SystemImageList {
    list: IImageList,
}

/// COM apartment held for the lifetime of the guard
pub struct ComApartment {
    // CoUninitialize must run on the initializing thread
    _thread_bound: PhantomData<*const ()>,
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        log::trace!("CoUninitialize");
        unsafe { CoUninitialize() };
    }
}

/// `IShellLinkW` with its `IPersistFile` view
pub struct ShellLinkFile {
    link: IShellLinkW,
    file: IPersistFile,
}

/// Running GDI+ instance
pub struct GdiplusSession {
    token: usize,
}

impl Drop for GdiplusSession {
    fn drop(&mut self) {
        log::trace!("GdiplusShutdown");
        unsafe { GdiplusShutdown(self.token) };
    }
}

/// GDI+ bitmap created from an icon
pub struct GdiplusBitmap {
    bitmap: *mut GpBitmap,
}

impl Drop for GdiplusBitmap {
    fn drop(&mut self) {
        log::trace!("GdipDisposeImage");
        unsafe {
            let _ = GdipDisposeImage(self.bitmap as *mut GpImage);
        }
    }
}

/// Clears the thread's last error ahead of a call that may not set it
fn clear_last_error() {
    unsafe { SetLastError(ERROR_SUCCESS) };
}

/// The thread's last error, if one is set
fn os_error(call: &'static str) -> Option<ApiError> {
    let err = windows::core::Error::from_win32();
    if err.code().is_ok() {
        None
    } else {
        Some(ApiError::from_windows(call, err))
    }
}

/// Reads the thread's last error right after a failed call
///
/// Some calls fail without setting one; those become a bare status.
fn last_error(call: &'static str, status: i32) -> ApiError {
    os_error(call).unwrap_or_else(|| ApiError::status(call, status))
}

fn gdiplus_failure(call: &'static str, status: Status) -> ApiError {
    ApiError::gdiplus(call, status.0, || os_error(call))
}

fn shell_file_info(path: &Path, flags: SHGFI_FLAGS) -> ApiResult<SHFILEINFOW> {
    let path_wide = to_wide_string(path);
    let mut file_info = SHFILEINFOW::default();

    clear_last_error();
    let result = unsafe {
        SHGetFileInfoW(
            PCWSTR(path_wide.as_ptr()),
            FILE_FLAGS_AND_ATTRIBUTES(0),
            Some(&mut file_info),
            std::mem::size_of::<SHFILEINFOW>() as u32,
            flags,
        )
    };

    if result == 0 {
        return Err(last_error("SHGetFileInfoW", 0));
    }
    Ok(file_info)
}

impl Platform for Win32Platform {
    type Icon = IconHandle;
    type ImageList = SystemImageList;
    type Apartment = ComApartment;
    type Link = ShellLinkFile;
    type Graphics = GdiplusSession;

    fn system_icon_index(&self, path: &Path) -> ApiResult<i32> {
        let info = shell_file_info(path, SHGFI_SYSICONINDEX)?;
        Ok(info.iIcon)
    }

    fn image_list(&self, group: SizeGroup) -> ApiResult<SystemImageList> {
        let list: IImageList = unsafe { SHGetImageList(group.shell_id()) }
            .map_err(|e| ApiError::from_windows("SHGetImageList", e))?;
        Ok(SystemImageList { list })
    }

    fn file_icon(&self, path: &Path, large: bool) -> ApiResult<IconHandle> {
        let bucket = if large { SHGFI_LARGEICON } else { SHGFI_SMALLICON };
        let info = shell_file_info(path, SHGFI_ICON | bucket)?;

        if info.hIcon.is_invalid() {
            return Err(ApiError::status("SHGetFileInfoW", 0));
        }
        Ok(IconHandle::new(info.hIcon))
    }

    fn initialize_com(&self) -> ApiResult<ComApartment> {
        // S_FALSE (already initialized) is a success and still needs a
        // matching CoUninitialize
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
            .ok()
            .map_err(|e| ApiError::from_windows("CoInitializeEx", e))?;

        Ok(ComApartment {
            _thread_bound: PhantomData,
        })
    }

    fn create_shell_link(&self, _apartment: &ComApartment) -> ApiResult<ShellLinkFile> {
        let link: IShellLinkW =
            unsafe { CoCreateInstance(&ShellLinkClass, None, CLSCTX_INPROC_SERVER) }
                .map_err(|e| ApiError::from_windows("CoCreateInstance", e))?;
        let file: IPersistFile = link
            .cast()
            .map_err(|e| ApiError::from_windows("QueryInterface(IPersistFile)", e))?;

        Ok(ShellLinkFile { link, file })
    }

    fn start_graphics(&self) -> ApiResult<GdiplusSession> {
        let input = GdiplusStartupInput {
            GdiplusVersion: 1,
            ..Default::default()
        };
        let mut token = 0usize;

        clear_last_error();
        let status = unsafe { GdiplusStartup(&mut token, &input, std::ptr::null_mut()) };
        if status.0 != 0 {
            return Err(gdiplus_failure("GdiplusStartup", status));
        }
        Ok(GdiplusSession { token })
    }
}

impl ImageList for SystemImageList {
    type Icon = IconHandle;

    fn icon(&self, index: i32) -> ApiResult<IconHandle> {
        let handle = unsafe { self.list.GetIcon(index, ILD_NORMAL.0) }
            .map_err(|e| ApiError::from_windows("IImageList::GetIcon", e))?;

        if handle.is_invalid() {
            return Err(ApiError::status("IImageList::GetIcon", 0));
        }
        Ok(IconHandle::new(handle))
    }
}

impl ShellLink for ShellLinkFile {
    fn load(&self, path: &Path) -> ApiResult<()> {
        let path_wide = to_wide_string(path);
        unsafe { self.file.Load(PCWSTR(path_wide.as_ptr()), STGM_READ) }
            .map_err(|e| ApiError::from_windows("IPersistFile::Load", e))
    }

    fn target_path(&self, mode: LinkPathMode) -> ApiResult<String> {
        let flags = match mode {
            LinkPathMode::RawUncPriority => SLGP_RAWPATH.0 | SLGP_UNCPRIORITY.0,
            LinkPathMode::ShortPath => SLGP_SHORTPATH.0,
        };
        let mut buffer = [0u16; MAX_PATH as usize];
        let mut find_data = WIN32_FIND_DATAW::default();

        // S_FALSE (no path) comes back as Ok with an empty buffer
        unsafe { self.link.GetPath(&mut buffer, &mut find_data, flags as u32) }
            .map_err(|e| ApiError::from_windows("IShellLinkW::GetPath", e))?;

        Ok(from_wide_string(&buffer))
    }
}

impl GraphicsSession for GdiplusSession {
    type Icon = IconHandle;
    type Bitmap = GdiplusBitmap;

    fn bitmap_from_icon(&self, icon: &IconHandle) -> ApiResult<GdiplusBitmap> {
        let mut bitmap: *mut GpBitmap = std::ptr::null_mut();

        clear_last_error();
        let status = unsafe { GdipCreateBitmapFromHICON(icon.handle(), &mut bitmap) };
        if status.0 != 0 || bitmap.is_null() {
            let err = gdiplus_failure("GdipCreateBitmapFromHICON", status);
            if !bitmap.is_null() {
                drop(GdiplusBitmap { bitmap });
            }
            return Err(err);
        }
        Ok(GdiplusBitmap { bitmap })
    }
}

impl Bitmap for GdiplusBitmap {
    fn save_png(&self, path: &Path) -> ApiResult<()> {
        let path_wide = to_wide_string(path);

        clear_last_error();
        let status = unsafe {
            GdipSaveImageToFile(
                self.bitmap as *mut GpImage,
                PCWSTR(path_wide.as_ptr()),
                &CLSID_ENCODER_PNG,
                std::ptr::null(),
            )
        };
        if status.0 != 0 {
            return Err(gdiplus_failure("GdipSaveImageToFile", status));
        }
        Ok(())
    }
}
