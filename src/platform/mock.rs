//! Recording test double for the platform boundary
//!
//! Every acquire and release is appended to a shared event log, so tests can
//! count releases and check the order they happened in.

use super::{Bitmap, GraphicsSession, ImageList, LinkPathMode, Platform, ShellLink};
use crate::error::{ApiError, ApiResult};
use crate::size::SizeGroup;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    IndexQueried(PathBuf),
    ImageListAcquired(SizeGroup),
    ImageListReleased(SizeGroup),
    IconExtracted(i32),
    LegacyQueried { large: bool },
    IconDestroyed(IconSource),
    ComInitialized,
    ComUninitialized,
    LinkCreated,
    LinkLoaded(PathBuf),
    LinkPathQueried(LinkPathMode),
    LinkReleased,
    GraphicsStarted,
    GraphicsShutdown,
    BitmapCreated,
    BitmapSaved(PathBuf),
    BitmapDisposed,
}

/// Which lookup produced an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource {
    ImageList(SizeGroup),
    Legacy { large: bool },
}

type EventLog = Rc<RefCell<Vec<Event>>>;

fn fail(call: &'static str) -> ApiError {
    ApiError::os(call, 0x8000_4005, "Unspecified error")
}

/// Scriptable platform; every field defaults to the success path
#[derive(Debug)]
pub struct MockPlatform {
    pub icon_index: Option<i32>,
    pub image_list_fails: bool,
    pub extraction_fails: bool,
    pub legacy_fails: bool,

    pub com_init_fails: bool,
    pub link_create_fails: bool,
    pub link_load_fails: bool,
    pub raw_target: Option<String>,
    pub short_target: Option<String>,

    pub graphics_fails: bool,
    pub bitmap_fails: bool,
    pub save_status: Option<i32>,

    pub(crate) events: EventLog,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            icon_index: Some(7),
            image_list_fails: false,
            extraction_fails: false,
            legacy_fails: false,
            com_init_fails: false,
            link_create_fails: false,
            link_load_fails: false,
            raw_target: Some(r"C:\Target\App.exe".to_string()),
            short_target: Some(r"C:\Target\App.exe".to_string()),
            graphics_fails: false,
            bitmap_fails: false,
            save_status: None,
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(*e)).count()
    }

    /// Position of the first event matching `pred`
    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events.borrow().iter().position(|e| pred(e))
    }

    pub fn image_lists_acquired(&self) -> usize {
        self.count(|e| matches!(e, Event::ImageListAcquired(_)))
    }

    pub fn image_lists_released(&self) -> usize {
        self.count(|e| matches!(e, Event::ImageListReleased(_)))
    }

    pub fn icons_destroyed(&self) -> usize {
        self.count(|e| matches!(e, Event::IconDestroyed(_)))
    }

    pub fn com_inits(&self) -> usize {
        self.count(|e| *e == Event::ComInitialized)
    }

    pub fn com_uninits(&self) -> usize {
        self.count(|e| *e == Event::ComUninitialized)
    }
}

pub struct MockIcon {
    pub source: IconSource,
    events: EventLog,
}

impl Drop for MockIcon {
    fn drop(&mut self) {
        self.events
            .borrow_mut()
            .push(Event::IconDestroyed(self.source));
    }
}

pub struct MockImageList {
    group: SizeGroup,
    extraction_fails: bool,
    events: EventLog,
}

impl Drop for MockImageList {
    fn drop(&mut self) {
        self.events
            .borrow_mut()
            .push(Event::ImageListReleased(self.group));
    }
}

pub struct MockApartment {
    events: EventLog,
}

impl Drop for MockApartment {
    fn drop(&mut self) {
        self.events.borrow_mut().push(Event::ComUninitialized);
    }
}

pub struct MockLink {
    load_fails: bool,
    raw_target: Option<String>,
    short_target: Option<String>,
    events: EventLog,
}

impl Drop for MockLink {
    fn drop(&mut self) {
        self.events.borrow_mut().push(Event::LinkReleased);
    }
}

pub struct MockGraphics {
    bitmap_fails: bool,
    save_status: Option<i32>,
    events: EventLog,
}

impl Drop for MockGraphics {
    fn drop(&mut self) {
        self.events.borrow_mut().push(Event::GraphicsShutdown);
    }
}

pub struct MockBitmap {
    save_status: Option<i32>,
    events: EventLog,
}

impl Drop for MockBitmap {
    fn drop(&mut self) {
        self.events.borrow_mut().push(Event::BitmapDisposed);
    }
}

impl Platform for MockPlatform {
    type Icon = MockIcon;
    type ImageList = MockImageList;
    type Apartment = MockApartment;
    type Link = MockLink;
    type Graphics = MockGraphics;

    fn system_icon_index(&self, path: &Path) -> ApiResult<i32> {
        self.record(Event::IndexQueried(path.to_path_buf()));
        self.icon_index.ok_or_else(|| fail("SHGetFileInfoW"))
    }

    fn image_list(&self, group: SizeGroup) -> ApiResult<MockImageList> {
        if self.image_list_fails {
            return Err(fail("SHGetImageList"));
        }
        self.record(Event::ImageListAcquired(group));
        Ok(MockImageList {
            group,
            extraction_fails: self.extraction_fails,
            events: Rc::clone(&self.events),
        })
    }

    fn file_icon(&self, _path: &Path, large: bool) -> ApiResult<MockIcon> {
        self.record(Event::LegacyQueried { large });
        if self.legacy_fails {
            return Err(fail("SHGetFileInfoW"));
        }
        Ok(MockIcon {
            source: IconSource::Legacy { large },
            events: Rc::clone(&self.events),
        })
    }

    fn initialize_com(&self) -> ApiResult<MockApartment> {
        if self.com_init_fails {
            return Err(fail("CoInitializeEx"));
        }
        self.record(Event::ComInitialized);
        Ok(MockApartment {
            events: Rc::clone(&self.events),
        })
    }

    fn create_shell_link(&self, _apartment: &MockApartment) -> ApiResult<MockLink> {
        if self.link_create_fails {
            return Err(fail("CoCreateInstance"));
        }
        self.record(Event::LinkCreated);
        Ok(MockLink {
            load_fails: self.link_load_fails,
            raw_target: self.raw_target.clone(),
            short_target: self.short_target.clone(),
            events: Rc::clone(&self.events),
        })
    }

    fn start_graphics(&self) -> ApiResult<MockGraphics> {
        if self.graphics_fails {
            return Err(ApiError::status("GdiplusStartup", 3));
        }
        self.record(Event::GraphicsStarted);
        Ok(MockGraphics {
            bitmap_fails: self.bitmap_fails,
            save_status: self.save_status,
            events: Rc::clone(&self.events),
        })
    }
}

impl ImageList for MockImageList {
    type Icon = MockIcon;

    fn icon(&self, index: i32) -> ApiResult<MockIcon> {
        if self.extraction_fails {
            return Err(ApiError::status("IImageList::GetIcon", 0));
        }
        self.events.borrow_mut().push(Event::IconExtracted(index));
        Ok(MockIcon {
            source: IconSource::ImageList(self.group),
            events: Rc::clone(&self.events),
        })
    }
}

impl ShellLink for MockLink {
    fn load(&self, path: &Path) -> ApiResult<()> {
        if self.load_fails {
            return Err(fail("IPersistFile::Load"));
        }
        self.events
            .borrow_mut()
            .push(Event::LinkLoaded(path.to_path_buf()));
        Ok(())
    }

    fn target_path(&self, mode: LinkPathMode) -> ApiResult<String> {
        self.events.borrow_mut().push(Event::LinkPathQueried(mode));
        let target = match mode {
            LinkPathMode::RawUncPriority => &self.raw_target,
            LinkPathMode::ShortPath => &self.short_target,
        };
        target.clone().ok_or_else(|| fail("IShellLinkW::GetPath"))
    }
}

impl GraphicsSession for MockGraphics {
    type Icon = MockIcon;
    type Bitmap = MockBitmap;

    fn bitmap_from_icon(&self, _icon: &MockIcon) -> ApiResult<MockBitmap> {
        if self.bitmap_fails {
            return Err(ApiError::status("GdipCreateBitmapFromHICON", 2));
        }
        self.events.borrow_mut().push(Event::BitmapCreated);
        Ok(MockBitmap {
            save_status: self.save_status,
            events: Rc::clone(&self.events),
        })
    }
}

impl Bitmap for MockBitmap {
    fn save_png(&self, path: &Path) -> ApiResult<()> {
        if let Some(status) = self.save_status {
            return Err(ApiError::status("GdipSaveImageToFile", status));
        }
        self.events
            .borrow_mut()
            .push(Event::BitmapSaved(path.to_path_buf()));
        Ok(())
    }
}
