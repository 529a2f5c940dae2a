//! An in-memory [`super::PlatformBackend`] test double. No concrete X11/
//! Win32 backend ships with this crate (`spec.md` §1, explicitly out of
//! scope); `MockBackend` stands in for it in tests and lets the control
//! loop be exercised deterministically.

use std::collections::HashMap;

use gridflux_config::Config;

use crate::error::{CoreError, CoreResult};
use crate::filter::{WindowState, WindowType};
use crate::geometry::Rect;
use crate::window::WindowId;

use super::{DisplayHandle, GeometryFlags, GestureEvent, KeyAction, PlatformBackend, ScannedWindow};

#[derive(Debug, Clone)]
pub struct MockWindow {
    pub geometry: Rect,
    pub class: String,
    pub name: String,
    pub kind: WindowType,
    pub state: WindowState,
    pub is_valid: bool,
    pub is_maximized: bool,
    pub is_minimized: bool,
    pub is_fullscreen: bool,
    pub is_hidden: bool,
    /// Which virtual workspace the mock "host" currently files this window
    /// under, as an EWMH-style 0-based desktop number — the same
    /// convention [`super::PlatformBackend::enumerate_windows`] expects
    /// (`WorkspaceId(1)` is desktop `0`, `WorkspaceId(2)` is desktop `1`,
    /// ...).
    pub host_workspace: i32,
}

impl MockWindow {
    pub fn new(class: &str) -> Self {
        MockWindow {
            geometry: Rect::new(0, 0, 800, 600),
            class: class.to_string(),
            name: class.to_string(),
            kind: WindowType::Normal,
            state: WindowState::default(),
            is_valid: true,
            is_maximized: false,
            is_minimized: false,
            is_fullscreen: false,
            is_hidden: false,
            host_workspace: 0,
        }
    }
}

/// Records every `set_geometry`/`minimize`/`unminimize`/`border_*` call so
/// tests can assert on what the core commanded, without a real display
/// connection.
#[derive(Debug, Default)]
pub struct MockBackend {
    pub windows: HashMap<WindowId, MockWindow>,
    pub screen_bounds: Rect,
    pub focused: Option<WindowId>,
    pub dock_hidden: bool,
    pub borders: HashMap<WindowId, u32>,
    pub key_queue: Vec<KeyAction>,
    pub gesture_queue: Vec<GestureEvent>,
    pub workspace_count: u32,
    pub current_workspace: i32,
    pub geometry_calls: Vec<(WindowId, Rect, GeometryFlags)>,
}

impl MockBackend {
    pub fn new() -> Self {
        MockBackend {
            screen_bounds: Rect::new(0, 0, 1920, 1080),
            workspace_count: 1,
            current_workspace: 1,
            ..Default::default()
        }
    }

    pub fn insert(&mut self, id: WindowId, window: MockWindow) {
        self.windows.insert(id, window);
    }
}

impl PlatformBackend for MockBackend {
    fn init(&mut self) -> CoreResult<DisplayHandle> {
        Ok(DisplayHandle(0))
    }

    fn cleanup(&mut self, _display: DisplayHandle) {}

    fn enumerate_windows(
        &mut self,
        _display: DisplayHandle,
        workspace_id: i32,
    ) -> CoreResult<Vec<ScannedWindow>> {
        Ok(self
            .windows
            .iter()
            .filter(|(_, w)| w.host_workspace == workspace_id)
            .map(|(&id, w)| ScannedWindow {
                id,
                geometry: w.geometry,
                class: w.class.clone(),
                name: w.name.clone(),
                kind: w.kind,
                state: w.state,
                is_valid: w.is_valid,
                is_maximized: w.is_maximized,
                is_minimized: w.is_minimized,
                is_fullscreen: w.is_fullscreen,
            })
            .collect())
    }

    fn set_geometry(
        &mut self,
        _display: DisplayHandle,
        window: WindowId,
        rect: Rect,
        flags: GeometryFlags,
        _config: &Config,
    ) -> CoreResult<()> {
        let mock = self
            .windows
            .get_mut(&window)
            .ok_or(CoreError::WindowNotFound)?;
        if flags.contains(GeometryFlags::CHANGE_X) {
            mock.geometry.x = rect.x;
        }
        if flags.contains(GeometryFlags::CHANGE_Y) {
            mock.geometry.y = rect.y;
        }
        if flags.contains(GeometryFlags::CHANGE_W) {
            mock.geometry.w = rect.w;
        }
        if flags.contains(GeometryFlags::CHANGE_H) {
            mock.geometry.h = rect.h;
        }
        self.geometry_calls.push((window, rect, flags));
        Ok(())
    }

    fn unmaximize(&mut self, _display: DisplayHandle, window: WindowId) -> CoreResult<()> {
        let mock = self
            .windows
            .get_mut(&window)
            .ok_or(CoreError::WindowNotFound)?;
        mock.is_maximized = false;
        Ok(())
    }

    fn minimize(&mut self, _display: DisplayHandle, window: WindowId) -> CoreResult<()> {
        let mock = self
            .windows
            .get_mut(&window)
            .ok_or(CoreError::WindowNotFound)?;
        mock.is_minimized = true;
        Ok(())
    }

    fn unminimize(&mut self, _display: DisplayHandle, window: WindowId) -> CoreResult<()> {
        let mock = self
            .windows
            .get_mut(&window)
            .ok_or(CoreError::WindowNotFound)?;
        mock.is_minimized = false;
        Ok(())
    }

    fn get_geometry(&mut self, _display: DisplayHandle, window: WindowId) -> CoreResult<Rect> {
        self.windows
            .get(&window)
            .map(|w| w.geometry)
            .ok_or(CoreError::WindowNotFound)
    }

    fn get_current_workspace(&mut self, _display: DisplayHandle) -> CoreResult<i32> {
        Ok(self.current_workspace)
    }

    fn get_workspace_count(&mut self, _display: DisplayHandle) -> CoreResult<u32> {
        Ok(self.workspace_count)
    }

    fn create_workspace(&mut self, _display: DisplayHandle) -> CoreResult<()> {
        self.workspace_count += 1;
        Ok(())
    }

    fn remove_workspace(&mut self, _display: DisplayHandle, _id: i32) -> CoreResult<()> {
        self.workspace_count = self.workspace_count.saturating_sub(1);
        Ok(())
    }

    fn get_screen_bounds(&mut self, _display: DisplayHandle) -> CoreResult<Rect> {
        Ok(self.screen_bounds)
    }

    fn is_valid(&mut self, window: WindowId) -> bool {
        self.windows.get(&window).map(|w| w.is_valid).unwrap_or(false)
    }

    fn is_excluded(&mut self, window: WindowId) -> bool {
        match self.windows.get(&window) {
            Some(w) => crate::filter::is_excluded(&w.class, w.kind, w.state, w.is_fullscreen),
            None => true,
        }
    }

    fn is_hidden(&mut self, window: WindowId) -> bool {
        self.windows.get(&window).map(|w| w.is_hidden).unwrap_or(true)
    }

    fn is_minimized(&mut self, window: WindowId) -> bool {
        self.windows.get(&window).map(|w| w.is_minimized).unwrap_or(false)
    }

    fn is_maximized(&mut self, window: WindowId) -> bool {
        self.windows.get(&window).map(|w| w.is_maximized).unwrap_or(false)
    }

    fn is_fullscreen(&mut self, window: WindowId) -> bool {
        self.windows.get(&window).map(|w| w.is_fullscreen).unwrap_or(false)
    }

    fn get_focused(&mut self, _display: DisplayHandle) -> Option<WindowId> {
        self.focused
    }

    fn get_window_name(&mut self, _display: DisplayHandle, window: WindowId) -> String {
        self.windows.get(&window).map(|w| w.name.clone()).unwrap_or_default()
    }

    fn get_window_class(&mut self, _display: DisplayHandle, window: WindowId) -> String {
        self.windows.get(&window).map(|w| w.class.clone()).unwrap_or_default()
    }

    fn dock_hide(&mut self) {
        self.dock_hidden = true;
    }

    fn dock_restore(&mut self) {
        self.dock_hidden = false;
    }

    fn border_add(&mut self, window: WindowId, color_rgb: u32, _thickness: u32) -> CoreResult<()> {
        self.borders.insert(window, color_rgb);
        Ok(())
    }

    fn border_remove(&mut self, window: WindowId) -> CoreResult<()> {
        self.borders.remove(&window);
        Ok(())
    }

    fn border_update(&mut self, _config: &Config) -> CoreResult<()> {
        Ok(())
    }

    fn border_cleanup(&mut self) {
        self.borders.clear();
    }

    fn keymap_init(&mut self) -> CoreResult<()> {
        Ok(())
    }

    fn keymap_cleanup(&mut self) {
        self.key_queue.clear();
    }

    fn keymap_poll(&mut self) -> Option<KeyAction> {
        if self.key_queue.is_empty() {
            None
        } else {
            Some(self.key_queue.remove(0))
        }
    }

    fn gesture_init(&mut self) -> CoreResult<()> {
        Ok(())
    }

    fn gesture_cleanup(&mut self) {
        self.gesture_queue.clear();
    }

    fn gesture_poll(&mut self) -> Option<GestureEvent> {
        if self.gesture_queue.is_empty() {
            None
        } else {
            Some(self.gesture_queue.remove(0))
        }
    }
}
