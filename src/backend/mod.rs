//! The platform-abstraction surface (`spec.md` §6.1). No concrete
//! platform backend lives in this crate; the core only depends on this
//! trait — no concrete X11/Win32 implementation lives here.
//! [`mock::MockBackend`] is the only implementation, used for tests.

pub mod mock;

use gridflux_config::Config;

use crate::error::CoreResult;
use crate::filter::{WindowState, WindowType};
use crate::geometry::Rect;
use crate::window::WindowId;

pub use mock::MockBackend;

/// Opaque display connection handle. The core never inspects its
/// contents; only the backend that produced it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    WorkspacePrev,
    WorkspaceNext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    SwipeBegin,
    SwipeUpdate,
    SwipeEnd,
    SwipeCancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    pub fingers: u32,
    pub dx: f32,
    pub dy: f32,
    pub total_dx: f32,
    pub total_dy: f32,
}

bitflags::bitflags! {
    /// Which fields of a `set_geometry` call should actually be applied,
    /// per `spec.md` §6.1.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GeometryFlags: u8 {
        const CHANGE_X = 0b0_0001;
        const CHANGE_Y = 0b0_0010;
        const CHANGE_W = 0b0_0100;
        const CHANGE_H = 0b0_1000;
        const APPLY_PADDING = 0b1_0000;
        const ALL = Self::CHANGE_X.bits() | Self::CHANGE_Y.bits() | Self::CHANGE_W.bits()
            | Self::CHANGE_H.bits() | Self::APPLY_PADDING.bits();
    }
}

/// A window reported fresh by [`PlatformBackend::enumerate_windows`],
/// before the core has folded it into its own [`crate::window::WindowInfo`]
/// record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedWindow {
    pub id: WindowId,
    pub geometry: Rect,
    pub class: String,
    pub name: String,
    pub kind: WindowType,
    pub state: WindowState,
    pub is_valid: bool,
    pub is_maximized: bool,
    pub is_minimized: bool,
    pub is_fullscreen: bool,
}

/// The capability set the core consumes; all operations are fallible
/// unless noted in the doc comment. Implemented by a concrete X11/Win32
/// backend in a full deployment; the core never matches on which backend
/// it has.
pub trait PlatformBackend {
    fn init(&mut self) -> CoreResult<DisplayHandle>;
    fn cleanup(&mut self, display: DisplayHandle);

    /// Lists the native windows the backend currently files under
    /// `workspace_id`. `workspace_id` is 0-based (an EWMH-style desktop
    /// number): the caller passes `WorkspaceId.0 - GF_FIRST_WORKSPACE_ID`
    /// (i.e. `WorkspaceId.0 - 1`), never the raw 1-based `WorkspaceId`.
    fn enumerate_windows(
        &mut self,
        display: DisplayHandle,
        workspace_id: i32,
    ) -> CoreResult<Vec<ScannedWindow>>;

    fn set_geometry(
        &mut self,
        display: DisplayHandle,
        window: WindowId,
        rect: Rect,
        flags: GeometryFlags,
        config: &Config,
    ) -> CoreResult<()>;

    fn unmaximize(&mut self, display: DisplayHandle, window: WindowId) -> CoreResult<()>;
    fn minimize(&mut self, display: DisplayHandle, window: WindowId) -> CoreResult<()>;
    fn unminimize(&mut self, display: DisplayHandle, window: WindowId) -> CoreResult<()>;

    fn get_geometry(&mut self, display: DisplayHandle, window: WindowId) -> CoreResult<Rect>;

    fn get_current_workspace(&mut self, display: DisplayHandle) -> CoreResult<i32>;
    fn get_workspace_count(&mut self, display: DisplayHandle) -> CoreResult<u32>;
    fn create_workspace(&mut self, display: DisplayHandle) -> CoreResult<()>;
    fn remove_workspace(&mut self, display: DisplayHandle, id: i32) -> CoreResult<()>;

    /// The usable work-area rectangle, excluding reserved strut regions.
    fn get_screen_bounds(&mut self, display: DisplayHandle) -> CoreResult<Rect>;

    fn is_valid(&mut self, window: WindowId) -> bool;
    fn is_excluded(&mut self, window: WindowId) -> bool;
    fn is_hidden(&mut self, window: WindowId) -> bool;
    fn is_minimized(&mut self, window: WindowId) -> bool;
    fn is_maximized(&mut self, window: WindowId) -> bool;
    fn is_fullscreen(&mut self, window: WindowId) -> bool;

    fn get_focused(&mut self, display: DisplayHandle) -> Option<WindowId>;
    fn get_window_name(&mut self, display: DisplayHandle, window: WindowId) -> String;
    fn get_window_class(&mut self, display: DisplayHandle, window: WindowId) -> String;

    fn dock_hide(&mut self);
    fn dock_restore(&mut self);

    fn border_add(&mut self, window: WindowId, color_rgb: u32, thickness: u32) -> CoreResult<()>;
    fn border_remove(&mut self, window: WindowId) -> CoreResult<()>;
    fn border_update(&mut self, config: &Config) -> CoreResult<()>;
    fn border_cleanup(&mut self);

    fn keymap_init(&mut self) -> CoreResult<()>;
    fn keymap_cleanup(&mut self);
    fn keymap_poll(&mut self) -> Option<KeyAction>;

    fn gesture_init(&mut self) -> CoreResult<()>;
    fn gesture_cleanup(&mut self);
    fn gesture_poll(&mut self) -> Option<GestureEvent>;
}
