//! Core entity types (`spec.md` §3).

use std::fmt;
use std::time::SystemTime;

use gridflux_config::Config;

use crate::geometry::Rect;

/// Opaque handle assigned by the backend, stable for the window's
/// lifetime. In practice the native window handle (an X11 `Window` or a
/// Win32 `HWND` cast to `u64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// 1-indexed workspace identifier. `0` and negatives are sentinel values
/// meaning "none" and never denote a real workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkspaceId(pub i32);

impl WorkspaceId {
    pub const NONE: WorkspaceId = WorkspaceId(0);

    pub fn is_none(self) -> bool {
        self.0 <= 0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    pub workspace: WorkspaceId,
    pub geometry: Rect,
    /// Host-reported title; lazily populated, may be empty until the
    /// backend supplies it.
    pub name: String,
    pub class: String,
    pub is_maximized: bool,
    pub is_minimized: bool,
    pub is_valid: bool,
    pub needs_update: bool,
    /// Whether this window caused its workspace to auto-hide the dock;
    /// only meaningful while `is_maximized`.
    pub dock_hidden: bool,
    pub last_modified: SystemTime,
}

impl WindowInfo {
    pub fn new(id: WindowId, workspace: WorkspaceId, geometry: Rect, class: String) -> Self {
        WindowInfo {
            id,
            workspace,
            geometry,
            name: String::new(),
            class,
            is_maximized: false,
            is_minimized: false,
            is_valid: true,
            needs_update: true,
            dock_hidden: false,
            last_modified: SystemTime::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_modified = SystemTime::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceInfo {
    pub id: WorkspaceId,
    pub window_count: u32,
    pub max_windows: u32,
    pub available_space: i32,
    pub is_locked: bool,
    pub has_maximized_state: bool,
}

impl WorkspaceInfo {
    pub fn new(id: WorkspaceId, max_windows: u32) -> Self {
        WorkspaceInfo {
            id,
            window_count: 0,
            max_windows,
            available_space: max_windows as i32,
            is_locked: false,
            has_maximized_state: false,
        }
    }

    /// Recomputes `available_space` from `window_count`/`max_windows`/
    /// `is_locked`, per `spec.md` invariant 3.
    pub fn recompute_available_space(&mut self) {
        self.available_space = if self.is_locked {
            0
        } else {
            (self.max_windows as i32 - self.window_count as i32).max(0)
        };
    }
}

/// Looks up the workspace a newly-discovered window's class should be
/// routed to, per the rules table (`spec.md` §4.H).
pub fn rule_workspace_for_class(config: &Config, class: &str) -> Option<WorkspaceId> {
    config.rules.lookup(class).map(WorkspaceId)
}
