//! Window-exclusion filter (`spec.md` §4.F). Consulted both at discovery
//! and at every operation that would command a window.

/// EWMH-equivalent window type, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    Normal,
    Dock,
    Desktop,
    Toolbar,
    Menu,
    Splash,
    DropdownMenu,
    PopupMenu,
    Tooltip,
    Notification,
    Utility,
    Combo,
}

/// The subset of a window's EWMH-equivalent state the filter cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowState {
    pub skip_taskbar: bool,
    pub modal: bool,
    pub above: bool,
}

const SCREENSHOT_TOOL_CLASSES: &[&str] = &["flameshot", "gnome-screenshot", "spectacle", "shutter", "plasma"];

/// The window class the core's own GUI front-end process is known to
/// report; windows of this class are never tiled.
pub const GRIDFLUX_GUI_CLASS_MARKER: &str = "gridflux-gui";

/// Returns `true` if `class`/`kind`/`state` mark a window the core should
/// never track or command.
///
/// `is_fullscreen` additionally excludes `type=normal` fullscreen windows
/// on the "don't tile over a fullscreen app" path (`spec.md` §4.F, §4.E.2).
pub fn is_excluded(class: &str, kind: WindowType, state: WindowState, is_fullscreen: bool) -> bool {
    let class_lower = class.to_lowercase();

    if class_lower.contains(GRIDFLUX_GUI_CLASS_MARKER) {
        return true;
    }
    if SCREENSHOT_TOOL_CLASSES.iter().any(|&c| class_lower == c) {
        return true;
    }
    if state.skip_taskbar || state.modal || state.above {
        return true;
    }
    if !matches!(kind, WindowType::Normal) {
        return true;
    }
    if kind == WindowType::Normal && is_fullscreen {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_gridflux_gui_by_class() {
        assert!(is_excluded(
            "org.gridflux-gui.Main",
            WindowType::Normal,
            WindowState::default(),
            false
        ));
    }

    #[test]
    fn excludes_known_screenshot_tools_case_insensitively() {
        assert!(is_excluded(
            "Flameshot",
            WindowType::Normal,
            WindowState::default(),
            false
        ));
    }

    #[test]
    fn excludes_by_state_flags() {
        let mut state = WindowState::default();
        state.skip_taskbar = true;
        assert!(is_excluded("firefox", WindowType::Normal, state, false));
    }

    #[test]
    fn excludes_non_normal_types() {
        assert!(is_excluded(
            "panel",
            WindowType::Dock,
            WindowState::default(),
            false
        ));
    }

    #[test]
    fn excludes_normal_fullscreen_windows() {
        assert!(is_excluded(
            "mpv",
            WindowType::Normal,
            WindowState::default(),
            true
        ));
    }

    #[test]
    fn tracks_ordinary_normal_windows() {
        assert!(!is_excluded(
            "firefox",
            WindowType::Normal,
            WindowState::default(),
            false
        ));
    }
}
