//! Default config values, matching `DEFAULT_CONFIG` (`src/config/config.c`)
//! and the `GF_*` constants (`src/core/types.h`).

pub const DEFAULT_MAX_WINDOWS_PER_WORKSPACE: u32 = 10;
pub const DEFAULT_MAX_WORKSPACES: u32 = 32;
pub const DEFAULT_PADDING: u32 = 10;
pub const DEFAULT_MIN_WINDOW_SIZE: u32 = 10;
pub const DEFAULT_BORDER_COLOR: u32 = 0x00F4_9D2A;
pub const DEFAULT_ENABLE_BORDERS: bool = true;

pub(crate) fn max_windows_per_workspace() -> u32 {
    DEFAULT_MAX_WINDOWS_PER_WORKSPACE
}

pub(crate) fn max_workspaces() -> u32 {
    DEFAULT_MAX_WORKSPACES
}

pub(crate) fn default_padding() -> u32 {
    DEFAULT_PADDING
}

pub(crate) fn min_window_size() -> u32 {
    DEFAULT_MIN_WINDOW_SIZE
}

pub(crate) fn border_color() -> u32 {
    DEFAULT_BORDER_COLOR
}

pub(crate) fn enable_borders() -> bool {
    DEFAULT_ENABLE_BORDERS
}
