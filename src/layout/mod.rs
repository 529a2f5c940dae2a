//! Pluggable layout engines (`spec.md` §4.C): pure functions from a window
//! sequence and workspace bounds to per-window rectangles. Grounded on the
//! original implementation's `gf_layout_engine_t` strategies
//! (`layout.c`).

mod bsp;
mod grid;

pub use bsp::Bsp;
pub use grid::Grid;

use crate::geometry::Rect;
use crate::window::WindowInfo;

/// A tiling strategy. Stateless aside from the padding/minimum-size it was
/// constructed with; must write exactly `count` rectangles into `out` and
/// must not allocate beyond scratch its own strategy needs.
pub trait LayoutEngine {
    fn apply_layout(&self, windows: &[WindowInfo], count: u32, bounds: Rect, out: &mut [Rect]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Bsp,
    Grid { columns: u32 },
}

/// Builds the configured strategy. `columns=0` is treated as `columns=2`,
/// matching `gf_layout_engine_create_grid`'s `columns ? columns : 2`.
pub fn build(strategy: Strategy, padding: u32, min_window_size: u32) -> Box<dyn LayoutEngine> {
    match strategy {
        Strategy::Bsp => Box::new(Bsp::new(padding, min_window_size)),
        Strategy::Grid { columns } => {
            let columns = if columns == 0 { 2 } else { columns };
            Box::new(Grid::new(columns, padding, min_window_size))
        }
    }
}
