use crate::geometry::Rect;
use crate::window::WindowInfo;

use super::LayoutEngine;

/// Fixed-column grid, grounded on `grid_apply_layout` in the original
/// implementation (`layout.c`). Window `i` lands at column `i % columns`,
/// row `i / columns`.
pub struct Grid {
    columns: u32,
    padding: u32,
    min_window_size: u32,
}

impl Grid {
    pub fn new(columns: u32, padding: u32, min_window_size: u32) -> Self {
        Grid {
            columns: columns.max(1),
            padding,
            min_window_size,
        }
    }
}

impl LayoutEngine for Grid {
    fn apply_layout(&self, _windows: &[WindowInfo], count: u32, bounds: Rect, out: &mut [Rect]) {
        if count == 0 {
            return;
        }
        let rows = count.div_ceil(self.columns);
        let cell_w = bounds.w / self.columns;
        let cell_h = bounds.h / rows.max(1);

        for i in 0..count as usize {
            let col = i as u32 % self.columns;
            let row = i as u32 / self.columns;
            let mut cell = Rect::new(
                bounds.x + (col * cell_w) as i32,
                bounds.y + (row * cell_h) as i32,
                cell_w,
                cell_h,
            );
            cell.apply_padding(self.padding, self.min_window_size);
            cell.ensure_min(self.min_window_size);
            out[i] = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::dummy_windows;

    #[test]
    fn zero_count_writes_nothing() {
        let engine = Grid::new(3, 0, 1);
        let windows = dummy_windows(0);
        let mut out: Vec<Rect> = vec![];
        engine.apply_layout(&windows, 0, Rect::new(0, 0, 100, 100), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn four_windows_two_columns_fill_a_two_by_two_grid() {
        let engine = Grid::new(2, 0, 1);
        let windows = dummy_windows(4);
        let mut out = vec![Rect::default(); 4];
        engine.apply_layout(&windows, 4, Rect::new(0, 0, 200, 200), &mut out);
        assert_eq!(out[0], Rect::new(0, 0, 100, 100));
        assert_eq!(out[1], Rect::new(100, 0, 100, 100));
        assert_eq!(out[2], Rect::new(0, 100, 100, 100));
        assert_eq!(out[3], Rect::new(100, 100, 100, 100));
    }

    #[test]
    fn rows_round_up_for_uneven_counts() {
        let engine = Grid::new(2, 0, 1);
        let windows = dummy_windows(3);
        let mut out = vec![Rect::default(); 3];
        // 3 windows / 2 columns -> 2 rows.
        engine.apply_layout(&windows, 3, Rect::new(0, 0, 200, 200), &mut out);
        assert_eq!(out[2].y, 100);
    }

    #[test]
    fn output_order_matches_input_order() {
        let engine = Grid::new(3, 0, 1);
        let windows = dummy_windows(6);
        let mut out = vec![Rect::default(); 6];
        engine.apply_layout(&windows, 6, Rect::new(0, 0, 300, 200), &mut out);
        assert_eq!(out[0].x, 0);
        assert_eq!(out[1].x, 100);
        assert_eq!(out[2].x, 200);
        assert_eq!(out[3].x, 0);
        assert_eq!(out[3].y, 100);
    }
}
