use crate::geometry::Rect;
use crate::window::WindowInfo;

use super::LayoutEngine;

/// Recursive binary space partition, grounded on `split_layout` in the
/// original implementation (`layout.c`). Splits vertically at even
/// recursion depths and horizontally at odd depths, halving the window
/// count at each level, until a single window remains per leaf.
pub struct Bsp {
    padding: u32,
    min_window_size: u32,
}

impl Bsp {
    pub fn new(padding: u32, min_window_size: u32) -> Self {
        Bsp {
            padding,
            min_window_size,
        }
    }

    fn split(&self, count: u32, area: Rect, out: &mut [Rect], depth: u32) {
        if count == 0 {
            return;
        }
        if count == 1 {
            let mut leaf = area;
            leaf.apply_padding(self.padding, self.min_window_size);
            leaf.ensure_min(self.min_window_size);
            out[0] = leaf;
            return;
        }

        let left = count / 2;
        let right = count - left;
        let vertical = depth % 2 == 0;

        let (a1, a2) = if vertical {
            let w1 = area.w / 2;
            let w2 = area.w - w1;
            (
                Rect::new(area.x, area.y, w1, area.h),
                Rect::new(area.x + w1 as i32, area.y, w2, area.h),
            )
        } else {
            let h1 = area.h / 2;
            let h2 = area.h - h1;
            (
                Rect::new(area.x, area.y, area.w, h1),
                Rect::new(area.x, area.y + h1 as i32, area.w, h2),
            )
        };

        let (out_left, out_right) = out.split_at_mut(left as usize);
        self.split(left, a1, out_left, depth + 1);
        self.split(right, a2, out_right, depth + 1);
    }
}

impl LayoutEngine for Bsp {
    fn apply_layout(&self, _windows: &[WindowInfo], count: u32, bounds: Rect, out: &mut [Rect]) {
        self.split(count, bounds, out, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::dummy_windows;

    #[test]
    fn zero_windows_writes_nothing() {
        let engine = Bsp::new(0, 1);
        let windows = dummy_windows(0);
        let mut out: Vec<Rect> = vec![];
        engine.apply_layout(&windows, 0, Rect::new(0, 0, 100, 100), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn single_window_gets_full_bounds_padded() {
        let engine = Bsp::new(5, 1);
        let windows = dummy_windows(1);
        let mut out = vec![Rect::default(); 1];
        engine.apply_layout(&windows, 1, Rect::new(0, 0, 100, 100), &mut out);
        assert_eq!(out[0], Rect::new(5, 5, 90, 90));
    }

    #[test]
    fn two_windows_split_vertically_at_depth_zero() {
        let engine = Bsp::new(0, 1);
        let windows = dummy_windows(2);
        let mut out = vec![Rect::default(); 2];
        engine.apply_layout(&windows, 2, Rect::new(0, 0, 100, 50), &mut out);
        assert_eq!(out[0], Rect::new(0, 0, 50, 50));
        assert_eq!(out[1], Rect::new(50, 0, 50, 50));
    }

    #[test]
    fn adjacent_siblings_are_disjoint_before_padding() {
        let engine = Bsp::new(0, 1);
        let windows = dummy_windows(5);
        let mut out = vec![Rect::default(); 5];
        engine.apply_layout(&windows, 5, Rect::new(0, 0, 400, 300), &mut out);
        for i in 0..out.len() {
            for j in (i + 1)..out.len() {
                assert_eq!(
                    out[i].intersection_area(&out[j]),
                    0,
                    "rect {i} and {j} overlap: {:?} {:?}",
                    out[i],
                    out[j]
                );
            }
        }
    }

    #[test]
    fn output_order_matches_input_order() {
        let engine = Bsp::new(0, 1);
        let windows = dummy_windows(4);
        let mut out = vec![Rect::default(); 4];
        engine.apply_layout(&windows, 4, Rect::new(0, 0, 400, 400), &mut out);
        // windows[0] and windows[1] are the first bisection's left half,
        // so they must occupy the left side of the bounds.
        assert!(out[0].x < 200);
        assert!(out[1].x < 200);
    }
}
