//! Apply-layout tick phase (`spec.md` §4.E.3).

use crate::backend::{GeometryFlags, PlatformBackend};
use crate::geometry::Rect;
use crate::layout::{self, Strategy};
use crate::window::{WindowId, WorkspaceId};

use super::WindowManager;

impl<B: PlatformBackend> WindowManager<B> {
    pub(crate) fn apply_layout(&mut self) {
        let config = self.config.config().clone();

        // Computed directly from the window list rather than the
        // workspace's cached `window_count`, so this phase doesn't depend
        // on `rebuild_stats` having already run this tick.
        let workspace_ids: Vec<WorkspaceId> = self
            .workspaces
            .list()
            .iter()
            .filter(|w| !w.has_maximized_state)
            .map(|w| w.id)
            .filter(|&id| self.windows.iter().any(|w| w.workspace == id))
            .collect();

        let engine = layout::build(Strategy::Bsp, config.default_padding, config.min_window_size);

        for ws in workspace_ids {
            let window_ids: Vec<WindowId> = self
                .windows
                .iter()
                .filter(|w| w.workspace == ws && !w.is_minimized)
                .filter(|w| !self.backend.is_excluded(w.id))
                .map(|w| w.id)
                .collect();
            if window_ids.is_empty() {
                continue;
            }

            let bounds = match self.backend.get_screen_bounds(self.display) {
                Ok(bounds) => bounds,
                Err(err) => {
                    self.log_backend_error("get_screen_bounds", err);
                    continue;
                }
            };

            let window_infos: Vec<_> = window_ids
                .iter()
                .filter_map(|&id| self.windows.get(id).cloned())
                .collect();
            let count = window_infos.len() as u32;
            let mut rects = vec![Rect::default(); count as usize];
            engine.apply_layout(&window_infos, count, bounds, &mut rects);

            for (id, rect) in window_ids.iter().zip(rects.iter()) {
                let skip = match self.windows.get(*id) {
                    Some(info) => info.is_minimized || (!info.needs_update && !info.is_valid),
                    None => true,
                };
                if skip {
                    continue;
                }
                if let Err(err) =
                    self.backend
                        .set_geometry(self.display, *id, *rect, GeometryFlags::ALL, &config)
                {
                    self.log_backend_error("set_geometry", err);
                    continue;
                }
                if let Some(info) = self.windows.get_mut(*id) {
                    info.geometry = *rect;
                }
            }

            for window in self.windows.iter_mut().filter(|w| w.workspace == ws) {
                window.needs_update = false;
            }
        }
    }
}
