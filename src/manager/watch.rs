//! Window discovery & reconciliation tick phase (`spec.md` §4.E.2).

use crate::backend::{PlatformBackend, ScannedWindow};
use crate::filter;
use crate::window::{rule_workspace_for_class, WindowInfo, WorkspaceId};

use super::WindowManager;

const BORDER_THICKNESS: u32 = 2;

impl<B: PlatformBackend> WindowManager<B> {
    pub(crate) fn watch(&mut self) {
        self.hide_behind_fullscreen();

        let max_per_ws = self.config.config().max_windows_per_workspace;
        let max_workspaces = self.config.config().max_workspaces;

        let mut workspace_ids: Vec<WorkspaceId> =
            self.workspaces.list().iter().map(|w| w.id).collect();
        if workspace_ids.is_empty() {
            workspace_ids.push(WorkspaceId(1));
        }

        for ws in workspace_ids {
            let scanned = match self.backend.enumerate_windows(self.display, ws.0 - 1) {
                Ok(scanned) => scanned,
                Err(err) => {
                    self.log_backend_error("enumerate_windows", err);
                    continue;
                }
            };

            for window in scanned {
                if !window.is_valid {
                    continue;
                }
                if filter::is_excluded(&window.class, window.kind, window.state, window.is_fullscreen) {
                    continue;
                }

                if self.windows.contains(window.id) {
                    self.reconcile_known_window(window);
                } else {
                    self.adopt_new_window(window, max_per_ws, max_workspaces);
                }
            }
        }

        self.rebuild_workspace_stats();
    }

    fn hide_behind_fullscreen(&mut self) {
        let Some(focused) = self.backend.get_focused(self.display) else {
            return;
        };
        if self.backend.is_excluded(focused) {
            return;
        }
        if !self.backend.is_fullscreen(focused) {
            return;
        }
        let ids: Vec<_> = self.windows.iter().map(|w| w.id).filter(|&id| id != focused).collect();
        for id in ids {
            if let Err(err) = self.backend.minimize(self.display, id) {
                self.log_backend_error("minimize (fullscreen hide)", err);
                continue;
            }
            if let Some(info) = self.windows.get_mut(id) {
                info.is_minimized = true;
            }
        }
    }

    /// Preserves the core-managed fields (`workspace`, `is_maximized`,
    /// `is_minimized`) and updates the rest from the fresh scan.
    fn reconcile_known_window(&mut self, scanned: ScannedWindow) {
        if let Some(existing) = self.windows.get_mut(scanned.id) {
            existing.geometry = scanned.geometry;
            existing.name = scanned.name;
            existing.class = scanned.class;
            existing.is_valid = scanned.is_valid;
            existing.touch();
        }
    }

    /// Implements the new-window workspace assignment policy (`spec.md`
    /// §4.E.2): rule match, else maximized-workspace, else active
    /// workspace with space, else `find_free`/create.
    fn assign_workspace_for_new_window(
        &mut self,
        scanned: &ScannedWindow,
        max_per_ws: u32,
        max_workspaces: u32,
    ) -> WorkspaceId {
        if let Some(rule_ws) = rule_workspace_for_class(self.config.config(), &scanned.class) {
            if self.workspaces.ensure(rule_ws, max_per_ws, max_workspaces).is_ok() {
                return rule_ws;
            }
        }

        if scanned.is_maximized {
            if let Some(ws) = self.workspaces.find_maximized() {
                return ws;
            }
            if let Ok(ws) = self.workspaces.create(max_per_ws, max_workspaces, true, false) {
                return ws;
            }
        }

        if !self.last_active_workspace.is_none() {
            if let Some(active) = self.workspaces.get(self.last_active_workspace) {
                if active.available_space > 0 {
                    return active.id;
                }
            }
        }

        self.workspaces
            .find_free(max_per_ws, max_workspaces)
            .unwrap_or(WorkspaceId(1))
    }

    fn adopt_new_window(&mut self, scanned: ScannedWindow, max_per_ws: u32, max_workspaces: u32) {
        let workspace = self.assign_workspace_for_new_window(&scanned, max_per_ws, max_workspaces);

        let mut info = WindowInfo::new(scanned.id, workspace, scanned.geometry, scanned.class);
        info.name = scanned.name;
        info.is_maximized = scanned.is_maximized;
        self.windows.upsert(info);

        if let Err(err) = self.backend.unminimize(self.display, scanned.id) {
            self.log_backend_error("unminimize (new window)", err);
        }

        self.last_active_workspace = workspace;
        self.minimize_every_other_workspace(workspace);

        if self.config.config().enable_borders {
            let color = self.config.config().border_color;
            if let Err(err) = self.backend.border_add(scanned.id, color, BORDER_THICKNESS) {
                self.log_backend_error("border_add (new window)", err);
            }
        }
    }

    /// Minimizes every tracked window not on `active`, establishing "the
    /// active workspace is visible" (`spec.md` §4.E.2).
    pub(crate) fn minimize_every_other_workspace(&mut self, active: WorkspaceId) {
        let ids: Vec<_> = self
            .windows
            .iter()
            .filter(|w| w.workspace != active)
            .map(|w| w.id)
            .collect();
        for id in ids {
            if self.backend.is_excluded(id) {
                continue;
            }
            if let Err(err) = self.backend.minimize(self.display, id) {
                self.log_backend_error("minimize (workspace isolation)", err);
                continue;
            }
            if let Some(info) = self.windows.get_mut(id) {
                info.is_minimized = true;
            }
        }
    }
}
