//! Handle-events tick phase (`spec.md` §4.E.5): focus, maximize, minimize,
//! and workspace-switch transitions.

use crate::backend::PlatformBackend;
use crate::window::{WindowId, WorkspaceId};

use super::WindowManager;

impl<B: PlatformBackend> WindowManager<B> {
    pub(crate) fn handle_events(&mut self) {
        let Some(focused) = self.backend.get_focused(self.display) else {
            return;
        };
        if self.backend.is_excluded(focused) {
            return;
        }
        if !self.windows.contains(focused) {
            return;
        }

        self.handle_maximize_transition(focused);
        self.reconcile_minimize_state(focused);
        self.handle_workspace_switch(focused);

        self.last_active_window = focused.0;
        if let Some(info) = self.windows.get(focused) {
            self.last_active_workspace = info.workspace;
        }
    }

    fn handle_maximize_transition(&mut self, focused: WindowId) {
        let was = self.windows.get(focused).map(|w| w.is_maximized).unwrap_or(false);
        let now = self.backend.is_maximized(focused);
        if was == now {
            return;
        }

        let max_per_ws = self.config.config().max_windows_per_workspace;
        let max_workspaces = self.config.config().max_workspaces;

        if now {
            let destination = match self.workspaces.find_maximized() {
                Some(ws) => ws,
                None => match self.workspaces.create(max_per_ws, max_workspaces, true, false) {
                    Ok(ws) => ws,
                    Err(err) => {
                        self.log_backend_error("create maximized workspace", err);
                        return;
                    }
                },
            };
            if let Some(info) = self.windows.get_mut(focused) {
                info.workspace = destination;
                info.is_maximized = true;
            }
            self.minimize_every_other_workspace_member(destination, focused);
            self.backend.dock_hide();
            self.dock_hidden = true;
        } else {
            let old_workspace = self.windows.get(focused).map(|w| w.workspace);
            if let Some(info) = self.windows.get_mut(focused) {
                info.is_maximized = false;
            }

            if let Some(old) = old_workspace {
                let still_has_maximized = self
                    .windows
                    .iter()
                    .any(|w| w.workspace == old && w.is_maximized);
                if !still_has_maximized {
                    if let Some(ws) = self.workspaces.get_mut(old) {
                        ws.has_maximized_state = false;
                        ws.max_windows = max_per_ws;
                    }
                }
            }

            let destination = self
                .workspaces
                .find_free(max_per_ws, max_workspaces)
                .unwrap_or_else(|_| old_workspace.unwrap_or(WorkspaceId(1)));
            if let Some(info) = self.windows.get_mut(focused) {
                info.workspace = destination;
                info.needs_update = true;
            }

            let any_maximized_in_use = self
                .windows
                .iter()
                .any(|w| w.is_maximized);
            if !any_maximized_in_use {
                self.backend.dock_restore();
                self.dock_hidden = false;
            }
        }

        self.rebuild_workspace_stats();
    }

    fn minimize_every_other_workspace_member(&mut self, workspace: WorkspaceId, except: WindowId) {
        let ids: Vec<_> = self
            .windows
            .iter()
            .filter(|w| w.workspace == workspace && w.id != except)
            .map(|w| w.id)
            .collect();
        for id in ids {
            if self.backend.is_excluded(id) {
                continue;
            }
            if let Err(err) = self.backend.minimize(self.display, id) {
                self.log_backend_error("minimize (maximize transition)", err);
                continue;
            }
            if let Some(info) = self.windows.get_mut(id) {
                info.is_minimized = true;
            }
        }
    }

    /// Reconciles user-initiated minimize actions for every tracked window
    /// on the focused window's current workspace — the only path that
    /// brings the core's stored flag in line with out-of-band minimizes.
    fn reconcile_minimize_state(&mut self, focused: WindowId) {
        let Some(current_ws) = self.windows.get(focused).map(|w| w.workspace) else {
            return;
        };
        let ids: Vec<_> = self
            .windows
            .iter()
            .filter(|w| w.workspace == current_ws)
            .map(|w| w.id)
            .collect();
        for id in ids {
            let minimized = self.backend.is_minimized(id);
            if let Some(info) = self.windows.get_mut(id) {
                info.is_minimized = minimized;
            }
        }
    }

    fn handle_workspace_switch(&mut self, focused: WindowId) {
        let Some(new_workspace) = self.windows.get(focused).map(|w| w.workspace) else {
            return;
        };
        if new_workspace == self.last_active_workspace || self.last_active_window == 0 {
            return;
        }
        self.perform_workspace_switch(new_workspace, Some(focused));
    }

    /// The workspace-switch transition itself (`spec.md` §4.E.5): minimize
    /// everything outside `new_workspace`, unminimize everything inside it
    /// (bringing `front_last` to the front of that unminimize order if
    /// given), then settle the dock state. Shared by the event handler and
    /// the keymap handler, which forces this same transition without a
    /// real backend focus change.
    ///
    /// When `new_workspace` has `has_maximized_state`, only `front_last`
    /// comes back — every other window in it stays minimized, so at most
    /// one window is ever visible on a maximized workspace.
    pub(crate) fn perform_workspace_switch(&mut self, new_workspace: WorkspaceId, front_last: Option<WindowId>) {
        let other_ids: Vec<_> = self
            .windows
            .iter()
            .filter(|w| w.workspace != new_workspace)
            .map(|w| w.id)
            .collect();
        for id in other_ids {
            if self.backend.is_excluded(id) {
                continue;
            }
            if self.backend.minimize(self.display, id).is_ok() {
                if let Some(info) = self.windows.get_mut(id) {
                    info.is_minimized = true;
                }
            }
        }

        let has_maximized = self
            .workspaces
            .get(new_workspace)
            .map(|w| w.has_maximized_state)
            .unwrap_or(false);

        let mut new_ids: Vec<_> = self
            .windows
            .iter()
            .filter(|w| w.workspace == new_workspace && Some(w.id) != front_last)
            .map(|w| w.id)
            .collect();
        if has_maximized {
            new_ids.clear();
        }
        new_ids.extend(front_last);
        for id in new_ids {
            if self.backend.is_excluded(id) || self.backend.is_hidden(id) {
                continue;
            }
            if self.backend.unminimize(self.display, id).is_ok() {
                if let Some(info) = self.windows.get_mut(id) {
                    info.is_minimized = false;
                }
            }
        }

        if has_maximized {
            self.backend.dock_hide();
            self.dock_hidden = true;
        } else {
            self.backend.dock_restore();
            self.dock_hidden = false;
        }

        self.last_active_workspace = new_workspace;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockWindow;
    use crate::backend::MockBackend;
    use crate::window::WorkspaceId;
    use gridflux_config::ConfigFile;

    fn manager() -> (WindowManager<MockBackend>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::open(dir.path().join("config.json")).unwrap();
        (WindowManager::new(MockBackend::new(), config).unwrap(), dir)
    }

    #[test]
    fn maximizing_moves_the_window_to_a_maximized_workspace_and_hides_the_dock() {
        let (mut manager, _dir) = manager();
        manager.backend.insert(WindowId(1), MockWindow::new("firefox"));
        manager.watch();
        manager.backend.focused = Some(WindowId(1));
        manager.last_active_window = 1;
        manager.last_active_workspace = WorkspaceId(1);

        manager.backend.windows.get_mut(&WindowId(1)).unwrap().is_maximized = true;
        manager.handle_events();

        let info = manager.windows.get(WindowId(1)).unwrap();
        assert!(info.is_maximized);
        assert!(manager.dock_hidden);
        let ws = manager.workspaces.get(info.workspace).unwrap();
        assert!(ws.has_maximized_state);
    }

    #[test]
    fn workspace_switch_minimizes_the_old_workspace_and_unminimizes_the_new_one() {
        let (mut manager, _dir) = manager();
        manager.backend.insert(WindowId(1), MockWindow::new("firefox"));
        manager.backend.insert(WindowId(2), {
            let mut w = MockWindow::new("kate");
            w.host_workspace = 1;
            w
        });
        manager.workspaces.ensure(WorkspaceId(2), 10, 32).unwrap();
        manager.watch();

        manager.windows.get_mut(WindowId(2)).unwrap().workspace = WorkspaceId(2);
        manager.last_active_window = 1;
        manager.last_active_workspace = WorkspaceId(1);
        manager.backend.focused = Some(WindowId(2));

        manager.handle_events();

        assert!(manager.backend.is_minimized(WindowId(1)));
        assert!(!manager.backend.is_minimized(WindowId(2)));
        assert_eq!(manager.last_active_workspace, WorkspaceId(2));
    }

    #[test]
    fn switching_to_a_maximized_workspace_only_unminimizes_the_active_window() {
        let (mut manager, _dir) = manager();
        manager.backend.insert(WindowId(1), MockWindow::new("firefox"));
        manager.backend.insert(WindowId(2), {
            let mut w = MockWindow::new("kate");
            w.host_workspace = 1;
            w
        });
        manager.backend.insert(WindowId(3), {
            let mut w = MockWindow::new("alacritty");
            w.host_workspace = 1;
            w
        });
        manager.workspaces.ensure(WorkspaceId(2), 10, 32).unwrap();
        manager.watch();

        manager.windows.get_mut(WindowId(2)).unwrap().workspace = WorkspaceId(2);
        manager.windows.get_mut(WindowId(3)).unwrap().workspace = WorkspaceId(2);
        manager.windows.get_mut(WindowId(2)).unwrap().is_minimized = true;
        manager.windows.get_mut(WindowId(3)).unwrap().is_minimized = true;
        manager.backend.minimize(manager.display, WindowId(2)).unwrap();
        manager.backend.minimize(manager.display, WindowId(3)).unwrap();
        manager.workspaces.get_mut(WorkspaceId(2)).unwrap().has_maximized_state = true;

        manager.perform_workspace_switch(WorkspaceId(2), Some(WindowId(3)));

        assert!(!manager.backend.is_minimized(WindowId(3)));
        assert!(manager.backend.is_minimized(WindowId(2)));
    }
}
