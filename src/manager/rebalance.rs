//! Overflow-rebalance tick phase (`spec.md` §4.E.4). Runs every tick and
//! is idempotent: once it converges, no workspace exceeds capacity.

use crate::backend::PlatformBackend;
use crate::window::WorkspaceId;

use super::WindowManager;

impl<B: PlatformBackend> WindowManager<B> {
    pub(crate) fn rebalance_overflow(&mut self) {
        let max_per_ws = self.config.config().max_windows_per_workspace;
        let max_workspaces = self.config.config().max_workspaces;

        let overflowing: Vec<(WorkspaceId, u32)> = self
            .workspaces
            .list()
            .iter()
            .filter(|w| !w.has_maximized_state && w.window_count > w.max_windows)
            .map(|w| (w.id, w.window_count - w.max_windows))
            .collect();

        for (source, overflow) in overflowing {
            for _ in 0..overflow {
                self.migrate_one_overflowing_window(source, max_per_ws, max_workspaces);
            }
        }

        self.rebuild_workspace_stats();
    }

    fn migrate_one_overflowing_window(
        &mut self,
        source: WorkspaceId,
        max_per_ws: u32,
        max_workspaces: u32,
    ) {
        let destination = self.select_rebalance_destination(max_per_ws, max_workspaces);
        let Some(destination) = destination else {
            return;
        };
        if destination == source {
            return;
        }

        // Most-recently-added window in the source workspace's filtered
        // view (`spec.md` §4.B: `get_by_workspace` reverse order).
        let candidate = self
            .windows
            .get_by_workspace(source)
            .first()
            .map(|w| w.id);
        let Some(window_id) = candidate else {
            return;
        };
        if let Some(window) = self.windows.get_mut(window_id) {
            window.workspace = destination;
            window.needs_update = true;
        }
        self.windows.mark_workspace_dirty(source);
        self.windows.mark_workspace_dirty(destination);
        self.rebuild_workspace_stats();
    }

    fn select_rebalance_destination(
        &mut self,
        max_per_ws: u32,
        max_workspaces: u32,
    ) -> Option<WorkspaceId> {
        if !self.last_active_workspace.is_none() {
            if let Some(active) = self.workspaces.get(self.last_active_workspace) {
                if active.available_space > 0 {
                    return Some(active.id);
                }
            }
        }
        self.workspaces.find_free(max_per_ws, max_workspaces).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockWindow;
    use crate::backend::MockBackend;
    use crate::window::WindowId;
    use gridflux_config::ConfigFile;

    fn manager_with_capacity(max_per_ws: u32) -> (WindowManager<MockBackend>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::open(dir.path().join("config.json")).unwrap();
        let mut manager = WindowManager::new(MockBackend::new(), config).unwrap();
        let mut cfg = manager.config().clone();
        cfg.max_windows_per_workspace = max_per_ws;
        manager.config.persist(cfg).unwrap();
        (manager, dir)
    }

    #[test]
    fn overflow_migrates_the_most_recently_added_window() {
        let (mut manager, _dir) = manager_with_capacity(1);
        manager.backend.insert(WindowId(1), MockWindow::new("a"));
        manager.backend.insert(WindowId(2), MockWindow::new("b"));
        manager.watch();
        manager.rebalance_overflow();

        let ws1_count = manager
            .windows
            .iter()
            .filter(|w| w.workspace == WorkspaceId(1))
            .count();
        assert_eq!(ws1_count, 1);
    }

    #[test]
    fn exact_capacity_never_triggers_rebalance() {
        let (mut manager, _dir) = manager_with_capacity(2);
        manager.backend.insert(WindowId(1), MockWindow::new("a"));
        manager.backend.insert(WindowId(2), MockWindow::new("b"));
        manager.watch();
        let before: Vec<_> = manager.windows.iter().map(|w| w.workspace).collect();
        manager.rebalance_overflow();
        let after: Vec<_> = manager.windows.iter().map(|w| w.workspace).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn rebalance_is_idempotent_once_converged() {
        let (mut manager, _dir) = manager_with_capacity(1);
        manager.backend.insert(WindowId(1), MockWindow::new("a"));
        manager.backend.insert(WindowId(2), MockWindow::new("b"));
        manager.watch();
        manager.rebalance_overflow();
        let after_first: Vec<_> = manager.windows.iter().map(|w| (w.id, w.workspace)).collect();
        manager.rebalance_overflow();
        let after_second: Vec<_> = manager.windows.iter().map(|w| (w.id, w.workspace)).collect();
        assert_eq!(after_first, after_second);
    }
}
