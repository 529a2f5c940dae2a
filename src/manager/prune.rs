//! Prune tick phase (`spec.md` §4.E.9), rate-limited to once per second by
//! the caller in [`super::WindowManager::prune_if_due`].

use crate::backend::PlatformBackend;
use crate::window::WorkspaceId;

use super::WindowManager;

impl<B: PlatformBackend> WindowManager<B> {
    pub(crate) fn prune(&mut self) {
        let stale: Vec<_> = self
            .windows
            .iter()
            .filter(|w| {
                !w.is_valid
                    || self.backend.is_excluded(w.id)
                    || self.backend.is_hidden(w.id)
            })
            .map(|w| (w.id, w.workspace, w.is_maximized))
            .collect();

        for (id, workspace, was_maximized) in stale {
            self.windows.remove(id);
            if let Err(err) = self.backend.border_remove(id) {
                self.log_backend_error("border_remove (prune)", err);
            }
            if was_maximized {
                self.clear_maximized_state_if_last_occupant(workspace);
            }
        }

        self.rebuild_workspace_stats();
    }

    fn clear_maximized_state_if_last_occupant(&mut self, workspace: WorkspaceId) {
        let still_has_maximized = self
            .windows
            .iter()
            .any(|w| w.workspace == workspace && w.is_maximized);
        if still_has_maximized {
            return;
        }
        let max_per_ws = self.config.config().max_windows_per_workspace;
        if let Some(ws) = self.workspaces.get_mut(workspace) {
            ws.has_maximized_state = false;
            ws.max_windows = max_per_ws;
            ws.recompute_available_space();
        }
    }
}
