//! Reload-config tick phase (`spec.md` §4.E.1).

use gridflux_config::Config;
use tracing::debug;

use crate::backend::PlatformBackend;
use crate::filter;
use crate::window::WorkspaceId;

use super::WindowManager;

/// Default border thickness in pixels; not exposed as a config field,
/// only `border_color` is.
const BORDER_THICKNESS: u32 = 2;

impl<B: PlatformBackend> WindowManager<B> {
    pub(crate) fn reload_config(&mut self) {
        let old = self.config.config().clone();
        let reloaded = match self.config.reload_if_changed() {
            Ok(Some(new)) => Some(new.clone()),
            Ok(None) => None,
            Err(err) => {
                self.log_backend_error("config reload", err);
                None
            }
        };

        let Some(new) = reloaded else {
            return;
        };
        if new == old {
            return;
        }
        debug!("config changed, adopting new snapshot");
        self.on_config_changed(&old, &new);
    }

    fn on_config_changed(&mut self, old: &Config, new: &Config) {
        if new.enable_borders != old.enable_borders {
            self.backend.border_cleanup();
            if new.enable_borders {
                self.rehydrate_borders(new);
            }
        }
        self.sync_workspace_count();
    }

    fn rehydrate_borders(&mut self, config: &Config) {
        let workspace_ids: Vec<WorkspaceId> =
            self.workspaces.list().iter().map(|w| w.id).collect();
        for ws in workspace_ids {
            let scanned = match self.backend.enumerate_windows(self.display, ws.0 - 1) {
                Ok(scanned) => scanned,
                Err(err) => {
                    self.log_backend_error("enumerate_windows (border rehydrate)", err);
                    continue;
                }
            };
            for window in scanned {
                if !window.is_valid || window.is_minimized {
                    continue;
                }
                if filter::is_excluded(&window.class, window.kind, window.state, window.is_fullscreen) {
                    continue;
                }
                if let Err(err) =
                    self.backend
                        .border_add(window.id, config.border_color, BORDER_THICKNESS)
                {
                    self.log_backend_error("border_add", err);
                }
            }
        }
    }

    /// Mirrors the backend's reported workspace count into the workspace
    /// list, materializing any newly-visible workspaces.
    fn sync_workspace_count(&mut self) {
        let count = match self.backend.get_workspace_count(self.display) {
            Ok(count) => count,
            Err(err) => {
                self.log_backend_error("get_workspace_count", err);
                return;
            }
        };
        if count == 0 {
            return;
        }
        let max_per_ws = self.config.config().max_windows_per_workspace;
        let max_workspaces = self.config.config().max_workspaces;
        if let Err(err) = self
            .workspaces
            .ensure(WorkspaceId(count as i32), max_per_ws, max_workspaces)
        {
            self.log_backend_error("sync_workspace_count", err);
        }
    }
}
