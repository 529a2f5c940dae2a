//! IPC-triggered mutations (`spec.md` §4.G): `move`, `lock`/`unlock`,
//! `toggle-borders`, `rule add`/`remove`. Called directly by
//! [`crate::ipc::dispatch`], outside the regular tick phases.

use gridflux_config::RuleError;

use crate::backend::PlatformBackend;
use crate::error::{CoreError, CoreResult};
use crate::window::{WindowId, WorkspaceId};
use crate::workspace::WorkspaceManager;

use super::WindowManager;

impl<B: PlatformBackend> WindowManager<B> {
    pub fn workspaces_mut(&mut self) -> &mut WorkspaceManager {
        &mut self.workspaces
    }

    /// Moves a tracked, non-maximized window to `destination`, enforcing
    /// capacity and lock checks on the way in.
    pub fn move_window_to_workspace(
        &mut self,
        id: WindowId,
        destination: WorkspaceId,
        max_per_ws: u32,
        max_workspaces: u32,
    ) -> CoreResult<()> {
        let Some(source) = self.windows.get(id).map(|w| w.workspace) else {
            return Err(CoreError::WindowNotFound);
        };
        if self.windows.get(id).map(|w| w.is_maximized).unwrap_or(false) {
            return Err(CoreError::WorkspaceMaximized(destination));
        }
        if source == destination {
            return Ok(());
        }

        self.workspaces.ensure(destination, max_per_ws, max_workspaces)?;
        let ws = self
            .workspaces
            .get(destination)
            .ok_or(CoreError::InvalidParameter(format!("no such workspace {destination}")))?;
        if ws.is_locked {
            return Err(CoreError::WorkspaceLocked(destination));
        }
        if ws.available_space <= 0 {
            return Err(CoreError::WorkspaceFull(destination));
        }

        if let Some(window) = self.windows.get_mut(id) {
            window.workspace = destination;
            window.needs_update = true;
        }
        self.windows.mark_workspace_dirty(source);
        self.windows.mark_workspace_dirty(destination);
        self.rebuild_workspace_stats();
        Ok(())
    }

    pub fn toggle_borders(&mut self) -> bool {
        let mut config = self.config.config().clone();
        config.enable_borders = !config.enable_borders;
        let enabled = config.enable_borders;
        if let Err(err) = self.config.persist(config) {
            self.log_backend_error("persist (toggle-borders)", err);
        }
        enabled
    }

    pub fn add_rule(&mut self, class: String, workspace: i32) -> Result<(), RuleError> {
        let mut config = self.config.config().clone();
        config.rules.add(&class, workspace)?;
        if let Err(err) = self.config.persist(config) {
            self.log_backend_error("persist (rule add)", err);
        }
        Ok(())
    }

    pub fn remove_rule(&mut self, class: &str) -> Result<(), RuleError> {
        let mut config = self.config.config().clone();
        config.rules.remove(class)?;
        if let Err(err) = self.config.persist(config) {
            self.log_backend_error("persist (rule remove)", err);
        }
        Ok(())
    }
}
