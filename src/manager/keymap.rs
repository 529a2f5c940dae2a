//! Keymap tick phase (`spec.md` §4.E.7): `WorkspacePrev`/`WorkspaceNext`
//! actions step the active workspace and force a workspace-switch.
//!
//! Runs after the event handler so a switch caused here isn't immediately
//! reverted by the event handler re-reading the now-stale focused window.

use crate::backend::{KeyAction, PlatformBackend};
use crate::window::WorkspaceId;

use super::WindowManager;

impl<B: PlatformBackend> WindowManager<B> {
    pub(crate) fn drain_keymap(&mut self) {
        while let Some(action) = self.backend.keymap_poll() {
            self.apply_key_action(action);
        }
    }

    fn apply_key_action(&mut self, action: KeyAction) {
        let count = self.workspaces.count() as i32;
        if count == 0 {
            return;
        }

        let current = if self.last_active_workspace.is_none() {
            1
        } else {
            self.last_active_workspace.0
        };
        let zero_based = (current - 1).rem_euclid(count);
        let stepped = match action {
            KeyAction::WorkspaceNext => (zero_based + 1).rem_euclid(count),
            KeyAction::WorkspacePrev => (zero_based - 1).rem_euclid(count),
        };
        let target = WorkspaceId(stepped + 1);
        if target == WorkspaceId(current) {
            return;
        }

        let front = self.windows.get_by_workspace(target).first().map(|w| w.id);
        self.perform_workspace_switch(target, front);
    }
}
