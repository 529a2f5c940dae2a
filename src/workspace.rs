//! Workspace manager (`spec.md` §4.D): creates, locates, locks, and
//! removes workspace buckets; maintains per-workspace capacity accounting.

use crate::collections::{WindowList, WorkspaceList};
use crate::error::{CoreError, CoreResult};
use crate::window::{WorkspaceId, WorkspaceInfo};

#[derive(Debug, Default)]
pub struct WorkspaceManager {
    workspaces: WorkspaceList,
}

impl WorkspaceManager {
    pub fn new() -> Self {
        WorkspaceManager::default()
    }

    pub fn list(&self) -> &WorkspaceList {
        &self.workspaces
    }

    pub fn get(&self, id: WorkspaceId) -> Option<&WorkspaceInfo> {
        self.workspaces.get(id)
    }

    pub fn get_mut(&mut self, id: WorkspaceId) -> Option<&mut WorkspaceInfo> {
        self.workspaces.get_mut(id)
    }

    pub fn count(&self) -> usize {
        self.workspaces.len()
    }

    /// Materializes workspaces `1..=id` that do not yet exist.
    pub fn ensure(&mut self, id: WorkspaceId, max_per_ws: u32, max_workspaces: u32) -> CoreResult<()> {
        if id.0 < 1 || id.0 as u32 > max_workspaces {
            return Err(CoreError::InvalidParameter(format!(
                "workspace id {id} out of range 1..={max_workspaces}"
            )));
        }
        for i in 1..=id.0 {
            let candidate = WorkspaceId(i);
            if !self.workspaces.contains(candidate) {
                self.workspaces.push(WorkspaceInfo::new(candidate, max_per_ws));
            }
        }
        Ok(())
    }

    /// Returns the smallest existing workspace id with `available_space >
    /// 0` and `is_locked = false`; if none exists, creates a new workspace
    /// with full capacity and returns its id.
    pub fn find_free(&mut self, max_per_ws: u32, max_workspaces: u32) -> CoreResult<WorkspaceId> {
        let mut candidates: Vec<_> = self
            .workspaces
            .iter()
            .filter(|w| !w.is_locked && w.available_space > 0)
            .map(|w| w.id)
            .collect();
        candidates.sort_by_key(|id| id.0);

        if let Some(&id) = candidates.first() {
            return Ok(id);
        }
        self.create(max_per_ws, max_workspaces, false, false)
    }

    /// Appends a workspace at id `count+1`.
    pub fn create(
        &mut self,
        max_per_ws: u32,
        max_workspaces: u32,
        maximized: bool,
        locked: bool,
    ) -> CoreResult<WorkspaceId> {
        let next = WorkspaceId(self.workspaces.len() as i32 + 1);
        if next.0 as u32 > max_workspaces {
            return Err(CoreError::WorkspaceFull(next));
        }
        let mut info = WorkspaceInfo::new(next, max_per_ws);
        info.has_maximized_state = maximized;
        info.is_locked = locked;
        info.recompute_available_space();
        self.workspaces.push(info);
        Ok(next)
    }

    /// The first existing workspace with `has_maximized_state=true`, if
    /// any; otherwise `None` (the caller creates one via [`Self::create`]).
    pub fn find_maximized(&self) -> Option<WorkspaceId> {
        self.workspaces
            .iter()
            .find(|w| w.has_maximized_state)
            .map(|w| w.id)
    }

    pub fn lock(&mut self, id: WorkspaceId) -> CoreResult<()> {
        let ws = self.workspaces.get_mut(id).ok_or(CoreError::InvalidParameter(
            format!("no such workspace {id}"),
        ))?;
        if ws.is_locked {
            return Err(CoreError::AlreadyLocked(id));
        }
        ws.is_locked = true;
        ws.recompute_available_space();
        Ok(())
    }

    pub fn unlock(&mut self, id: WorkspaceId) -> CoreResult<()> {
        let ws = self.workspaces.get_mut(id).ok_or(CoreError::InvalidParameter(
            format!("no such workspace {id}"),
        ))?;
        if !ws.is_locked {
            return Err(CoreError::AlreadyUnlocked(id));
        }
        ws.is_locked = false;
        ws.recompute_available_space();
        Ok(())
    }

    /// Reaps `id` if it is empty, not `active`, and more than one
    /// workspace exists (`spec.md` "Lifecycles").
    pub fn reap_if_empty(&mut self, id: WorkspaceId, active: WorkspaceId) {
        if id == active || self.workspaces.len() <= 1 {
            return;
        }
        if let Some(ws) = self.workspaces.get(id) {
            if ws.window_count == 0 {
                self.workspaces.remove(id);
            }
        }
    }

    /// Recounts every workspace from the window list (`spec.md` §4.D).
    pub fn rebuild_stats(&mut self, windows: &WindowList, max_per_ws: u32) {
        for ws in self.workspaces.iter_mut() {
            if ws.has_maximized_state {
                // Maximized workspaces keep whatever elevated capacity they
                // were given; only their window count is refreshed.
                ws.window_count = windows
                    .iter()
                    .filter(|w| w.workspace == ws.id && w.is_valid)
                    .count() as u32;
            } else {
                ws.max_windows = max_per_ws;
                ws.window_count = windows
                    .iter()
                    .filter(|w| w.workspace == ws.id && w.is_valid)
                    .count() as u32;
            }
            ws.recompute_available_space();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::window::{WindowId, WindowInfo};

    #[test]
    fn ensure_materializes_every_workspace_up_to_id() {
        let mut mgr = WorkspaceManager::new();
        mgr.ensure(WorkspaceId(3), 10, 32).unwrap();
        assert!(mgr.get(WorkspaceId(1)).is_some());
        assert!(mgr.get(WorkspaceId(2)).is_some());
        assert!(mgr.get(WorkspaceId(3)).is_some());
    }

    #[test]
    fn find_free_creates_a_new_workspace_when_all_locked() {
        let mut mgr = WorkspaceManager::new();
        mgr.create(10, 32, false, true).unwrap();
        let id = mgr.find_free(10, 32).unwrap();
        assert_eq!(id, WorkspaceId(2));
    }

    #[test]
    fn find_free_fails_past_max_workspaces() {
        let mut mgr = WorkspaceManager::new();
        mgr.create(10, 1, false, true).unwrap();
        assert!(matches!(
            mgr.find_free(10, 1),
            Err(CoreError::WorkspaceFull(_))
        ));
    }

    #[test]
    fn lock_unlock_round_trip_restores_equivalent_state() {
        let mut mgr = WorkspaceManager::new();
        let id = mgr.create(10, 32, false, false).unwrap();
        let before = *mgr.get(id).unwrap();

        mgr.lock(id).unwrap();
        mgr.unlock(id).unwrap();

        assert_eq!(*mgr.get(id).unwrap(), before);
    }

    #[test]
    fn lock_twice_fails_with_already_locked() {
        let mut mgr = WorkspaceManager::new();
        let id = mgr.create(10, 32, false, false).unwrap();
        mgr.lock(id).unwrap();
        assert!(matches!(mgr.lock(id), Err(CoreError::AlreadyLocked(_))));
    }

    #[test]
    fn rebuild_stats_recomputes_available_space() {
        let mut mgr = WorkspaceManager::new();
        let id = mgr.create(3, 32, false, false).unwrap();
        let mut windows = WindowList::new();
        windows.upsert(WindowInfo::new(WindowId(1), id, Rect::default(), "a".into()));
        windows.upsert(WindowInfo::new(WindowId(2), id, Rect::default(), "b".into()));

        mgr.rebuild_stats(&windows, 3);
        let ws = mgr.get(id).unwrap();
        assert_eq!(ws.window_count, 2);
        assert_eq!(ws.available_space, 1);
    }

    #[test]
    fn exactly_at_capacity_does_not_report_overflow() {
        let mut mgr = WorkspaceManager::new();
        let id = mgr.create(2, 32, false, false).unwrap();
        let mut windows = WindowList::new();
        windows.upsert(WindowInfo::new(WindowId(1), id, Rect::default(), "a".into()));
        windows.upsert(WindowInfo::new(WindowId(2), id, Rect::default(), "b".into()));

        mgr.rebuild_stats(&windows, 2);
        let ws = mgr.get(id).unwrap();
        assert_eq!(ws.window_count, ws.max_windows);
        assert_eq!(ws.available_space, 0);
    }
}
