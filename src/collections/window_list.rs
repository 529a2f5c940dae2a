use crate::window::{WindowId, WindowInfo, WorkspaceId};

/// Insertion-ordered window records, keyed by [`WindowId`]. Adding a
/// duplicate ID updates in place; removal is swap-with-last, so insertion
/// order is not preserved across removals (`spec.md` §4.B) — callers that
/// need stable order must key by `WindowId` rather than rely on position.
#[derive(Debug, Default)]
pub struct WindowList {
    windows: Vec<WindowInfo>,
}

impl WindowList {
    pub fn new() -> Self {
        WindowList::default()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowInfo> {
        self.windows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowInfo> {
        self.windows.iter_mut()
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowInfo> {
        self.index_of(id).map(|i| &self.windows[i])
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowInfo> {
        let i = self.index_of(id)?;
        Some(&mut self.windows[i])
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.index_of(id).is_some()
    }

    /// Inserts a new window or, if `id` already exists, overwrites its
    /// record in place.
    pub fn upsert(&mut self, window: WindowInfo) {
        match self.index_of(window.id) {
            Some(i) => self.windows[i] = window,
            None => self.windows.push(window),
        }
    }

    /// Removes a window by ID via swap-remove. Returns the removed record.
    pub fn remove(&mut self, id: WindowId) -> Option<WindowInfo> {
        let i = self.index_of(id)?;
        Some(self.windows.swap_remove(i))
    }

    /// Windows belonging to `workspace`, in the reverse of insertion
    /// order — used as a stand-in for "most-recently-added first"
    /// (`spec.md` §4.B).
    pub fn get_by_workspace(&self, workspace: WorkspaceId) -> Vec<&WindowInfo> {
        self.windows
            .iter()
            .filter(|w| w.workspace == workspace)
            .rev()
            .collect()
    }

    /// Marks every window of `workspace` as needing a geometry update on
    /// the next layout tick — the only legal way to cause that
    /// (`spec.md` §4.B).
    pub fn mark_workspace_dirty(&mut self, workspace: WorkspaceId) {
        for window in self.windows.iter_mut().filter(|w| w.workspace == workspace) {
            window.needs_update = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn window(id: u64, workspace: i32) -> WindowInfo {
        WindowInfo::new(
            WindowId(id),
            WorkspaceId(workspace),
            Rect::new(0, 0, 100, 100),
            "test".into(),
        )
    }

    #[test]
    fn upsert_inserts_then_updates_in_place() {
        let mut list = WindowList::new();
        list.upsert(window(1, 1));
        assert_eq!(list.len(), 1);

        let mut updated = window(1, 2);
        updated.name = "renamed".into();
        list.upsert(updated);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(WindowId(1)).unwrap().workspace, WorkspaceId(2));
    }

    #[test]
    fn remove_is_swap_with_last() {
        let mut list = WindowList::new();
        list.upsert(window(1, 1));
        list.upsert(window(2, 1));
        list.upsert(window(3, 1));

        let removed = list.remove(WindowId(1)).unwrap();
        assert_eq!(removed.id, WindowId(1));
        assert_eq!(list.len(), 2);
        assert!(list.contains(WindowId(3)));
        assert!(list.contains(WindowId(2)));
    }

    #[test]
    fn get_by_workspace_is_reverse_insertion_order() {
        let mut list = WindowList::new();
        list.upsert(window(1, 1));
        list.upsert(window(2, 1));
        list.upsert(window(3, 1));

        let ws1: Vec<_> = list.get_by_workspace(WorkspaceId(1)).iter().map(|w| w.id).collect();
        assert_eq!(ws1, vec![WindowId(3), WindowId(2), WindowId(1)]);
    }

    #[test]
    fn mark_workspace_dirty_only_touches_that_workspace() {
        let mut list = WindowList::new();
        list.upsert({
            let mut w = window(1, 1);
            w.needs_update = false;
            w
        });
        list.upsert({
            let mut w = window(2, 2);
            w.needs_update = false;
            w
        });

        list.mark_workspace_dirty(WorkspaceId(1));
        assert!(list.get(WindowId(1)).unwrap().needs_update);
        assert!(!list.get(WindowId(2)).unwrap().needs_update);
    }
}
