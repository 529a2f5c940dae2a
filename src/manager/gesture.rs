//! Gesture tick phase (`spec.md` §4.E.6): three-finger swipe cycles the
//! focused window among the set of maximized windows.

use crate::backend::{GestureKind, PlatformBackend};
use crate::window::WindowId;

use super::WindowManager;

/// Accumulated horizontal travel a swipe must exceed before it counts
/// (`spec.md` §4.E.6, fixed threshold).
const SWIPE_THRESHOLD_PX: f32 = 200.0;
const SWIPE_FINGERS: u32 = 3;

impl<B: PlatformBackend> WindowManager<B> {
    pub(crate) fn drain_gestures(&mut self) {
        while let Some(event) = self.backend.gesture_poll() {
            if event.kind != GestureKind::SwipeEnd {
                continue;
            }
            if event.fingers != SWIPE_FINGERS {
                continue;
            }
            if event.total_dx.abs() <= SWIPE_THRESHOLD_PX {
                continue;
            }
            self.cycle_maximized_window(event.total_dx > 0.0);
        }
    }

    fn cycle_maximized_window(&mut self, forward: bool) {
        let maximized: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|w| w.is_maximized)
            .map(|w| w.id)
            .collect();
        if maximized.len() < 2 {
            return;
        }

        let Some(focused) = self.backend.get_focused(self.display) else {
            return;
        };
        let Some(current_index) = maximized.iter().position(|&id| id == focused) else {
            return;
        };

        let len = maximized.len();
        let next_index = if forward {
            (current_index + 1) % len
        } else {
            (current_index + len - 1) % len
        };
        let neighbor = maximized[next_index];
        if neighbor == focused {
            return;
        }

        if self.backend.minimize(self.display, focused).is_ok() {
            if let Some(info) = self.windows.get_mut(focused) {
                info.is_minimized = true;
            }
        }
        if self.backend.unminimize(self.display, neighbor).is_ok() {
            if let Some(info) = self.windows.get_mut(neighbor) {
                info.is_minimized = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockWindow;
    use crate::backend::{GestureEvent, MockBackend};
    use gridflux_config::ConfigFile;

    fn manager() -> (WindowManager<MockBackend>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::open(dir.path().join("config.json")).unwrap();
        (WindowManager::new(MockBackend::new(), config).unwrap(), dir)
    }

    fn swipe(total_dx: f32, fingers: u32, kind: GestureKind) -> GestureEvent {
        GestureEvent {
            kind,
            fingers,
            dx: total_dx,
            dy: 0.0,
            total_dx,
            total_dy: 0.0,
        }
    }

    #[test]
    fn a_qualifying_swipe_cycles_to_the_next_maximized_window() {
        let (mut manager, _dir) = manager();
        manager.backend.insert(WindowId(1), MockWindow::new("a"));
        manager.backend.insert(WindowId(2), MockWindow::new("b"));
        manager.watch();
        manager.windows.get_mut(WindowId(1)).unwrap().is_maximized = true;
        manager.windows.get_mut(WindowId(2)).unwrap().is_maximized = true;
        manager.backend.focused = Some(WindowId(1));

        manager.backend.gesture_queue.push(swipe(250.0, 3, GestureKind::SwipeEnd));
        manager.drain_gestures();

        assert!(manager.backend.is_minimized(WindowId(1)));
        assert!(!manager.backend.is_minimized(WindowId(2)));
    }

    #[test]
    fn a_swipe_under_threshold_is_ignored() {
        let (mut manager, _dir) = manager();
        manager.backend.insert(WindowId(1), MockWindow::new("a"));
        manager.backend.insert(WindowId(2), MockWindow::new("b"));
        manager.watch();
        manager.windows.get_mut(WindowId(1)).unwrap().is_maximized = true;
        manager.windows.get_mut(WindowId(2)).unwrap().is_maximized = true;
        manager.backend.focused = Some(WindowId(1));

        manager.backend.gesture_queue.push(swipe(50.0, 3, GestureKind::SwipeEnd));
        manager.drain_gestures();

        assert!(!manager.backend.is_minimized(WindowId(1)));
    }

    #[test]
    fn a_two_finger_swipe_is_ignored() {
        let (mut manager, _dir) = manager();
        manager.backend.insert(WindowId(1), MockWindow::new("a"));
        manager.backend.insert(WindowId(2), MockWindow::new("b"));
        manager.watch();
        manager.windows.get_mut(WindowId(1)).unwrap().is_maximized = true;
        manager.windows.get_mut(WindowId(2)).unwrap().is_maximized = true;
        manager.backend.focused = Some(WindowId(1));

        manager.backend.gesture_queue.push(swipe(300.0, 2, GestureKind::SwipeEnd));
        manager.drain_gestures();

        assert!(!manager.backend.is_minimized(WindowId(1)));
    }
}
