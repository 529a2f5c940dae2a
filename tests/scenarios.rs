//! End-to-end control-loop scenarios (`spec.md` §8, S1-S6), driven through
//! the public `WindowManager` API against `MockBackend`. All scenarios use
//! `max_windows_per_workspace=3`, `default_padding=10`, `min_window_size=10`,
//! `max_workspaces=32`.

use std::collections::BTreeSet;

use gridflux::backend::mock::MockWindow;
use gridflux::backend::{GestureEvent, GestureKind, MockBackend, PlatformBackend};
use gridflux::geometry::Rect;
use gridflux::ipc;
use gridflux::layout::{Bsp, LayoutEngine};
use gridflux::manager::WindowManager;
use gridflux::window::{WindowId, WindowInfo, WorkspaceId};
use gridflux_config::{Config, ConfigFile, RulesTable};
use gridflux_ipc::Request;

fn scenario_manager() -> (WindowManager<MockBackend>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = Config {
        max_windows_per_workspace: 3,
        max_workspaces: 32,
        default_padding: 10,
        min_window_size: 10,
        border_color: 0x00F4_9D2A,
        enable_borders: true,
        locked_workspaces: BTreeSet::new(),
        rules: RulesTable::default(),
    };
    config.save(&path).unwrap();
    let config_file = ConfigFile::open(path).unwrap();
    (
        WindowManager::new(MockBackend::new(), config_file).unwrap(),
        dir,
    )
}

/// S1. Overflow migration: four new windows land on the lone active
/// workspace; the rebalance phase spills the excess into a new workspace.
#[test]
fn s1_overflow_migration_spills_into_a_new_workspace() {
    let (mut manager, _dir) = scenario_manager();
    for i in 1..=4u64 {
        manager.backend_mut().insert(WindowId(i), MockWindow::new("term"));
    }

    manager.tick();

    assert_eq!(manager.windows().len(), 4);
    let ws1 = manager.workspaces().get(WorkspaceId(1)).unwrap();
    let ws2 = manager.workspaces().get(WorkspaceId(2)).unwrap();
    assert_eq!(ws1.window_count, 3);
    assert_eq!(ws2.window_count, 1);
    for i in 1..=4u64 {
        let workspace = manager.windows().get(WindowId(i)).unwrap().workspace;
        assert!(workspace == WorkspaceId(1) || workspace == WorkspaceId(2));
    }
}

/// S2. Locked workspace rejects move: an IPC `move` onto a locked
/// workspace is refused and the window stays put.
#[test]
fn s2_locked_workspace_rejects_move() {
    let (mut manager, _dir) = scenario_manager();
    manager.backend_mut().insert(WindowId(1), MockWindow::new("term"));
    manager.tick();
    manager.workspaces_mut().create(3, 32, false, true).unwrap();

    let response = ipc::dispatch(
        &mut manager,
        Request::Move {
            handle: 1,
            workspace: 2,
        },
    );

    assert!(!response.status.is_success());
    assert!(response.message_text().contains("locked"));
    assert_eq!(
        manager.windows().get(WindowId(1)).unwrap().workspace,
        WorkspaceId(1)
    );
}

/// S3. Maximize -> unmaximize dock dance.
#[test]
fn s3_maximize_then_unmaximize_dock_dance() {
    let (mut manager, _dir) = scenario_manager();
    manager.backend_mut().insert(WindowId(1), MockWindow::new("term"));
    manager.backend_mut().focused = Some(WindowId(1));
    manager.tick();
    assert!(!manager.workspaces().get(WorkspaceId(1)).unwrap().has_maximized_state);

    manager
        .backend_mut()
        .windows
        .get_mut(&WindowId(1))
        .unwrap()
        .is_maximized = true;
    manager.tick();

    let maximized_ws = manager.windows().get(WindowId(1)).unwrap().workspace;
    assert_ne!(maximized_ws, WorkspaceId(1));
    assert!(manager.workspaces().get(maximized_ws).unwrap().has_maximized_state);
    assert!(manager.backend_mut().dock_hidden);

    manager
        .backend_mut()
        .windows
        .get_mut(&WindowId(1))
        .unwrap()
        .is_maximized = false;
    manager.tick();

    let final_ws = manager.windows().get(WindowId(1)).unwrap().workspace;
    assert!(!manager.workspaces().get(final_ws).unwrap().has_maximized_state);
    assert!(!manager.backend_mut().dock_hidden);
}

/// S4. BSP layout on 3 windows in a 1000x800 bounds, zero padding.
#[test]
fn s4_bsp_layout_splits_into_expected_quadrants() {
    let engine = Bsp::new(0, 10);
    let windows = vec![
        WindowInfo::new(WindowId(1), WorkspaceId(1), Rect::default(), "a".into()),
        WindowInfo::new(WindowId(2), WorkspaceId(1), Rect::default(), "b".into()),
        WindowInfo::new(WindowId(3), WorkspaceId(1), Rect::default(), "c".into()),
    ];
    let mut out: Vec<Rect> = vec![Rect::default(); 3];
    engine.apply_layout(&windows, 3, Rect::new(0, 0, 1000, 800), &mut out);

    assert_eq!(out[0], Rect::new(0, 0, 500, 800));
    assert_eq!(out[1], Rect::new(500, 0, 500, 400));
    assert_eq!(out[2], Rect::new(500, 400, 500, 400));
}

/// S5. Workspace switch transition: focusing a window on another
/// workspace minimizes the previously active one and unminimizes the new.
#[test]
fn s5_focus_change_switches_workspace_and_minimizes_the_other() {
    let (mut manager, _dir) = scenario_manager();
    manager.backend_mut().insert(WindowId(1), MockWindow::new("term"));
    manager.backend_mut().focused = Some(WindowId(1));
    manager.tick();

    manager.backend_mut().insert(WindowId(2), MockWindow::new("editor"));
    manager.tick();
    manager
        .move_window_to_workspace(WindowId(2), WorkspaceId(2), 3, 32)
        .unwrap();

    manager.backend_mut().focused = Some(WindowId(2));
    manager.tick();

    assert!(manager.backend_mut().is_minimized(WindowId(1)));
    assert!(!manager.backend_mut().is_minimized(WindowId(2)));
}

/// S6. Rule-directed placement: a configured `{class, workspace}` rule
/// routes a newly discovered window regardless of the active workspace.
#[test]
fn s6_rule_directed_placement() {
    let (mut manager, _dir) = scenario_manager();
    manager.add_rule("firefox".to_string(), 3).unwrap();

    manager.backend_mut().insert(WindowId(1), MockWindow::new("Firefox"));
    manager.tick();

    assert_eq!(
        manager.windows().get(WindowId(1)).unwrap().workspace,
        WorkspaceId(3)
    );
    assert!(manager.workspaces().get(WorkspaceId(3)).is_some());
}

/// S7. Gesture-driven cycling: a qualifying 3-finger swipe drained during
/// `tick()` (before event handling, `spec.md` §4.E.6) swaps which of two
/// maximized windows is visible.
#[test]
fn s7_gesture_swipe_cycles_the_maximized_window() {
    let (mut manager, _dir) = scenario_manager();
    manager.backend_mut().insert(WindowId(1), MockWindow::new("term"));
    manager.backend_mut().focused = Some(WindowId(1));
    manager.tick();
    manager
        .backend_mut()
        .windows
        .get_mut(&WindowId(1))
        .unwrap()
        .is_maximized = true;
    manager.tick();

    manager.backend_mut().insert(WindowId(2), MockWindow::new("editor"));
    manager.backend_mut().focused = Some(WindowId(2));
    manager.tick();
    manager
        .backend_mut()
        .windows
        .get_mut(&WindowId(2))
        .unwrap()
        .is_maximized = true;
    manager.tick();

    // Maximizing window 2 minimized window 1 in its place; window 2 is
    // the one currently focused and visible. A forward swipe must cycle
    // visibility back to window 1.
    assert!(manager.backend_mut().is_minimized(WindowId(1)));
    assert!(!manager.backend_mut().is_minimized(WindowId(2)));

    manager.backend_mut().gesture_queue.push(GestureEvent {
        kind: GestureKind::SwipeEnd,
        fingers: 3,
        dx: 250.0,
        dy: 0.0,
        total_dx: 250.0,
        total_dy: 0.0,
    });
    manager.tick();

    assert!(!manager.backend_mut().is_minimized(WindowId(1)));
    assert!(manager.backend_mut().is_minimized(WindowId(2)));
}

/// S8. Workspace scan boundary: `watch()` passes the backend a 0-based
/// desktop number, not the raw 1-based `WorkspaceId` (`spec.md` §9). A
/// window hosted on the second desktop is only ever discovered if the
/// scan of `WorkspaceId(2)` actually queries desktop 1, not desktop 2.
#[test]
fn s8_watch_enumerates_workspaces_with_a_0_based_id() {
    let (mut manager, _dir) = scenario_manager();
    manager.backend_mut().insert(WindowId(1), MockWindow::new("term"));
    manager.backend_mut().insert(WindowId(2), {
        let mut w = MockWindow::new("editor");
        w.host_workspace = 1;
        w
    });
    manager.workspaces_mut().ensure(WorkspaceId(2), 3, 32).unwrap();

    manager.tick();

    assert!(manager.windows().contains(WindowId(1)));
    assert!(manager.windows().contains(WindowId(2)));
    assert_eq!(manager.windows().len(), 2);
}

/// S9. Switching to a maximized workspace with more than one window only
/// ever shows the active one; the rest stay minimized (`spec.md` §9).
#[test]
fn s9_maximized_workspace_switch_shows_only_the_active_window() {
    let (mut manager, _dir) = scenario_manager();
    manager.backend_mut().insert(WindowId(1), MockWindow::new("term"));
    manager.backend_mut().focused = Some(WindowId(1));
    manager.tick();

    manager.backend_mut().insert(WindowId(2), MockWindow::new("editor"));
    manager.backend_mut().focused = Some(WindowId(2));
    manager.tick();

    manager
        .backend_mut()
        .windows
        .get_mut(&WindowId(2))
        .unwrap()
        .is_maximized = true;
    manager.tick();
    let maximized_ws = manager.windows().get(WindowId(2)).unwrap().workspace;

    // Joins the maximized workspace alongside window 2 (it's the active
    // workspace with room to spare); a later real switch is what must
    // enforce that only one window at a time is ever shown there.
    manager.backend_mut().insert(WindowId(3), MockWindow::new("chat"));
    manager.tick();
    assert_eq!(manager.windows().get(WindowId(3)).unwrap().workspace, maximized_ws);

    // Switch away, then back: the switch back must bring only window 2
    // forward and leave window 3 minimized.
    manager.backend_mut().focused = Some(WindowId(1));
    manager.tick();
    manager.backend_mut().focused = Some(WindowId(2));
    manager.tick();

    assert!(!manager.backend_mut().is_minimized(WindowId(2)));
    assert!(manager.backend_mut().is_minimized(WindowId(3)));
}

/// S10. Moving a window to the workspace it already occupies is a no-op,
/// even if that workspace is locked or full (`spec.md` §8 idempotence).
#[test]
fn s10_move_to_current_workspace_is_idempotent_even_when_locked() {
    let (mut manager, _dir) = scenario_manager();
    manager.backend_mut().insert(WindowId(1), MockWindow::new("term"));
    manager.tick();
    manager
        .workspaces_mut()
        .get_mut(WorkspaceId(1))
        .unwrap()
        .is_locked = true;

    let response = ipc::dispatch(
        &mut manager,
        Request::Move {
            handle: 1,
            workspace: 1,
        },
    );

    assert!(response.status.is_success());
    assert_eq!(
        manager.windows().get(WindowId(1)).unwrap().workspace,
        WorkspaceId(1)
    );
}
