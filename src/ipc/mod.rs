//! IPC command dispatcher (`spec.md` §4.G). Pure with respect to I/O: takes
//! a decoded [`Request`] and the manager's state, returns a [`Response`] to
//! encode onto the wire. The accept loop that drives this lives in
//! [`server`].

pub mod server;

use gridflux_ipc::{
    Request, Response, ResponseStatus, WindowListFrame, WindowRecord, WorkspaceListFrame,
    WorkspaceRecord,
};

use crate::backend::PlatformBackend;
use crate::error::CoreError;
use crate::manager::WindowManager;
use crate::window::WorkspaceId;

/// Dispatches one decoded request against the manager's current state,
/// mutating it where the command calls for a write (`move`, `lock`,
/// `unlock`, `toggle-borders`, `rule add`/`remove`).
pub fn dispatch<B: PlatformBackend>(manager: &mut WindowManager<B>, request: Request) -> Response {
    match request {
        Request::QueryWindows { workspace } => query_windows(manager, workspace),
        Request::QueryWorkspaces => query_workspaces(manager),
        Request::QueryCount { workspace } => query_count(manager, workspace),
        Request::QueryApps => query_apps(manager),
        Request::Move { handle, workspace } => move_window(manager, handle, workspace),
        Request::Lock { workspace } => lock_workspace(manager, workspace),
        Request::Unlock { workspace } => unlock_workspace(manager, workspace),
        Request::ToggleBorders => toggle_borders(manager),
        Request::RuleAdd { class, workspace } => rule_add(manager, class, workspace),
        Request::RuleRemove { class } => rule_remove(manager, class),
    }
}

fn query_windows<B: PlatformBackend>(manager: &WindowManager<B>, workspace: Option<i32>) -> Response {
    let records: Vec<WindowRecord> = manager
        .windows()
        .iter()
        .filter(|w| match workspace {
            Some(ws) => w.workspace.0 == ws,
            None => true,
        })
        .map(|w| WindowRecord {
            id: w.id.0,
            workspace: w.workspace.0,
            x: w.geometry.x,
            y: w.geometry.y,
            width: w.geometry.w as i32,
            height: w.geometry.h as i32,
            name: w.name.clone(),
            is_minimized: w.is_minimized,
            is_maximized: w.is_maximized,
            last_modified: w
                .last_modified
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        })
        .collect();
    let frame = WindowListFrame::new(records);
    Response::binary(ResponseStatus::Success, frame.encode())
}

fn query_workspaces<B: PlatformBackend>(manager: &WindowManager<B>) -> Response {
    let records: Vec<WorkspaceRecord> = manager
        .workspaces()
        .list()
        .iter()
        .map(|w| WorkspaceRecord {
            id: w.id.0,
            window_count: w.window_count,
            max_windows: w.max_windows,
            available_space: w.available_space,
            is_locked: w.is_locked,
            has_maximized_window: w.has_maximized_state,
        })
        .collect();
    let frame = WorkspaceListFrame::new(records);
    Response::binary(ResponseStatus::Success, frame.encode())
}

fn query_count<B: PlatformBackend>(manager: &WindowManager<B>, workspace: Option<i32>) -> Response {
    match workspace {
        Some(ws) => {
            let n = manager.windows().iter().filter(|w| w.workspace.0 == ws).count();
            Response::text(ResponseStatus::Success, &format!("Workspace {ws} has {n} windows"))
        }
        None => {
            let n = manager.windows().len();
            Response::text(ResponseStatus::Success, &format!("Total windows: {n}"))
        }
    }
}

fn query_apps<B: PlatformBackend>(manager: &WindowManager<B>) -> Response {
    let text = manager
        .windows()
        .iter()
        .map(|w| w.class.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Response::text(ResponseStatus::Success, &text)
}

fn move_window<B: PlatformBackend>(manager: &mut WindowManager<B>, handle: u64, workspace: i32) -> Response {
    let id = crate::window::WindowId(handle);
    if !manager.windows().contains(id) {
        return Response::text(ResponseStatus::ErrorInvalidCommand, "not found");
    }
    if manager.windows().get(id).map(|w| w.is_maximized).unwrap_or(false) {
        return Response::text(ResponseStatus::ErrorInvalidCommand, "is maximized");
    }

    let max_per_ws = manager.config().max_windows_per_workspace;
    let max_workspaces = manager.config().max_workspaces;
    match manager.move_window_to_workspace(id, WorkspaceId(workspace), max_per_ws, max_workspaces) {
        Ok(()) => Response::text(
            ResponseStatus::Success,
            &format!("Moved window {id} to workspace {workspace}"),
        ),
        Err(CoreError::WorkspaceLocked(_)) => Response::text(ResponseStatus::ErrorInvalidCommand, "locked"),
        Err(CoreError::WorkspaceFull(_)) => Response::text(ResponseStatus::ErrorInvalidCommand, "full"),
        Err(_) => Response::text(ResponseStatus::ErrorInvalidCommand, "not found"),
    }
}

fn lock_workspace<B: PlatformBackend>(manager: &mut WindowManager<B>, workspace: i32) -> Response {
    match manager.workspaces_mut().lock(WorkspaceId(workspace)) {
        Ok(()) => {
            let remaining = manager
                .workspaces()
                .get(WorkspaceId(workspace))
                .map(|w| w.window_count)
                .unwrap_or(0);
            Response::text(
                ResponseStatus::Success,
                &format!("Locked workspace {workspace} ({remaining} windows remain)"),
            )
        }
        Err(CoreError::AlreadyLocked(_)) => Response::text(ResponseStatus::ErrorInvalidCommand, "already locked"),
        Err(_) => Response::text(ResponseStatus::ErrorInvalidCommand, "invalid id"),
    }
}

fn unlock_workspace<B: PlatformBackend>(manager: &mut WindowManager<B>, workspace: i32) -> Response {
    match manager.workspaces_mut().unlock(WorkspaceId(workspace)) {
        Ok(()) => {
            let available = manager
                .workspaces()
                .get(WorkspaceId(workspace))
                .map(|w| w.available_space)
                .unwrap_or(0);
            Response::text(
                ResponseStatus::Success,
                &format!("Unlocked workspace {workspace} ({available} slots available)"),
            )
        }
        Err(CoreError::AlreadyUnlocked(_)) => {
            Response::text(ResponseStatus::ErrorInvalidCommand, "already unlocked")
        }
        Err(_) => Response::text(ResponseStatus::ErrorInvalidCommand, "invalid id"),
    }
}

fn toggle_borders<B: PlatformBackend>(manager: &mut WindowManager<B>) -> Response {
    let enabled = manager.toggle_borders();
    let word = if enabled { "enabled" } else { "disabled" };
    Response::text(ResponseStatus::Success, &format!("Borders {word}"))
}

fn rule_add<B: PlatformBackend>(manager: &mut WindowManager<B>, class: String, workspace: i32) -> Response {
    match manager.add_rule(class.clone(), workspace) {
        Ok(()) => Response::text(
            ResponseStatus::Success,
            &format!("Added rule {class} -> workspace {workspace}"),
        ),
        Err(_) => Response::text(ResponseStatus::ErrorInvalidCommand, "table full"),
    }
}

fn rule_remove<B: PlatformBackend>(manager: &mut WindowManager<B>, class: String) -> Response {
    match manager.remove_rule(&class) {
        Ok(()) => Response::text(ResponseStatus::Success, &format!("Removed rule {class}")),
        Err(_) => Response::text(ResponseStatus::ErrorInvalidCommand, "not found"),
    }
}
