//! Core error kinds (`spec.md` §7). Backend failures within a tick are
//! logged and swallowed by the caller rather than propagated here — this
//! type models the failures that are surfaced to an IPC client or to the
//! control loop's own logging, not every transient backend hiccup.

use crate::window::WorkspaceId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("memory allocation failed")]
    MemoryAllocation,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("platform error: {0}")]
    PlatformError(String),
    #[error("window not found")]
    WindowNotFound,
    #[error("could not connect to the display server")]
    DisplayConnection,
    #[error("initialization failed: {0}")]
    InitializationFailed(String),
    #[error("workspace {0} is locked")]
    WorkspaceLocked(WorkspaceId),
    #[error("workspace {0} is full")]
    WorkspaceFull(WorkspaceId),
    #[error("workspace {0} is already locked")]
    AlreadyLocked(WorkspaceId),
    #[error("workspace {0} is already unlocked")]
    AlreadyUnlocked(WorkspaceId),
    #[error("workspace {0} is maximized")]
    WorkspaceMaximized(WorkspaceId),
}

pub type CoreResult<T> = Result<T, CoreError>;
