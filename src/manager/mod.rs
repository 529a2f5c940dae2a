//! The control loop (`spec.md` §4.E): discovery, transition detection,
//! workspace assignment, overflow migration, layout dispatch,
//! focus/minimize coordination. Each tick phase is implemented as a
//! separate `impl WindowManager` block in its own file, following the
//! teacher's convention of splitting a large stateful type's behavior
//! across files by concern rather than nesting it all in one module.

mod commands;
mod events;
mod gesture;
mod keymap;
mod prune;
mod reload;
mod rebalance;
mod tiling;
mod watch;

use std::time::{Duration, Instant};

use gridflux_config::ConfigFile;
use tracing::{info, warn};

use crate::backend::{DisplayHandle, PlatformBackend};
use crate::collections::WindowList;
use crate::error::CoreResult;
use crate::window::WorkspaceId;
use crate::workspace::WorkspaceManager;

/// How often `prune` is allowed to run (`spec.md` §4.E.9).
pub const PRUNE_INTERVAL: Duration = Duration::from_secs(1);
/// The tick sleep interval (`spec.md` §5).
pub const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// The single-threaded control loop's state, owning the window list,
/// workspace list, config snapshot, and backend handle (`spec.md` §5:
/// "the window list, workspace list, and config snapshot are owned solely
/// by the control loop").
pub struct WindowManager<B: PlatformBackend> {
    pub(crate) backend: B,
    pub(crate) display: DisplayHandle,
    pub(crate) config: ConfigFile,
    pub(crate) windows: WindowList,
    pub(crate) workspaces: WorkspaceManager,
    pub(crate) last_active_workspace: WorkspaceId,
    pub(crate) last_active_window: u64,
    pub(crate) dock_hidden: bool,
    last_prune: Option<Instant>,
}

impl<B: PlatformBackend> WindowManager<B> {
    pub fn new(mut backend: B, config: ConfigFile) -> CoreResult<Self> {
        let display = backend.init()?;
        backend.keymap_init()?;
        backend.gesture_init()?;
        Ok(WindowManager {
            backend,
            display,
            config,
            windows: WindowList::new(),
            workspaces: WorkspaceManager::new(),
            last_active_workspace: WorkspaceId::NONE,
            last_active_window: 0,
            dock_hidden: false,
            last_prune: None,
        })
    }

    pub fn windows(&self) -> &WindowList {
        &self.windows
    }

    /// Direct backend access, for driving scenarios against
    /// [`crate::backend::MockBackend`] from outside the crate (the
    /// integration tests under `tests/`); the control loop itself never
    /// needs this, since every tick phase already holds `&mut self`.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn workspaces(&self) -> &WorkspaceManager {
        &self.workspaces
    }

    pub fn config(&self) -> &gridflux_config::Config {
        self.config.config()
    }

    /// Runs one full tick in the contractual order (`spec.md` §4.E):
    /// reload-config → watch → drain-gestures → apply-layout →
    /// rebalance-overflow → handle-events → drain-keymap → prune. Gestures
    /// drain right after `watch`, before any event handling (`spec.md`
    /// §4.E.6). IPC drain is driven separately by the event-loop
    /// integration in [`crate::ipc`], which calls [`crate::ipc::dispatch`]
    /// directly on accepted connections rather than through this method.
    pub fn tick(&mut self) {
        self.reload_config();
        self.watch();
        self.drain_gestures();
        self.apply_layout();
        self.rebalance_overflow();
        self.handle_events();
        self.drain_keymap();
        self.prune_if_due();
    }

    fn prune_if_due(&mut self) {
        let due = match self.last_prune {
            None => true,
            Some(last) => last.elapsed() >= PRUNE_INTERVAL,
        };
        if due {
            self.prune();
            self.last_prune = Some(Instant::now());
        }
    }

    /// Orderly teardown on `SIGINT`/`SIGTERM` (`spec.md` §5): restore the
    /// dock if hidden, clean up the backend, free data.
    pub fn shutdown(&mut self) {
        info!("shutting down gridflux core");
        if self.dock_hidden {
            self.backend.dock_restore();
        }
        self.backend.border_cleanup();
        self.backend.keymap_cleanup();
        self.backend.gesture_cleanup();
        self.backend.cleanup(self.display);
    }

    pub(crate) fn log_backend_error(&self, what: &str, err: impl std::fmt::Display) {
        warn!(what, %err, "backend call failed; skipping for this tick");
    }

    /// Recounts every workspace from the window list (`spec.md` §4.D).
    /// Called at the end of every phase that adds, removes, or reassigns
    /// windows, so later phases in the same tick see accurate counts.
    pub(crate) fn rebuild_workspace_stats(&mut self) {
        let max_per_ws = self.config.config().max_windows_per_workspace;
        self.workspaces.rebuild_stats(&self.windows, max_per_ws);
    }
}
