//! `SIGINT`/`SIGTERM` handling (`spec.md` §5: "a signal handler triggers
//! orderly teardown"). Registered as a `calloop` signal source so shutdown
//! happens on the same thread as the rest of the control loop, with no
//! async-signal-safety concerns.

use calloop::signals::{Signal, Signals};
use calloop::{LoopHandle, LoopSignal};
use tracing::info;

use crate::backend::PlatformBackend;
use crate::manager::WindowManager;

/// Registers a handler that marks the manager for shutdown and stops
/// `event_loop` on `SIGINT` or `SIGTERM`. The caller runs
/// [`WindowManager::shutdown`] itself once `EventLoop::run` returns, after
/// any other pending callbacks (e.g. an in-flight IPC reply) have settled.
pub fn register<B: PlatformBackend + 'static>(
    event_loop: &LoopHandle<'static, WindowManager<B>>,
    loop_signal: LoopSignal,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = Signals::new(&[Signal::SIGINT, Signal::SIGTERM])?;
    event_loop.insert_source(source, move |event, _, _manager| {
        info!(signal = ?event.signal, "received shutdown signal");
        loop_signal.stop();
    })?;
    Ok(())
}
