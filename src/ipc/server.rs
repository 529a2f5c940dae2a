//! Unix-domain socket accept loop: a [`Generic`] source over a
//! non-blocking listener, dispatched by the event loop rather than polled
//! from the tick.
//!
//! Mirrors `gf_ipc_server_create`/`gf_ipc_server_process`
//! (`platform/unix/ipc.c`): mode 0600, `SO_PEERCRED` verified against the
//! caller's own UID, 5-second send/receive timeouts.

use std::io::{Read, Write};
use std::os::fd::AsRawFd;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::time::Duration;

use calloop::generic::Generic;
use calloop::{Interest, LoopHandle, Mode, PostAction};
use gridflux_ipc::{IpcError, Request, Response, ResponseStatus, REQUEST_MAX_LEN};
use tracing::warn;

use crate::backend::PlatformBackend;
use crate::manager::WindowManager;

/// Binds the server socket, per `spec.md` §6.2: removes any stale socket
/// file left by a prior crashed instance, binds, and chmods to 0600.
pub fn bind(path: &Path) -> std::io::Result<UnixListener> {
    let _ = std::fs::remove_file(path);
    let listener = UnixListener::bind(path)?;
    listener.set_nonblocking(true)?;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(listener)
}

/// Registers the listener with `event_loop`, dispatching each accepted
/// connection through `dispatch` against `manager`.
pub fn register<B: PlatformBackend + 'static>(
    event_loop: &LoopHandle<'static, WindowManager<B>>,
    listener: UnixListener,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = Generic::new(listener, Interest::READ, Mode::Level);
    event_loop.insert_source(source, |_, listener, manager| {
        loop {
            match listener.accept() {
                Ok((stream, _)) => handle_connection(stream, manager),
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => break,
                Err(err) => {
                    warn!(%err, "ipc accept failed");
                    break;
                }
            }
        }
        Ok(PostAction::Continue)
    })?;
    Ok(())
}

fn handle_connection<B: PlatformBackend>(stream: UnixStream, manager: &mut WindowManager<B>) {
    if !peer_is_own_uid(&stream) {
        return;
    }
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    match read_and_dispatch(stream.try_clone().expect("dup socket fd"), manager) {
        Ok(()) => {}
        Err(err) => warn!(%err, "ipc request failed"),
    }
}

fn read_and_dispatch<B: PlatformBackend>(
    mut stream: UnixStream,
    manager: &mut WindowManager<B>,
) -> Result<(), IpcError> {
    let mut buf = [0u8; REQUEST_MAX_LEN];
    let n = stream.read(&mut buf)?;
    let line = std::str::from_utf8(&buf[..n]).unwrap_or_default();

    let response = match Request::parse(line.trim()) {
        Ok(request) => super::dispatch(manager, request),
        Err(err) => Response::text(ResponseStatus::ErrorInvalidCommand, &err.to_string()),
    };
    stream.write_all(&response.encode())?;
    Ok(())
}

fn peer_is_own_uid(stream: &UnixStream) -> bool {
    let fd = stream.as_raw_fd();
    let mut cred = libc::ucred {
        pid: 0,
        uid: 0,
        gid: 0,
    };
    let mut len = std::mem::size_of::<libc::ucred>() as libc::socklen_t;
    let ok = unsafe {
        libc::getsockopt(
            fd,
            libc::SOL_SOCKET,
            libc::SO_PEERCRED,
            &mut cred as *mut _ as *mut libc::c_void,
            &mut len,
        )
    };
    if ok != 0 {
        return false;
    }
    cred.uid == unsafe { libc::getuid() }
}

/// Removes the socket file on shutdown (`spec.md` §5: "destroy the IPC
/// endpoint").
pub fn cleanup(path: &Path) {
    let _ = std::fs::remove_file(path);
}

pub fn default_path() -> PathBuf {
    gridflux_ipc::default_socket_path()
}
