//! Client-side half of the transport: a blocking `UnixStream` round trip,
//! used by `gridflux-cli` and by tests. The server's half lives in the
//! `gridflux` crate, where it's driven by the event loop instead.

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use crate::response::{Response, RESPONSE_LEN};
use crate::{IpcError, Request, REQUEST_MAX_LEN};

/// Resolves the socket path the server listens on, per `spec.md` §6.2:
/// `$XDG_RUNTIME_DIR/gridflux.sock`, falling back to
/// `/tmp/gridflux_<uid><display>-socket` when `XDG_RUNTIME_DIR` isn't set.
pub fn default_socket_path() -> PathBuf {
    if let Ok(dir) = std::env::var("XDG_RUNTIME_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir).join("gridflux.sock");
        }
    }
    let uid = unsafe { libc::getuid() };
    let display = std::env::var("DISPLAY").unwrap_or_default();
    PathBuf::from(format!("/tmp/gridflux_{uid}{display}-socket"))
}

/// Opens a connection to the server at `path`.
pub fn connect(path: &std::path::Path) -> Result<UnixStream, IpcError> {
    Ok(UnixStream::connect(path)?)
}

/// Sends a single request and reads back the fixed-size response.
///
/// Each call is its own connection, matching the original's
/// connect-send-receive-disconnect cycle (`ipc_client.c`) rather than a
/// persistent session.
pub fn send_request(stream: &mut UnixStream, request: &Request) -> Result<Response, IpcError> {
    let line = request.to_string();
    if line.len() > REQUEST_MAX_LEN {
        return Err(IpcError::RequestTooLong);
    }
    stream.write_all(line.as_bytes())?;
    stream.flush()?;

    let mut buf = [0u8; RESPONSE_LEN];
    stream.read_exact(&mut buf)?;
    Response::decode(&buf).ok_or(IpcError::MalformedResponse)
}
