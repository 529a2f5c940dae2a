//! Wire protocol shared between the GridFlux server and its clients.
//!
//! A request is ASCII text up to [`REQUEST_MAX_LEN`] bytes; a response is a
//! fixed [`RESPONSE_LEN`]-byte record of a `status` tag followed by a
//! message payload. Two commands (`query windows`, `query workspaces`)
//! pack binary list frames into that same message payload instead of text.
//! This is deliberately fragile across language/ABI boundaries — see
//! `spec.md` §4.G — and must be versioned if the record layouts change.

mod client;
mod frame;
mod request;
mod response;

pub use client::{connect, default_socket_path, send_request};
pub use frame::{
    WindowRecord, WorkspaceListFrame, WorkspaceRecord, WINDOW_RECORD_LEN, WORKSPACE_RECORD_LEN,
};
pub use request::{ParseRequestError, Request};
pub use response::{Response, ResponseStatus, MESSAGE_LEN, RESPONSE_LEN};

pub use frame::WindowListFrame;

/// Maximum size of a request line, per `spec.md` §6.2.
pub const REQUEST_MAX_LEN: usize = 8 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("i/o error talking to gridflux: {0}")]
    Io(#[from] std::io::Error),
    #[error("request exceeds {REQUEST_MAX_LEN} bytes")]
    RequestTooLong,
    #[error("malformed response frame")]
    MalformedResponse,
    #[error(transparent)]
    Parse(#[from] ParseRequestError),
}
