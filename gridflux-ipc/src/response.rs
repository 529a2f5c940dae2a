//! Response record layout, per `spec.md` §4.G: a `u32` status tag followed
//! by a fixed-size message payload, for a flat [`RESPONSE_LEN`]-byte total.

/// Total size of a response record on the wire.
pub const RESPONSE_LEN: usize = 8192;
/// Size of the message payload following the 4-byte status tag.
pub const MESSAGE_LEN: usize = RESPONSE_LEN - 4;

const _: () = assert!(RESPONSE_LEN == MESSAGE_LEN + 4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ResponseStatus {
    Success = 0,
    ErrorConnection = 1,
    ErrorInvalidCommand = 2,
    ErrorTimeout = 3,
    ErrorPermission = 4,
}

impl ResponseStatus {
    fn from_u32(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(ResponseStatus::Success),
            1 => Some(ResponseStatus::ErrorConnection),
            2 => Some(ResponseStatus::ErrorInvalidCommand),
            3 => Some(ResponseStatus::ErrorTimeout),
            4 => Some(ResponseStatus::ErrorPermission),
            _ => None,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ResponseStatus::Success)
    }
}

/// A decoded response record.
///
/// `message` holds whatever the server wrote into the payload: for plain
/// commands it's a NUL-terminated human-readable string, for `query
/// windows`/`query workspaces` it's a [`super::WindowListFrame`] or
/// [`super::WorkspaceListFrame`] encoding the caller decodes separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: ResponseStatus,
    pub message: Vec<u8>,
}

impl Response {
    pub fn text(status: ResponseStatus, text: &str) -> Self {
        let mut message = text.as_bytes().to_vec();
        message.truncate(MESSAGE_LEN - 1);
        Response { status, message }
    }

    pub fn binary(status: ResponseStatus, payload: Vec<u8>) -> Self {
        let mut message = payload;
        message.truncate(MESSAGE_LEN);
        Response { status, message }
    }

    /// Interprets the message payload as a NUL-terminated UTF-8 string,
    /// lossily. Meaningless for the two binary-framed query responses.
    pub fn message_text(&self) -> String {
        let nul = self
            .message
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.message.len());
        String::from_utf8_lossy(&self.message[..nul]).into_owned()
    }

    pub fn encode(&self) -> [u8; RESPONSE_LEN] {
        let mut buf = [0u8; RESPONSE_LEN];
        buf[0..4].copy_from_slice(&(self.status as u32).to_le_bytes());
        let n = self.message.len().min(MESSAGE_LEN);
        buf[4..4 + n].copy_from_slice(&self.message[..n]);
        buf
    }

    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < RESPONSE_LEN {
            return None;
        }
        let tag = u32::from_le_bytes(buf[0..4].try_into().ok()?);
        let status = ResponseStatus::from_u32(tag)?;
        let message = buf[4..RESPONSE_LEN].to_vec();
        Some(Response { status, message })
    }
}
