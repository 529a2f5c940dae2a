//! Fixed-size binary records packed into a response's message payload by
//! `query windows`/`query workspaces`, per `spec.md` §4.G.
//!
//! Encoding is manual little-endian, matching the C layout the original
//! dispatcher wrote directly from its structs (`ipc_command.c`). No
//! `#[repr(C)]`/`bytemuck` transmutation is used here since the two sides
//! of the wire no longer share a struct definition.

use super::response::MESSAGE_LEN;

/// Longest window title/class copied into a record; longer names are
/// truncated, matching the original's fixed `char name[64]` field.
const NAME_LEN: usize = 64;

pub const WINDOW_RECORD_LEN: usize = 8 + 4 + 16 + NAME_LEN + 1 + 3 + 8;
pub const WORKSPACE_RECORD_LEN: usize = 4 + 4 + 4 + 4 + 1 + 1 + 2;

const _: () = assert!(WINDOW_RECORD_LEN == 104);
const _: () = assert!(WORKSPACE_RECORD_LEN == 20);

/// One window, as reported by `query windows`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: u64,
    pub workspace: i32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub name: String,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub last_modified: u64,
}

impl WindowRecord {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        out.extend_from_slice(&self.workspace.to_le_bytes());
        out.extend_from_slice(&self.x.to_le_bytes());
        out.extend_from_slice(&self.y.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        let mut name_buf = [0u8; NAME_LEN];
        let bytes = self.name.as_bytes();
        let n = bytes.len().min(NAME_LEN);
        name_buf[..n].copy_from_slice(&bytes[..n]);
        out.extend_from_slice(&name_buf);
        let flags = (self.is_minimized as u8) | ((self.is_maximized as u8) << 1);
        out.push(flags);
        out.extend_from_slice(&[0u8; 3]);
        out.extend_from_slice(&self.last_modified.to_le_bytes());
    }

    fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < WINDOW_RECORD_LEN {
            return None;
        }
        let id = u64::from_le_bytes(buf[0..8].try_into().ok()?);
        let workspace = i32::from_le_bytes(buf[8..12].try_into().ok()?);
        let x = i32::from_le_bytes(buf[12..16].try_into().ok()?);
        let y = i32::from_le_bytes(buf[16..20].try_into().ok()?);
        let width = i32::from_le_bytes(buf[20..24].try_into().ok()?);
        let height = i32::from_le_bytes(buf[24..28].try_into().ok()?);
        let name_bytes = &buf[28..28 + NAME_LEN];
        let nul = name_bytes.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        let name = String::from_utf8_lossy(&name_bytes[..nul]).into_owned();
        let flags = buf[28 + NAME_LEN];
        let last_modified_off = 28 + NAME_LEN + 1 + 3;
        let last_modified =
            u64::from_le_bytes(buf[last_modified_off..last_modified_off + 8].try_into().ok()?);
        Some(WindowRecord {
            id,
            workspace,
            x,
            y,
            width,
            height,
            name,
            is_minimized: flags & 0x1 != 0,
            is_maximized: flags & 0x2 != 0,
            last_modified,
        })
    }
}

/// One workspace, as reported by `query workspaces`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRecord {
    pub id: i32,
    pub window_count: u32,
    pub max_windows: u32,
    pub available_space: i32,
    pub is_locked: bool,
    pub has_maximized_window: bool,
}

impl WorkspaceRecord {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        out.extend_from_slice(&self.window_count.to_le_bytes());
        out.extend_from_slice(&self.max_windows.to_le_bytes());
        out.extend_from_slice(&self.available_space.to_le_bytes());
        out.push(self.is_locked as u8);
        out.push(self.has_maximized_window as u8);
        out.extend_from_slice(&[0u8; 2]);
    }

    fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < WORKSPACE_RECORD_LEN {
            return None;
        }
        Some(WorkspaceRecord {
            id: i32::from_le_bytes(buf[0..4].try_into().ok()?),
            window_count: u32::from_le_bytes(buf[4..8].try_into().ok()?),
            max_windows: u32::from_le_bytes(buf[8..12].try_into().ok()?),
            available_space: i32::from_le_bytes(buf[12..16].try_into().ok()?),
            is_locked: buf[16] != 0,
            has_maximized_window: buf[17] != 0,
        })
    }
}

/// A list of [`WindowRecord`]s packed for the wire, with a `u32` count
/// header. Truncates (rather than erroring) when more records than fit in
/// [`MESSAGE_LEN`] are supplied — the caller should prefer narrowing the
/// query (e.g. by workspace) over relying on truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowListFrame {
    pub records: Vec<WindowRecord>,
    pub truncated: bool,
}

impl WindowListFrame {
    const HEADER_LEN: usize = 4;
    const CAPACITY: usize = (MESSAGE_LEN - Self::HEADER_LEN) / WINDOW_RECORD_LEN;

    pub fn new(mut records: Vec<WindowRecord>) -> Self {
        let truncated = records.len() > Self::CAPACITY;
        records.truncate(Self::CAPACITY);
        WindowListFrame { records, truncated }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::HEADER_LEN + self.records.len() * WINDOW_RECORD_LEN);
        out.extend_from_slice(&(self.records.len() as u32).to_le_bytes());
        for record in &self.records {
            record.encode(&mut out);
        }
        out
    }

    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::HEADER_LEN {
            return None;
        }
        let count = u32::from_le_bytes(buf[0..4].try_into().ok()?) as usize;
        let mut records = Vec::with_capacity(count);
        let mut offset = Self::HEADER_LEN;
        for _ in 0..count {
            let record = WindowRecord::decode(buf.get(offset..)?)?;
            records.push(record);
            offset += WINDOW_RECORD_LEN;
        }
        Some(WindowListFrame {
            records,
            truncated: false,
        })
    }
}

/// A list of [`WorkspaceRecord`]s packed for the wire; see [`WindowListFrame`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceListFrame {
    pub records: Vec<WorkspaceRecord>,
    pub truncated: bool,
}

impl WorkspaceListFrame {
    const HEADER_LEN: usize = 4;
    const CAPACITY: usize = (MESSAGE_LEN - Self::HEADER_LEN) / WORKSPACE_RECORD_LEN;

    pub fn new(mut records: Vec<WorkspaceRecord>) -> Self {
        let truncated = records.len() > Self::CAPACITY;
        records.truncate(Self::CAPACITY);
        WorkspaceListFrame { records, truncated }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(Self::HEADER_LEN + self.records.len() * WORKSPACE_RECORD_LEN);
        out.extend_from_slice(&(self.records.len() as u32).to_le_bytes());
        for record in &self.records {
            record.encode(&mut out);
        }
        out
    }

    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::HEADER_LEN {
            return None;
        }
        let count = u32::from_le_bytes(buf[0..4].try_into().ok()?) as usize;
        let mut records = Vec::with_capacity(count);
        let mut offset = Self::HEADER_LEN;
        for _ in 0..count {
            let record = WorkspaceRecord::decode(buf.get(offset..)?)?;
            records.push(record);
            offset += WORKSPACE_RECORD_LEN;
        }
        Some(WorkspaceListFrame {
            records,
            truncated: false,
        })
    }
}
