use crate::constants::{INODE_SIZE, NO_BLOCK};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InodeKind {
    File,
    Directory,
}

impl InodeKind {
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            1 => Some(Self::File),
            2 => Some(Self::Directory),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_raw(self) -> i32 {
        match self {
            Self::File => 1,
            Self::Directory => 2,
        }
    }
}

/// Inode describes one file: its kind, byte size, and single direct data block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inode {
    pub kind: InodeKind,
    pub size: u32,
    /// Data-relative block number holding the content.
    pub direct_block: Option<u32>,
}

impl Inode {
    #[must_use]
    pub const fn new(kind: InodeKind) -> Self {
        Self {
            kind,
            size: 0,
            direct_block: None,
        }
    }

    /// `decode` parses a `{type, size, direct_block}` record; `None` if any
    /// field holds a value no writer produces.
    #[must_use]
    pub fn decode(buf: &[u8; INODE_SIZE]) -> Option<Self> {
        let field = |i: usize| i32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        let kind = InodeKind::from_raw(field(0))?;
        let size = u32::try_from(field(4)).ok()?;
        let direct_block = match field(8) {
            NO_BLOCK => None,
            raw => Some(u32::try_from(raw).ok()?),
        };
        Some(Self {
            kind,
            size,
            direct_block,
        })
    }

    #[must_use]
    pub fn encode(&self) -> [u8; INODE_SIZE] {
        let mut buf = [0u8; INODE_SIZE];
        let size = i32::try_from(self.size).unwrap_or(i32::MAX);
        let direct = self
            .direct_block
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(NO_BLOCK);
        buf[0..4].copy_from_slice(&self.kind.to_raw().to_le_bytes());
        buf[4..8].copy_from_slice(&size.to_le_bytes());
        buf[8..12].copy_from_slice(&direct.to_le_bytes());
        buf
    }
}
