//! Directory entry records and the root directory block codec.
//!
//! The root block is `[count:i32][slot; MAX_ROOT_ENTRIES]`, each slot being
//! `{inode_id:i32, type:i32, name:[u8; NAME_LEN]}`.

use std::borrow::Cow;

use crate::constants::{
    BLOCK_SIZE, DIR_ENTRY_SIZE, DIR_HEADER_SIZE, MAX_ROOT_ENTRIES, NAME_LEN, TOTAL_INODES,
};
use crate::device::Block;

use super::inode::InodeKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub inode_id: u32,
    pub kind: InodeKind,
    /// Stored bytes without the NUL terminator; not necessarily UTF-8.
    pub name: Vec<u8>,
}

/// `is_valid_name` reports whether `name` can be stored NUL-terminated in a slot.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    is_valid_name_bytes(name.as_bytes())
}

fn is_valid_name_bytes(name: &[u8]) -> bool {
    !name.is_empty() && name.len() < NAME_LEN && !name.contains(&0)
}

impl DirEntry {
    /// `decode` returns the entry held by a slot, or `None` for a free or
    /// malformed slot.
    #[must_use]
    pub fn decode(slot: &[u8]) -> Option<Self> {
        let field = |i: usize| i32::from_le_bytes([slot[i], slot[i + 1], slot[i + 2], slot[i + 3]]);
        let name_buf = &slot[8..8 + NAME_LEN];
        let end = name_buf.iter().position(|&b| b == 0)?;
        if end == 0 {
            return None;
        }
        let kind = InodeKind::from_raw(field(4))?;
        let inode_id = u32::try_from(field(0)).ok().filter(|&id| id < TOTAL_INODES)?;
        Some(Self {
            inode_id,
            kind,
            name: name_buf[..end].to_vec(),
        })
    }

    /// Name for display; invalid UTF-8 is replaced.
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// # Panics
    /// Panics if the name is empty, holds a NUL, or leaves no room for the
    /// terminator.
    #[must_use]
    pub fn encode(&self) -> [u8; DIR_ENTRY_SIZE] {
        assert!(
            is_valid_name_bytes(&self.name),
            "directory entry name of {} bytes cannot be stored",
            self.name.len()
        );
        let mut slot = [0u8; DIR_ENTRY_SIZE];
        let id = i32::try_from(self.inode_id).unwrap_or(-1);
        slot[0..4].copy_from_slice(&id.to_le_bytes());
        slot[4..8].copy_from_slice(&self.kind.to_raw().to_le_bytes());
        slot[8..8 + self.name.len()].copy_from_slice(&self.name);
        slot
    }
}

fn free_slot() -> [u8; DIR_ENTRY_SIZE] {
    let mut slot = [0u8; DIR_ENTRY_SIZE];
    slot[0..4].copy_from_slice(&(-1i32).to_le_bytes());
    slot[4..8].copy_from_slice(&(-1i32).to_le_bytes());
    slot
}

fn slot_range(i: usize) -> std::ops::Range<usize> {
    let start = DIR_HEADER_SIZE + i * DIR_ENTRY_SIZE;
    start..start + DIR_ENTRY_SIZE
}

/// `empty_root_block` is the freshly formatted root: count 0, every slot free.
#[must_use]
pub fn empty_root_block() -> Block {
    let mut buf = [0u8; BLOCK_SIZE];
    let free = free_slot();
    for i in 0..MAX_ROOT_ENTRIES {
        buf[slot_range(i)].copy_from_slice(&free);
    }
    buf
}

/// `encode_root_block` serializes the whole cache.
///
/// # Panics
/// Panics if `entries` holds more than `MAX_ROOT_ENTRIES` entries.
#[must_use]
pub fn encode_root_block(entries: &[DirEntry]) -> Block {
    assert!(
        entries.len() <= MAX_ROOT_ENTRIES,
        "root directory holds {} entries, limit is {MAX_ROOT_ENTRIES}",
        entries.len()
    );
    let mut buf = [0u8; BLOCK_SIZE];
    let count = entries.len() as i32;
    buf[..DIR_HEADER_SIZE].copy_from_slice(&count.to_le_bytes());
    for (i, entry) in entries.iter().enumerate() {
        buf[slot_range(i)].copy_from_slice(&entry.encode());
    }
    buf
}

/// `decode_root_block` keeps every valid slot, in slot order.
#[must_use]
pub fn decode_root_block(buf: &Block) -> Vec<DirEntry> {
    (0..MAX_ROOT_ENTRIES)
        .filter_map(|i| DirEntry::decode(&buf[slot_range(i)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, name: &str) -> DirEntry {
        DirEntry {
            inode_id: id,
            kind: InodeKind::File,
            name: name.as_bytes().to_vec(),
        }
    }

    #[test]
    fn name_rules() {
        assert!(is_valid_name("f"));
        assert!(is_valid_name(&"a".repeat(NAME_LEN - 1)));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name(&"a".repeat(NAME_LEN)));
        assert!(!is_valid_name("a\0b"));
    }

    #[test]
    fn empty_root_block_has_no_entries() {
        let block = empty_root_block();
        assert_eq!(&block[..4], &[0, 0, 0, 0]);
        assert_eq!(&block[4..8], &(-1i32).to_le_bytes());
        assert_eq!(&block[8..12], &(-1i32).to_le_bytes());
        assert!(decode_root_block(&block).is_empty());
    }

    #[test]
    fn encoded_block_starts_with_count() {
        let entries = vec![entry(0, "a"), entry(1, "b"), entry(2, "c")];
        let block = encode_root_block(&entries);
        assert_eq!(&block[..4], &3i32.to_le_bytes());
        assert_eq!(decode_root_block(&block), entries);
    }

    #[test]
    fn slot_layout_is_bit_exact() {
        let slot = entry(5, "note").encode();
        assert_eq!(&slot[0..4], &[5, 0, 0, 0]);
        assert_eq!(&slot[4..8], &[1, 0, 0, 0]);
        assert_eq!(&slot[8..12], b"note");
        assert!(slot[12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn invalid_slots_are_skipped() {
        let mut block = encode_root_block(&[entry(0, "keep"), entry(1, "bad-type")]);
        // Second slot: type 7.
        block[slot_range(1)][4..8].copy_from_slice(&7i32.to_le_bytes());
        let mut third = entry(TOTAL_INODES, "bad-id").encode();
        third[0..4].copy_from_slice(&(TOTAL_INODES as i32).to_le_bytes());
        block[slot_range(2)].copy_from_slice(&third);
        let mut fourth = entry(3, "x").encode();
        fourth[8..8 + NAME_LEN].fill(b'z');
        block[slot_range(3)].copy_from_slice(&fourth);

        let entries = decode_root_block(&block);
        assert_eq!(entries, vec![entry(0, "keep")]);
    }

    #[test]
    fn full_root_block_round_trips() {
        let entries: Vec<_> = (0..MAX_ROOT_ENTRIES as u32)
            .map(|i| entry(i, &format!("f{i}")))
            .collect();
        let block = encode_root_block(&entries);
        assert_eq!(decode_root_block(&block), entries);
    }

    #[test]
    fn non_utf8_name_is_kept_verbatim() {
        let mut slot = entry(2, "x").encode();
        slot[8..8 + 30].fill(0xFF);
        let decoded = DirEntry::decode(&slot).expect("valid slot");
        assert_eq!(decoded.name, vec![0xFF; 30]);
        assert_eq!(decoded.encode(), slot);
        assert!(decoded.display_name().contains('\u{FFFD}'));
    }

    #[test]
    #[should_panic(expected = "cannot be stored")]
    fn over_long_name_is_not_truncated() {
        let _ = entry(0, &"n".repeat(NAME_LEN)).encode();
    }

    #[test]
    #[should_panic(expected = "limit is")]
    fn overfull_cache_cannot_be_encoded() {
        let entries: Vec<_> = (0..=MAX_ROOT_ENTRIES as u32)
            .map(|i| entry(i % TOTAL_INODES, "f"))
            .collect();
        let _ = encode_root_block(&entries);
    }
}
