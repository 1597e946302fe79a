use crate::constants::{BLOCK_SIZE, FS_MAGIC, FS_VERSION, SUPERBLOCK_SIZE};
use crate::device::Block;
use crate::layout::Layout;

/// Superblock is the global metadata record at block 0.
///
/// Encoding: four little-endian `i32` fields, then zero padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Superblock {
    pub magic: i32,
    pub version: i32,
    pub total_blocks: i32,
    pub root_dir_block_index: i32,
}

impl Superblock {
    #[must_use]
    pub fn for_layout(layout: &Layout) -> Self {
        Self {
            magic: FS_MAGIC,
            version: FS_VERSION,
            total_blocks: layout.total_blocks as i32,
            root_dir_block_index: layout.root_dir_block as i32,
        }
    }

    #[must_use]
    pub fn from_block(buf: &Block) -> Self {
        let field = |i: usize| i32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        Self {
            magic: field(0),
            version: field(4),
            total_blocks: field(8),
            root_dir_block_index: field(12),
        }
    }

    #[must_use]
    pub fn to_block(&self) -> Block {
        let mut buf = [0u8; BLOCK_SIZE];
        buf[0..4].copy_from_slice(&self.magic.to_le_bytes());
        buf[4..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8..12].copy_from_slice(&self.total_blocks.to_le_bytes());
        buf[12..SUPERBLOCK_SIZE].copy_from_slice(&self.root_dir_block_index.to_le_bytes());
        buf
    }

    /// `rejection` explains why this superblock does not describe `layout`,
    /// or returns `None` when it can be mounted.
    #[must_use]
    pub fn rejection(&self, layout: &Layout) -> Option<&'static str> {
        if self.magic != FS_MAGIC || self.version != FS_VERSION {
            return Some("magic or version mismatch");
        }
        if u32::try_from(self.total_blocks).ok() != Some(layout.total_blocks) {
            return Some("recorded block count differs from device");
        }
        if u32::try_from(self.root_dir_block_index).ok() != Some(layout.root_dir_block) {
            return Some("root directory block differs from layout");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_TOTAL_BLOCKS;

    fn layout() -> Layout {
        Layout::new(DEFAULT_TOTAL_BLOCKS).expect("layout")
    }

    #[test]
    fn encoding_is_little_endian_and_padded() {
        let sb = Superblock::for_layout(&layout());
        let block = sb.to_block();
        assert_eq!(&block[0..4], &[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(&block[4..8], &[1, 0, 0, 0]);
        assert_eq!(&block[8..12], &[100, 0, 0, 0]);
        assert_eq!(&block[12..16], &[4, 0, 0, 0]);
        assert!(block[SUPERBLOCK_SIZE..].iter().all(|&b| b == 0));
        assert_eq!(Superblock::from_block(&block), sb);
    }

    #[test]
    fn fresh_superblock_is_accepted() {
        let layout = layout();
        assert_eq!(Superblock::for_layout(&layout).rejection(&layout), None);
    }

    #[test]
    fn zeroed_block_is_rejected() {
        let sb = Superblock::from_block(&[0u8; BLOCK_SIZE]);
        assert!(sb.rejection(&layout()).is_some());
    }

    #[test]
    fn each_field_mismatch_is_rejected() {
        let layout = layout();
        let good = Superblock::for_layout(&layout);

        let mut sb = good;
        sb.magic += 1;
        assert!(sb.rejection(&layout).is_some());

        let mut sb = good;
        sb.version = 2;
        assert!(sb.rejection(&layout).is_some());

        let mut sb = good;
        sb.total_blocks = 99;
        assert!(sb.rejection(&layout).is_some());

        let mut sb = good;
        sb.root_dir_block_index = layout.data_start as i32;
        assert!(sb.rejection(&layout).is_some());
    }
}
