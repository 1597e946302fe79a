//! Fixed-size block storage backends.

pub mod file;
pub mod memory;

use crate::constants::BLOCK_SIZE;

pub use file::FileBlockDevice;
pub use memory::MemoryBlockDevice;

/// Block is the unit of every device transfer.
pub type Block = [u8; BLOCK_SIZE];

/// BlockDevice reads and writes whole blocks by index.
///
/// Indices outside `[0, total_blocks())` are a caller bug; implementations
/// panic instead of reporting a status.
pub trait BlockDevice {
    /// total_blocks reports the device capacity in blocks.
    fn total_blocks(&self) -> u32;
    /// read_block copies block `index` into `buf`.
    fn read_block(&self, index: u32, buf: &mut Block);
    /// write_block copies `buf` into block `index`.
    fn write_block(&mut self, index: u32, buf: &Block);
}

impl<T: BlockDevice + ?Sized> BlockDevice for &mut T {
    fn total_blocks(&self) -> u32 {
        (**self).total_blocks()
    }

    fn read_block(&self, index: u32, buf: &mut Block) {
        (**self).read_block(index, buf);
    }

    fn write_block(&mut self, index: u32, buf: &Block) {
        (**self).write_block(index, buf);
    }
}

#[inline]
pub(crate) fn assert_in_range(index: u32, total: u32) {
    assert!(
        index < total,
        "block index {index} out of range (total_blocks={total})"
    );
}
