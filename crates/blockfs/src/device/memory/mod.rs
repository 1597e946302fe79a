#[cfg(test)]
mod memory_tests;

use crate::constants::BLOCK_SIZE;

use super::{Block, BlockDevice, assert_in_range};

/// MemoryBlockDevice keeps every block in a heap-allocated vector.
///
/// Contents live only as long as the value.
#[derive(Clone, Debug)]
pub struct MemoryBlockDevice {
    blocks: Vec<Block>,
}

impl MemoryBlockDevice {
    /// `new` allocates `ceil(size_bytes / BLOCK_SIZE)` zeroed blocks, at least one.
    #[must_use]
    pub fn new(size_bytes: usize) -> Self {
        let required = size_bytes.div_ceil(BLOCK_SIZE).max(1);
        Self {
            blocks: vec![[0u8; BLOCK_SIZE]; required],
        }
    }

    #[must_use]
    pub fn with_blocks(count: u32) -> Self {
        Self::new(count as usize * BLOCK_SIZE)
    }
}

impl BlockDevice for MemoryBlockDevice {
    fn total_blocks(&self) -> u32 {
        u32::try_from(self.blocks.len()).unwrap_or(u32::MAX)
    }

    fn read_block(&self, index: u32, buf: &mut Block) {
        assert_in_range(index, self.total_blocks());
        buf.copy_from_slice(&self.blocks[index as usize]);
    }

    fn write_block(&mut self, index: u32, buf: &Block) {
        assert_in_range(index, self.total_blocks());
        self.blocks[index as usize].copy_from_slice(buf);
    }
}
