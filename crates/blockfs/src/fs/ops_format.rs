use tracing::info;

use crate::constants::{BLOCK_SIZE, SUPERBLOCK_INDEX};
use crate::device::BlockDevice;

use super::FileSystem;
use super::dir::empty_root_block;
use super::superblock::Superblock;

impl<D: BlockDevice> FileSystem<D> {
    /// Reinitialize every reserved region and leave the volume mounted and empty.
    ///
    /// Prior content is discarded whether or not the volume was formatted.
    pub fn format(&mut self) {
        let superblock = Superblock::for_layout(&self.layout);
        self.device
            .write_block(SUPERBLOCK_INDEX, &superblock.to_block());

        self.inode_bitmap.reset(&mut self.device);
        self.zero_blocks(self.layout.inode_table());

        self.data_bitmap.reset(&mut self.device);
        self.zero_blocks(self.layout.data_area());

        self.device
            .write_block(self.layout.root_dir_block, &empty_root_block());
        self.root_entries.clear();

        self.superblock = Some(superblock);
        info!(
            total_blocks = self.layout.total_blocks,
            data_blocks = self.layout.data_block_count,
            "formatted volume"
        );
    }

    fn zero_blocks(&mut self, blocks: std::ops::Range<u32>) {
        let zero = [0u8; BLOCK_SIZE];
        for block in blocks {
            self.device.write_block(block, &zero);
        }
    }
}
