//! Reserved-region boundaries derived from the format constants.
//!
//! Block map for a device of `total_blocks` blocks:
//!
//! ```text
//! 0                      superblock
//! 1                      inode bitmap
//! 2                      data bitmap
//! [3, 3 + table_blocks)  inode table
//! root_dir_block         root directory
//! [data_start, total)    data area (data-relative numbers from 0)
//! ```

pub mod bits;


use std::fmt;

use crate::constants::{
    BITS_PER_BLOCK, BLOCK_SIZE, INODE_SIZE, INODE_TABLE_START, TOTAL_INODES,
};

/// Layout holds the block boundaries of every reserved region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub total_blocks: u32,
    pub inodes_per_block: u32,
    pub inode_table_blocks: u32,
    pub root_dir_block: u32,
    pub data_start: u32,
    pub data_block_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The device ends at or before the first data block.
    TooSmall { total_blocks: u32, data_start: u32 },
    /// The data area has more blocks than one bitmap block can track.
    TooLarge { data_blocks: u32, max: u32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall {
                total_blocks,
                data_start,
            } => write!(
                f,
                "device has {total_blocks} blocks but the data area starts at block {data_start}"
            ),
            Self::TooLarge { data_blocks, max } => write!(
                f,
                "data area of {data_blocks} blocks exceeds the bitmap limit of {max}"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

impl Layout {
    pub const INODES_PER_BLOCK: u32 = (BLOCK_SIZE / INODE_SIZE) as u32;
    pub const INODE_TABLE_BLOCKS: u32 = TOTAL_INODES.div_ceil(Self::INODES_PER_BLOCK);
    pub const ROOT_DIR_BLOCK: u32 = INODE_TABLE_START + Self::INODE_TABLE_BLOCKS;
    pub const DATA_START: u32 = Self::ROOT_DIR_BLOCK + 1;

    /// `new` derives the layout for a device of `total_blocks` blocks.
    ///
    /// # Errors
    /// Returns [`LayoutError::TooSmall`] when no data block would remain, and
    /// [`LayoutError::TooLarge`] when the data bitmap would overflow its block.
    pub const fn new(total_blocks: u32) -> Result<Self, LayoutError> {
        if total_blocks <= Self::DATA_START {
            return Err(LayoutError::TooSmall {
                total_blocks,
                data_start: Self::DATA_START,
            });
        }
        let data_block_count = total_blocks - Self::DATA_START;
        if data_block_count as usize > BITS_PER_BLOCK {
            return Err(LayoutError::TooLarge {
                data_blocks: data_block_count,
                max: BITS_PER_BLOCK as u32,
            });
        }
        Ok(Self {
            total_blocks,
            inodes_per_block: Self::INODES_PER_BLOCK,
            inode_table_blocks: Self::INODE_TABLE_BLOCKS,
            root_dir_block: Self::ROOT_DIR_BLOCK,
            data_start: Self::DATA_START,
            data_block_count,
        })
    }

    /// Blocks covered by the inode table.
    #[must_use]
    pub const fn inode_table(&self) -> std::ops::Range<u32> {
        INODE_TABLE_START..INODE_TABLE_START + self.inode_table_blocks
    }

    /// Absolute blocks of the data area.
    #[must_use]
    pub const fn data_area(&self) -> std::ops::Range<u32> {
        self.data_start..self.total_blocks
    }

    /// `inode_location` maps an inode id to its table block and byte offset.
    ///
    /// # Panics
    /// Panics if `id` is not below `TOTAL_INODES`.
    #[must_use]
    pub fn inode_location(&self, id: u32) -> (u32, usize) {
        assert!(id < TOTAL_INODES, "inode id {id} out of range");
        let block = INODE_TABLE_START + id / self.inodes_per_block;
        let offset = (id % self.inodes_per_block) as usize * INODE_SIZE;
        (block, offset)
    }

    /// `data_block_abs` maps a data-relative block number to a device block.
    ///
    /// # Panics
    /// Panics if `n` is not below `data_block_count`.
    #[must_use]
    pub fn data_block_abs(&self, n: u32) -> u32 {
        assert!(
            n < self.data_block_count,
            "data block {n} out of range (data_block_count={})",
            self.data_block_count
        );
        self.data_start + n
    }
}
