//! On-disk format constants for the block filesystem.

/// BLOCK_SIZE is the byte size of every device block.
pub const BLOCK_SIZE: usize = 4096;
/// BITS_PER_BLOCK is the number of units a single bitmap block can track.
pub const BITS_PER_BLOCK: usize = BLOCK_SIZE * 8;
/// DEFAULT_TOTAL_BLOCKS is the device size used by the CLI and test fixtures.
pub const DEFAULT_TOTAL_BLOCKS: u32 = 100;
/// TOTAL_INODES is the fixed number of inode records in the table.
pub const TOTAL_INODES: u32 = 128;
/// NAME_LEN is the width of the NUL-terminated name buffer in a directory entry.
pub const NAME_LEN: usize = 64;

/// FS_MAGIC identifies a formatted volume.
pub const FS_MAGIC: i32 = 0x1234_5678;
/// FS_VERSION is the on-disk format version.
pub const FS_VERSION: i32 = 1;

/// SUPERBLOCK_INDEX is the block holding the superblock.
pub const SUPERBLOCK_INDEX: u32 = 0;
/// INODE_BITMAP_INDEX is the block holding the inode bitmap.
pub const INODE_BITMAP_INDEX: u32 = 1;
/// DATA_BITMAP_INDEX is the block holding the data-block bitmap.
pub const DATA_BITMAP_INDEX: u32 = 2;
/// INODE_TABLE_START is the first block of the inode table.
pub const INODE_TABLE_START: u32 = 3;

/// SUPERBLOCK_SIZE is the encoded size of the superblock record.
pub const SUPERBLOCK_SIZE: usize = 16;
/// INODE_SIZE is the encoded size of one inode record.
pub const INODE_SIZE: usize = 12;
/// DIR_ENTRY_SIZE is the encoded size of one directory entry.
pub const DIR_ENTRY_SIZE: usize = 8 + NAME_LEN;
/// DIR_HEADER_SIZE is the size of the entry count preceding the entries.
pub const DIR_HEADER_SIZE: usize = 4;
/// MAX_ROOT_ENTRIES is how many entries fit in the root directory block.
pub const MAX_ROOT_ENTRIES: usize = (BLOCK_SIZE - DIR_HEADER_SIZE) / DIR_ENTRY_SIZE;

/// NO_BLOCK marks an inode without an attached data block.
pub const NO_BLOCK: i32 = -1;
