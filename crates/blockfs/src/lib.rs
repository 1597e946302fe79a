//! Bitmap-allocated flat filesystem over fixed-size block devices.
//!
//! A volume is a superblock, an inode bitmap, a data bitmap, an inode table,
//! a single root directory block and a data area. See [`layout`] for the
//! block map and [`fs::FileSystem`] for the operations.
#![allow(clippy::cargo_common_metadata)]

pub mod bitmap;
pub mod constants;
pub mod device;
pub mod fs;
pub mod layout;

pub use device::{Block, BlockDevice, FileBlockDevice, MemoryBlockDevice};
pub use fs::{DirEntry, FileSystem, FsError, FsResult, Inode, InodeKind};
