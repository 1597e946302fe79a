//! Flat-root filesystem over a [`BlockDevice`].
//!
//! ```text
//! FileSystem::new ── mount ──┬── Formatted    (superblock matches layout)
//!                            └── NotFormatted (every operation fails until format)
//! ```

pub mod dir;
pub mod error;
pub mod inode;
mod ops_data;
mod ops_dir;
mod ops_format;
mod ops_inode;
pub mod superblock;


use anyhow::Context;
use tracing::{debug, info};

use crate::bitmap::Bitmap;
use crate::constants::{
    BLOCK_SIZE, DATA_BITMAP_INDEX, INODE_BITMAP_INDEX, SUPERBLOCK_INDEX, TOTAL_INODES,
};
use crate::device::BlockDevice;
use crate::layout::Layout;

pub use dir::DirEntry;
pub use error::{FsError, FsResult};
pub use inode::{Inode, InodeKind};
pub use ops_dir::ROOT_PATH;
pub use superblock::Superblock;

/// FileSystem owns a device and the in-memory state mounted from it.
///
/// Pass `&mut device` to keep ownership of the device on the caller's side.
pub struct FileSystem<D: BlockDevice> {
    device: D,
    layout: Layout,
    superblock: Option<Superblock>,
    root_entries: Vec<DirEntry>,
    inode_bitmap: Bitmap,
    data_bitmap: Bitmap,
}

impl<D: BlockDevice> FileSystem<D> {
    /// Construct over `device` and attempt to mount it.
    ///
    /// An unformatted or foreign volume is not an error here; the filesystem
    /// comes up in the not-formatted state instead.
    ///
    /// # Errors
    /// Returns an error if no layout fits the device's block count.
    pub fn new(device: D) -> anyhow::Result<Self> {
        let total_blocks = device.total_blocks();
        let layout = Layout::new(total_blocks)
            .with_context(|| format!("cannot lay out a filesystem on {total_blocks} blocks"))?;
        let mut fs = Self {
            device,
            layout,
            superblock: None,
            root_entries: Vec::new(),
            inode_bitmap: Bitmap::new(INODE_BITMAP_INDEX, TOTAL_INODES),
            data_bitmap: Bitmap::new(DATA_BITMAP_INDEX, layout.data_block_count),
        };
        fs.mount();
        Ok(fs)
    }

    fn mount(&mut self) {
        let mut buf = [0u8; BLOCK_SIZE];
        self.device.read_block(SUPERBLOCK_INDEX, &mut buf);
        let candidate = Superblock::from_block(&buf);

        if let Some(reason) = candidate.rejection(&self.layout) {
            debug!(reason, ?candidate, "volume not formatted");
            self.superblock = None;
            self.root_entries.clear();
            return;
        }

        self.superblock = Some(candidate);
        self.load_root_dir();
        info!(
            total_blocks = self.layout.total_blocks,
            root_entries = self.root_entries.len(),
            "mounted volume"
        );
    }

    #[must_use]
    pub const fn is_formatted(&self) -> bool {
        self.superblock.is_some()
    }

    #[must_use]
    pub const fn superblock(&self) -> Option<&Superblock> {
        self.superblock.as_ref()
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Release the device, dropping the mounted state.
    pub fn into_device(self) -> D {
        self.device
    }

    fn ensure_formatted(&self) -> FsResult<()> {
        if self.is_formatted() {
            Ok(())
        } else {
            Err(FsError::NotFormatted)
        }
    }
}
