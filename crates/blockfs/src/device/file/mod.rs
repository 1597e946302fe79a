#[cfg(test)]
mod file_tests;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context;
use memmap2::{MmapMut, MmapOptions};
use tracing::debug;

use crate::constants::BLOCK_SIZE;

use super::{Block, BlockDevice, assert_in_range};

/// FileBlockDevice maps a disk image file into memory and serves blocks from it.
pub struct FileBlockDevice {
    path: PathBuf,
    // Kept open for the lifetime of the mapping.
    _file: File,
    map: MmapMut,
    total_blocks: u32,
    /// True when the image did not exist or was empty before opening.
    created: bool,
}

impl FileBlockDevice {
    /// Open or create an image at `path`, sized to exactly `total_blocks` blocks.
    ///
    /// An existing image of a different size is resized, which changes its
    /// block count and therefore invalidates any filesystem recorded on it.
    ///
    /// # Errors
    /// Returns an error if `total_blocks` is zero or the image cannot be
    /// created, resized, or mapped.
    pub fn open(path: impl AsRef<Path>, total_blocks: u32) -> anyhow::Result<Self> {
        if total_blocks == 0 {
            anyhow::bail!("block device needs at least one block");
        }
        let path = path.as_ref().to_path_buf();
        let existed = path.exists();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("failed to open image {}", path.display()))?;

        let prev_len = file
            .metadata()
            .with_context(|| format!("failed to stat image {}", path.display()))?
            .len();
        let len = u64::from(total_blocks) * BLOCK_SIZE as u64;
        if prev_len != len {
            file.set_len(len)
                .with_context(|| format!("failed to size image {}", path.display()))?;
        }

        let map = Self::map(&file, len)?;
        debug!(
            path = %path.display(),
            total_blocks,
            created = !existed || prev_len == 0,
            "opened block image"
        );
        Ok(Self {
            path,
            _file: file,
            map,
            total_blocks,
            created: !existed || prev_len == 0,
        })
    }

    /// Open an existing image and derive its block count from the file length.
    ///
    /// # Errors
    /// Returns an error if the image is missing, empty, not a whole number of
    /// blocks, or cannot be mapped.
    pub fn open_existing(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .with_context(|| format!("failed to open image {}", path.display()))?;

        let len = file.metadata()?.len();
        if len == 0 || len % BLOCK_SIZE as u64 != 0 {
            anyhow::bail!(
                "image {} has length {len}, not a positive multiple of {BLOCK_SIZE}",
                path.display()
            );
        }
        let total_blocks = u32::try_from(len / BLOCK_SIZE as u64)
            .map_err(|_| anyhow::anyhow!("image {} has too many blocks", path.display()))?;

        let map = Self::map(&file, len)?;
        Ok(Self {
            path,
            _file: file,
            map,
            total_blocks,
            created: false,
        })
    }

    fn map(file: &File, len: u64) -> anyhow::Result<MmapMut> {
        let map_len = usize::try_from(len)
            .map_err(|_| anyhow::anyhow!("image length {len} exceeds addressable size"))?;
        let map = unsafe { MmapOptions::new().len(map_len).map_mut(file)? };
        Ok(map)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn created(&self) -> bool {
        self.created
    }

    /// Flush dirty pages of the mapping back to the image file.
    ///
    /// # Errors
    /// Returns an error if the OS fails to write the mapping back.
    pub fn flush(&self) -> anyhow::Result<()> {
        self.map
            .flush()
            .with_context(|| format!("failed to flush image {}", self.path.display()))
    }

    fn range(index: u32) -> std::ops::Range<usize> {
        let start = index as usize * BLOCK_SIZE;
        start..start + BLOCK_SIZE
    }
}

impl BlockDevice for FileBlockDevice {
    fn total_blocks(&self) -> u32 {
        self.total_blocks
    }

    fn read_block(&self, index: u32, buf: &mut Block) {
        assert_in_range(index, self.total_blocks);
        buf.copy_from_slice(&self.map[Self::range(index)]);
    }

    fn write_block(&mut self, index: u32, buf: &Block) {
        assert_in_range(index, self.total_blocks);
        self.map[Self::range(index)].copy_from_slice(buf);
    }
}
