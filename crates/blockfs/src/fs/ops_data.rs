use tracing::warn;

use crate::bitmap::BitmapError;
use crate::constants::BLOCK_SIZE;
use crate::device::BlockDevice;

use super::{FileSystem, FsError, FsResult};

impl<D: BlockDevice> FileSystem<D> {
    /// Replace the content of root entry `name` with `data`.
    ///
    /// Empty `data` detaches and frees the entry's data block.
    ///
    /// # Errors
    /// `NotFormatted`; `NotFound` if no entry matches; `FileTooLarge` if
    /// `data` exceeds one block; `FullDisk` if a block is needed and none is
    /// free.
    pub fn write_root_file(&mut self, name: &str, data: &[u8]) -> FsResult<()> {
        self.ensure_formatted()?;
        if data.len() > BLOCK_SIZE {
            warn!(name, len = data.len(), "content exceeds the direct block");
            return Err(FsError::FileTooLarge);
        }
        let inode_id = self.find_root_entry(name)?.inode_id;
        let mut inode = self.read_inode(inode_id)?;

        if data.is_empty() {
            if let Some(block) = inode.direct_block.take() {
                self.free_data_block(block)?;
            }
            inode.size = 0;
        } else {
            let block = match inode.direct_block {
                Some(block) => block,
                None => {
                    let block = self.allocate_data_block()?;
                    inode.direct_block = Some(block);
                    block
                }
            };
            let mut buf = [0u8; BLOCK_SIZE];
            buf[..data.len()].copy_from_slice(data);
            self.device
                .write_block(self.layout.data_block_abs(block), &buf);
            inode.size = data.len() as u32;
        }

        self.write_inode(inode_id, &inode)
    }

    /// Read the content of root entry `name`.
    ///
    /// # Errors
    /// `NotFormatted`, or `NotFound` if no entry matches.
    pub fn read_root_file(&self, name: &str) -> FsResult<Vec<u8>> {
        let inode = self.get_root_entry_inode(name)?;
        let Some(block) = inode.direct_block else {
            return Ok(Vec::new());
        };
        let mut buf = [0u8; BLOCK_SIZE];
        self.device
            .read_block(self.layout.data_block_abs(block), &mut buf);
        Ok(buf[..inode.size as usize].to_vec())
    }

    /// Claim the lowest free data block; the number is data-relative.
    pub(crate) fn allocate_data_block(&mut self) -> FsResult<u32> {
        self.ensure_formatted()?;
        self.data_bitmap.allocate(&mut self.device).ok_or_else(|| {
            warn!(
                data_blocks = self.layout.data_block_count,
                "data area exhausted"
            );
            FsError::FullDisk
        })
    }

    pub(crate) fn free_data_block(&mut self, block: u32) -> FsResult<()> {
        self.ensure_formatted()?;
        self.data_bitmap
            .free(&mut self.device, block)
            .map_err(|err| {
                warn!(block, %err, "rejected data block free");
                match err {
                    BitmapError::OutOfRange => FsError::OutBoundariesBlock,
                    BitmapError::AlreadyFree => FsError::UnknownError,
                }
            })
    }
}
