use tracing::warn;

use crate::constants::{BLOCK_SIZE, INODE_SIZE};
use crate::device::BlockDevice;

use super::inode::Inode;
use super::{FileSystem, FsError, FsResult};

impl<D: BlockDevice> FileSystem<D> {
    /// Existence is decided by the inode bitmap, never by record content.
    ///
    /// # Panics
    /// Panics if `id` is not below `TOTAL_INODES`.
    pub(crate) fn read_inode(&self, id: u32) -> FsResult<Inode> {
        self.ensure_formatted()?;
        let (block, offset) = self.layout.inode_location(id);
        if !self.inode_bitmap.is_allocated(&self.device, id) {
            return Err(FsError::NotFound);
        }

        let mut buf = [0u8; BLOCK_SIZE];
        self.device.read_block(block, &mut buf);
        let mut record = [0u8; INODE_SIZE];
        record.copy_from_slice(&buf[offset..offset + INODE_SIZE]);

        let inode = Inode::decode(&record).filter(|inode| self.is_sane(inode));
        inode.ok_or_else(|| {
            warn!(id, ?record, "allocated inode holds an invalid record");
            FsError::UnknownError
        })
    }

    /// # Panics
    /// Panics if `id` is not below `TOTAL_INODES`.
    pub(crate) fn write_inode(&mut self, id: u32, inode: &Inode) -> FsResult<()> {
        self.ensure_formatted()?;
        let (block, offset) = self.layout.inode_location(id);
        if !self.inode_bitmap.is_allocated(&self.device, id) {
            return Err(FsError::NotFound);
        }

        let mut buf = [0u8; BLOCK_SIZE];
        self.device.read_block(block, &mut buf);
        buf[offset..offset + INODE_SIZE].copy_from_slice(&inode.encode());
        self.device.write_block(block, &buf);
        Ok(())
    }

    /// Claim the lowest free inode id; exhaustion of the inode pool is
    /// reported as `UnknownError`.
    pub(crate) fn allocate_inode(&mut self) -> FsResult<u32> {
        self.ensure_formatted()?;
        self.inode_bitmap.allocate(&mut self.device).ok_or_else(|| {
            warn!("inode pool exhausted");
            FsError::UnknownError
        })
    }

    fn is_sane(&self, inode: &Inode) -> bool {
        inode.size as usize <= BLOCK_SIZE
            && (inode.size == 0 || inode.direct_block.is_some())
            && inode
                .direct_block
                .is_none_or(|n| n < self.layout.data_block_count)
    }
}
