use tracing::{debug, warn};

use crate::constants::{BLOCK_SIZE, MAX_ROOT_ENTRIES};
use crate::device::BlockDevice;

use super::dir::{self, DirEntry};
use super::inode::{Inode, InodeKind};
use super::{FileSystem, FsError, FsResult};

/// ROOT_PATH is the only directory path the flat layout knows.
pub const ROOT_PATH: &str = "/";

impl<D: BlockDevice> FileSystem<D> {
    /// List the entries of `path`, which must be `"/"`.
    ///
    /// # Errors
    /// `NotFormatted` before a successful mount or format, then `NotFound`
    /// for any other path.
    pub fn list_dir(&self, path: &str) -> FsResult<Vec<DirEntry>> {
        self.ensure_formatted()?;
        if path != ROOT_PATH {
            return Err(FsError::NotFound);
        }
        Ok(self.root_entries.clone())
    }

    /// Create an empty file named `name` in the root and return its inode id.
    ///
    /// Names already present are not rejected; lookups resolve to the first.
    ///
    /// # Errors
    /// `NotFormatted`; `UnknownError` for an empty, over-long or NUL-bearing
    /// name, a full root directory, or an exhausted inode pool.
    pub fn create_entry_in_root(&mut self, name: &str) -> FsResult<u32> {
        self.ensure_formatted()?;
        if !dir::is_valid_name(name) {
            warn!(name, "rejected root entry name");
            return Err(FsError::UnknownError);
        }
        if self.root_entries.len() >= MAX_ROOT_ENTRIES {
            warn!(name, limit = MAX_ROOT_ENTRIES, "root directory is full");
            return Err(FsError::UnknownError);
        }

        let inode_id = self.allocate_inode()?;
        self.write_inode(inode_id, &Inode::new(InodeKind::File))?;

        self.root_entries.push(DirEntry {
            inode_id,
            kind: InodeKind::File,
            name: name.as_bytes().to_vec(),
        });
        self.save_root_dir();
        debug!(name, inode_id, "created root entry");
        Ok(inode_id)
    }

    /// Return the inode behind the root entry called `name`.
    ///
    /// # Errors
    /// `NotFormatted`, or `NotFound` if no entry matches.
    pub fn get_root_entry_inode(&self, name: &str) -> FsResult<Inode> {
        let entry = self.find_root_entry(name)?;
        self.read_inode(entry.inode_id)
    }

    pub(crate) fn find_root_entry(&self, name: &str) -> FsResult<&DirEntry> {
        self.ensure_formatted()?;
        self.root_entries
            .iter()
            .find(|entry| entry.name == name.as_bytes())
            .ok_or(FsError::NotFound)
    }

    pub(crate) fn load_root_dir(&mut self) {
        let mut buf = [0u8; BLOCK_SIZE];
        self.device.read_block(self.layout.root_dir_block, &mut buf);
        self.root_entries = dir::decode_root_block(&buf);
    }

    // Whole-block rewrite keeps the cache and the block in step.
    fn save_root_dir(&mut self) {
        let buf = dir::encode_root_block(&self.root_entries);
        self.device.write_block(self.layout.root_dir_block, &buf);
    }
}
