use std::fmt;

/// FsError is the status returned by every public filesystem operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FsError {
    /// No accepted superblock; call `format` first.
    NotFormatted,
    NotFound,
    /// Reserved for path walks; the flat root never produces it.
    NotDirectory,
    /// The data-block bitmap is exhausted.
    FullDisk,
    /// A data block number outside the data area was freed.
    OutBoundariesBlock,
    /// Content does not fit in the single direct block of an inode.
    FileTooLarge,
    UnknownError,
}

pub type FsResult<T> = Result<T, FsError>;

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NotFormatted => "filesystem is not formatted",
            Self::NotFound => "not found",
            Self::NotDirectory => "not a directory",
            Self::FullDisk => "no free data blocks",
            Self::OutBoundariesBlock => "data block out of boundaries",
            Self::FileTooLarge => "file exceeds one block",
            Self::UnknownError => "unknown filesystem error",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for FsError {}
