//! First-fit allocator over a single on-device bitmap block.


use std::fmt;

use crate::constants::{BITS_PER_BLOCK, BLOCK_SIZE};
use crate::device::BlockDevice;
use crate::layout::bits::Bits;

/// Bitmap tracks `units` allocatable units, one bit each, in block `block`.
///
/// Every call reads the block, and mutating calls write it back before
/// returning. Bits at or beyond `units` are kept set so they are never
/// handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap {
    block: u32,
    units: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitmapError {
    OutOfRange,
    AlreadyFree,
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => f.write_str("bitmap index out of range"),
            Self::AlreadyFree => f.write_str("bitmap unit is already free"),
        }
    }
}

impl std::error::Error for BitmapError {}

impl Bitmap {
    /// # Panics
    /// Panics if `units` does not fit in one block.
    #[must_use]
    pub const fn new(block: u32, units: u32) -> Self {
        assert!(units as usize <= BITS_PER_BLOCK, "bitmap exceeds one block");
        Self { block, units }
    }

    #[must_use]
    pub const fn block(&self) -> u32 {
        self.block
    }

    #[must_use]
    pub const fn units(&self) -> u32 {
        self.units
    }

    /// `reset` marks every real unit free and every overflow bit allocated.
    pub fn reset<D: BlockDevice>(&self, dev: &mut D) {
        let mut bits = Bits::<BLOCK_SIZE>::zero();
        bits.fill_prefix(self.units as usize);
        dev.write_block(self.block, bits.as_bytes());
    }

    /// `allocate` claims the lowest free unit, or returns `None` when exhausted.
    pub fn allocate<D: BlockDevice>(&self, dev: &mut D) -> Option<u32> {
        let mut bits = self.load(dev);
        let index = bits.first_zero(self.units as usize)?;
        bits.set(index, true);
        dev.write_block(self.block, bits.as_bytes());
        u32::try_from(index).ok()
    }

    /// `free` releases a previously allocated unit.
    ///
    /// # Errors
    /// [`BitmapError::OutOfRange`] if `index >= units`, and
    /// [`BitmapError::AlreadyFree`] if the unit is not allocated.
    pub fn free<D: BlockDevice>(&self, dev: &mut D, index: u32) -> Result<(), BitmapError> {
        if index >= self.units {
            return Err(BitmapError::OutOfRange);
        }
        let mut bits = self.load(dev);
        if !bits.get(index as usize) {
            return Err(BitmapError::AlreadyFree);
        }
        bits.set(index as usize, false);
        dev.write_block(self.block, bits.as_bytes());
        Ok(())
    }

    /// # Panics
    /// Panics if `index >= units`.
    #[must_use]
    pub fn is_allocated<D: BlockDevice>(&self, dev: &D, index: u32) -> bool {
        assert!(
            index < self.units,
            "bitmap index {index} out of range (units={})",
            self.units
        );
        self.load(dev).get(index as usize)
    }

    fn load<D: BlockDevice>(&self, dev: &D) -> Bits<BLOCK_SIZE> {
        let mut bits = Bits::<BLOCK_SIZE>::zero();
        dev.read_block(self.block, bits.as_bytes_mut());
        bits
    }
}
