//! Fixed-width byte buffers with LSB-first bit helpers.


#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
/// Bits stores a fixed-size array of bytes addressed bit by bit.
///
/// Bit `i` lives in byte `i / 8` at position `i % 8`, least significant first.
pub struct Bits<const N: usize>(pub [u8; N]);

impl<const N: usize> Bits<N> {
    #[inline]
    #[must_use]
    /// `zero` returns a zero-initialized bit buffer.
    pub const fn zero() -> Self {
        Self([0u8; N])
    }
    #[inline]
    #[must_use]
    /// `as_bytes` returns a shared reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
    #[inline]
    /// `as_bytes_mut` returns a mutable reference to the underlying byte array.
    pub const fn as_bytes_mut(&mut self) -> &mut [u8; N] {
        &mut self.0
    }

    #[inline]
    #[must_use]
    /// `get` returns the bit value at the provided index.
    ///
    /// # Arguments
    /// * `i` - The bit index within the buffer.
    pub const fn get(&self, i: usize) -> bool {
        let (byte, bit) = (i >> 3, i & 7);
        (self.0[byte] >> bit) & 1 == 1
    }

    #[inline]
    /// `set` updates the bit at the provided index.
    ///
    /// # Arguments
    /// * `i` - The bit index within the buffer.
    /// * `val` - Whether the bit should be set.
    pub const fn set(&mut self, i: usize, val: bool) {
        let (byte, bit) = (i >> 3, i & 7);
        let m = 1u8 << bit;
        if val {
            self.0[byte] |= m;
        } else {
            self.0[byte] &= !m;
        }
    }

    /// `fill_prefix` clears the first `len` bits and sets every bit after them.
    ///
    /// # Arguments
    /// * `len` - Number of leading bits to clear; must not exceed `N * 8`.
    pub fn fill_prefix(&mut self, len: usize) {
        assert!(len <= N * 8, "prefix {len} exceeds {} bits", N * 8);
        let full = len >> 3;
        self.0[..full].fill(0);
        self.0[full..].fill(0xFF);
        let rem = len & 7;
        if rem > 0 {
            self.0[full] = 0xFFu8 << rem;
        }
    }

    #[must_use]
    /// `first_zero` returns the lowest clear bit below `limit`, scanning bytes
    /// in ascending order and bits from the least significant.
    ///
    /// # Arguments
    /// * `limit` - Exclusive upper bound on the returned index.
    pub fn first_zero(&self, limit: usize) -> Option<usize> {
        let limit = limit.min(N * 8);
        self.0[..limit.div_ceil(8)]
            .iter()
            .enumerate()
            .find(|(_, byte)| **byte != 0xFF)
            .map(|(idx, byte)| idx * 8 + byte.trailing_ones() as usize)
            .filter(|&i| i < limit)
    }
}
