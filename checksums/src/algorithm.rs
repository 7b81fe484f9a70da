use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use arbor_symmetric::StreamingHasher;

use crate::error::{ChecksumError, ChecksumResult};

/// The lifecycle of a host hash algorithm object.
pub trait HashAlgorithm {
    /// The digest size in bits.
    fn hash_size(&self) -> usize;

    /// Discards any absorbed input and makes the object ready for a new message.
    fn initialize(&mut self);

    /// Absorbs `count` bytes of `buffer` starting at `offset`.
    fn hash_core(&mut self, buffer: &[u8], offset: usize, count: usize) -> ChecksumResult<()>;

    /// Produces the digest of everything absorbed since the last `initialize`.
    fn hash_final(&mut self) -> ChecksumResult<Vec<u8>>;

    /// Hashes `buffer` as a complete message and re-initializes, leaving the object reusable.
    fn compute_hash(&mut self, buffer: &[u8]) -> ChecksumResult<Vec<u8>> {
        let digest = self
            .hash_core(buffer, 0, buffer.len())
            .and_then(|()| self.hash_final());
        self.initialize();
        digest
    }
}

/// Exposes a [`StreamingHasher`] through [`HashAlgorithm`].
///
/// The hasher is owned exclusively and is never left uninitialized: `initialize` maps to
/// [`StreamingHasher::reset`], so a finalized hasher must be re-initialized before reuse.
#[derive(Clone, Debug, Default)]
pub struct HashAlgorithmAdapter<H> {
    hasher: H,
}

impl<H> HashAlgorithmAdapter<H> {
    pub const fn new(hasher: H) -> Self {
        Self { hasher }
    }

    pub fn into_inner(self) -> H {
        self.hasher
    }
}

impl<H> HashAlgorithm for HashAlgorithmAdapter<H>
where
    H: StreamingHasher,
    ChecksumError: From<H::Error>,
{
    fn hash_size(&self) -> usize {
        8 * H::OUTPUT_LEN
    }

    fn initialize(&mut self) {
        self.hasher.reset();
    }

    fn hash_core(&mut self, buffer: &[u8], offset: usize, count: usize) -> ChecksumResult<()> {
        let range = checked_range(buffer.len(), offset, count)?;
        self.hasher.update(&buffer[range])?;
        Ok(())
    }

    fn hash_final(&mut self) -> ChecksumResult<Vec<u8>> {
        let mut digest = vec![0u8; H::OUTPUT_LEN];
        self.hasher.finalize_into(&mut digest)?;
        Ok(digest)
    }
}

fn checked_range(len: usize, offset: usize, count: usize) -> ChecksumResult<Range<usize>> {
    offset
        .checked_add(count)
        .filter(|&end| end <= len)
        .map(|end| offset..end)
        .ok_or(ChecksumError::OutOfRange { offset, count, len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_range() {
        assert_eq!(checked_range(10, 0, 10), Ok(0..10));
        assert_eq!(checked_range(10, 3, 4), Ok(3..7));
        assert_eq!(checked_range(10, 10, 0), Ok(10..10));
        assert_eq!(
            checked_range(10, 8, 3),
            Err(ChecksumError::OutOfRange {
                offset: 8,
                count: 3,
                len: 10
            })
        );
        assert!(checked_range(10, 11, 0).is_err());
        assert!(checked_range(10, usize::MAX, 2).is_err());
    }
}
