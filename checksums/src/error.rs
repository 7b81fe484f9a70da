use arbor_blake3::HasherError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChecksumError {
    /// The requested byte range does not lie within the buffer.
    #[error("{count} bytes at offset {offset} are out of bounds for a buffer of {len} bytes")]
    OutOfRange {
        offset: usize,
        count: usize,
        len: usize,
    },

    #[error(transparent)]
    Hasher(#[from] HasherError),
}

pub type ChecksumResult<T> = core::result::Result<T, ChecksumError>;
