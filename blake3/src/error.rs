//! Error types for the incremental hasher.

use thiserror::Error;

/// Errors reported by [`Hasher`](crate::Hasher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HasherError {
    /// The hasher was already finalized and has not been reset since.
    #[error("hasher is finalized; reset it before adding input or finalizing again")]
    Finalized,

    /// More extended output was requested than a single buffer can hold.
    #[error("requested {requested} output bytes, at most {max} are supported")]
    OutputLength {
        /// The requested output length in bytes.
        requested: usize,
        /// The largest supported output length in bytes.
        max: usize,
    },

    /// The buffer for the requested extended output could not be allocated.
    #[error("could not allocate {requested} bytes of extended output")]
    Allocation {
        /// The requested output length in bytes.
        requested: usize,
    },
}

/// Result type alias for hasher operations.
pub type HasherResult<T> = core::result::Result<T, HasherError>;
