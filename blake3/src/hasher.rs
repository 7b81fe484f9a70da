use alloc::vec::Vec;
use core::fmt;

use arbor_symmetric::StreamingHasher;
use arbor_util::{largest_power_of_two_leq, log2_strict_usize};
use tracing::{debug, instrument, trace};

use crate::chunk::ChunkState;
use crate::constants::{CHUNK_LEN, MAX_OUTPUT_LEN, OUT_LEN};
use crate::error::{HasherError, HasherResult};
use crate::hash::Hash;
use crate::output::{Output, OutputReader};
use crate::parallel::subtree_cv;
use crate::tree::SubtreeStack;

/// Where a [`Hasher`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Freshly constructed or reset; no input absorbed.
    Empty,
    /// At least one non-empty update has been absorbed.
    Accumulating,
    /// A digest has been produced. Only [`Hasher::reset`] leaves this phase.
    Finalized,
}

/// An incremental hasher.
///
/// The digest does not depend on how the input is split across calls to
/// [`update`](Self::update) and [`update_parallel`](Self::update_parallel).
///
/// ```
/// use arbor_blake3::Hasher;
///
/// let mut hasher = Hasher::new();
/// hasher.update(b"hello ")?;
/// hasher.update(b"world")?;
/// assert_eq!(hasher.finalize()?, arbor_blake3::hash(b"hello world"));
/// # Ok::<(), arbor_blake3::HasherError>(())
/// ```
#[derive(Clone)]
pub struct Hasher {
    chunk: ChunkState,
    stack: SubtreeStack,
    phase: Phase,
}

impl Hasher {
    /// Creates a hasher in the [`Phase::Empty`] phase.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chunk: ChunkState::new(0),
            stack: SubtreeStack::new(),
            phase: Phase::Empty,
        }
    }

    /// The current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The number of input bytes absorbed since construction or the last reset.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.chunk.counter() * CHUNK_LEN as u64 + self.chunk.len() as u64
    }

    /// Absorbs `input`.
    ///
    /// Fails with [`HasherError::Finalized`] if the hasher has been finalized and not reset.
    pub fn update(&mut self, input: &[u8]) -> HasherResult<()> {
        self.ensure_open()?;
        self.absorb(input);
        Ok(())
    }

    /// Absorbs `input`, hashing whole subtrees of it with fork-join parallelism.
    ///
    /// With the `parallel` feature the subtrees are spread over the rayon thread pool; without
    /// it this runs on the calling thread. The digest is the same as with [`update`](Self::update).
    #[instrument(level = "debug", name = "parallel update", skip_all, fields(len = input.len()))]
    pub fn update_parallel(&mut self, mut input: &[u8]) -> HasherResult<()> {
        self.ensure_open()?;
        if input.is_empty() {
            return Ok(());
        }
        self.phase = Phase::Accumulating;

        // Top up a partially filled chunk first. It is sealed only if input remains.
        if self.chunk.len() > 0 {
            let take = (CHUNK_LEN - self.chunk.len()).min(input.len());
            self.chunk.update(&input[..take]);
            input = &input[take..];
            if input.is_empty() {
                return Ok(());
            }
            self.seal_chunk();
        }

        // The chunk is now empty and chunk-aligned. Hash the largest subtree that is aligned with
        // the chunks already absorbed and leaves at least one byte behind, so that the final chunk
        // always stays in `self.chunk`.
        while input.len() > CHUNK_LEN {
            let count_so_far = self.chunk.counter() * CHUNK_LEN as u64;
            let mut subtree_len = largest_power_of_two_leq(input.len() - 1);
            while (subtree_len as u64 - 1) & count_so_far != 0 {
                subtree_len /= 2;
            }

            let subtree_chunks = subtree_len / CHUNK_LEN;
            let cv = subtree_cv(&input[..subtree_len], self.chunk.counter());
            self.stack.push_subtree(cv, log2_strict_usize(subtree_chunks) as u8);
            self.chunk = ChunkState::new(self.chunk.counter() + subtree_chunks as u64);
            input = &input[subtree_len..];
        }

        self.chunk.update(input);
        Ok(())
    }

    /// Finalizes the hasher and returns the default 32-byte digest.
    pub fn finalize(&mut self) -> HasherResult<Hash> {
        Ok(self.finish()?.root_hash())
    }

    /// Finalizes the hasher and returns the first `len` bytes of its extended output.
    ///
    /// `len` is checked and the output buffer allocated before any state changes, so a rejected
    /// length or a failed allocation leaves the hasher usable.
    pub fn finalize_extended(&mut self, len: usize) -> HasherResult<Vec<u8>> {
        self.ensure_open()?;
        if len > MAX_OUTPUT_LEN {
            return Err(HasherError::OutputLength {
                requested: len,
                max: MAX_OUTPUT_LEN,
            });
        }
        let mut out = Vec::new();
        out.try_reserve_exact(len)
            .map_err(|_| HasherError::Allocation { requested: len })?;
        out.resize(len, 0);
        self.finalize_xof()?.fill(&mut out);
        Ok(out)
    }

    /// Finalizes the hasher and returns a reader over its unbounded extended output.
    pub fn finalize_xof(&mut self) -> HasherResult<OutputReader> {
        Ok(OutputReader::new(self.finish()?))
    }

    /// Returns the hasher to the state of a freshly constructed one.
    pub fn reset(&mut self) {
        trace!(count = self.count(), phase = ?self.phase, "resetting hasher");
        self.chunk = ChunkState::new(0);
        self.stack.clear();
        self.phase = Phase::Empty;
    }

    /// Absorbs `input` without checking the phase.
    pub(crate) fn absorb(&mut self, mut input: &[u8]) {
        if input.is_empty() {
            return;
        }
        self.phase = Phase::Accumulating;
        while !input.is_empty() {
            // A full chunk is only sealed once we know it is not the last one.
            if self.chunk.len() == CHUNK_LEN {
                self.seal_chunk();
            }
            let take = (CHUNK_LEN - self.chunk.len()).min(input.len());
            self.chunk.update(&input[..take]);
            input = &input[take..];
        }
    }

    /// The root node for the input absorbed so far, without changing the phase.
    pub(crate) fn root_output(&self) -> Output {
        self.stack.finalize(self.chunk.output())
    }

    fn seal_chunk(&mut self) {
        debug_assert_eq!(self.chunk.len(), CHUNK_LEN);
        let counter = self.chunk.counter();
        self.stack.push_chunk(self.chunk.output().chaining_value());
        self.chunk = ChunkState::new(counter + 1);
    }

    fn finish(&mut self) -> HasherResult<Output> {
        self.ensure_open()?;
        debug!(
            bytes = self.count(),
            chunks = self.chunk.counter() + 1,
            subtrees = self.stack.len(),
            "finalizing hasher"
        );
        let output = self.root_output();
        self.phase = Phase::Finalized;
        Ok(output)
    }

    const fn ensure_open(&self) -> HasherResult<()> {
        match self.phase {
            Phase::Finalized => Err(HasherError::Finalized),
            Phase::Empty | Phase::Accumulating => Ok(()),
        }
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

// The buffered chunk and subtree stack are large and not useful to print.
impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hasher")
            .field("count", &self.count())
            .field("subtrees", &self.stack.len())
            .field("phase", &self.phase)
            .finish()
    }
}

impl StreamingHasher for Hasher {
    type Error = HasherError;

    const OUTPUT_LEN: usize = OUT_LEN;

    fn update(&mut self, input: &[u8]) -> HasherResult<()> {
        Self::update(self, input)
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> HasherResult<()> {
        self.finalize_xof()?.fill(out);
        Ok(())
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}
