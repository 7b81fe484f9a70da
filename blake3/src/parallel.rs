//! Fork-join hashing of complete subtrees.

use arbor_maybe_rayon::prelude::join;
use arbor_symmetric::PseudoCompressionFunction;

use crate::chunk::chunk_cv;
use crate::compress::ChainingValue;
use crate::constants::CHUNK_LEN;
use crate::tree::ParentCompression;

/// Subtrees up to this size are hashed on the current thread; splitting them further costs more
/// in scheduling than it saves.
const SERIAL_SUBTREE_LEN: usize = 8 * CHUNK_LEN;

/// Hashes a complete subtree of a power-of-two number of chunks, starting at chunk `counter`, to
/// its chaining value.
///
/// The subtree must not contain the final chunk of the message, since the result is never
/// treated as a root.
pub(crate) fn subtree_cv(input: &[u8], counter: u64) -> ChainingValue {
    debug_assert!(input.len() >= CHUNK_LEN && input.len().is_power_of_two());
    if input.len() == CHUNK_LEN {
        return chunk_cv(input, counter);
    }

    let (left, right) = input.split_at(input.len() / 2);
    let right_counter = counter + (left.len() / CHUNK_LEN) as u64;
    let (left_cv, right_cv) = if input.len() <= SERIAL_SUBTREE_LEN {
        (subtree_cv(left, counter), subtree_cv(right, right_counter))
    } else {
        join(
            || subtree_cv(left, counter),
            || subtree_cv(right, right_counter),
        )
    };
    ParentCompression.compress([left_cv, right_cv])
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::chunk::ChunkState;
    use crate::tree::SubtreeStack;

    #[test]
    fn test_subtree_matches_stack_merging() {
        let data: Vec<u8> = (0..32 * CHUNK_LEN).map(|i| (i % 251) as u8).collect();
        let mut by_chunk = SubtreeStack::new();
        for (i, chunk) in data.chunks(CHUNK_LEN).enumerate() {
            by_chunk.push_chunk(chunk_cv(chunk, i as u64));
        }
        assert_eq!(by_chunk.len(), 1);

        let mut by_subtree = SubtreeStack::new();
        by_subtree.push_subtree(subtree_cv(&data, 0), 5);

        let last = ChunkState::new(32).output();
        assert_eq!(
            by_chunk.finalize(last).root_hash(),
            by_subtree.finalize(last).root_hash()
        );
    }

    #[test]
    fn test_subtree_respects_counter_offset() {
        let data = [0u8; 2 * CHUNK_LEN];
        let (left, right) = data.split_at(CHUNK_LEN);
        assert_ne!(subtree_cv(&data, 0), subtree_cv(&data, 2));
        assert_eq!(
            subtree_cv(&data, 2),
            ParentCompression.compress([chunk_cv(left, 2), chunk_cv(right, 3)])
        );
    }
}
