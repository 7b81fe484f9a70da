use crate::ChainingValue;

/// The default number of bytes in a digest.
pub const OUT_LEN: usize = 32;

/// The number of bytes in a block, the input unit of the compression function.
pub const BLOCK_LEN: usize = 64;

/// The number of bytes in a chunk, the leaf unit of the hash tree.
pub const CHUNK_LEN: usize = 1024;

/// Upper bound on the number of incomplete subtrees held at once.
///
/// Inputs are limited to `2^64` bytes, i.e. `2^54` chunks, and each set bit of the chunk count
/// leaves one subtree on the stack.
pub const MAX_DEPTH: usize = 54;

/// The largest extended output that can be requested in one call.
pub const MAX_OUTPUT_LEN: usize = isize::MAX as usize;

/// Set on the first block of every chunk.
pub const CHUNK_START: u32 = 1 << 0;
/// Set on the last block of every chunk.
pub const CHUNK_END: u32 = 1 << 1;
/// Set on every parent node compression.
pub const PARENT: u32 = 1 << 2;
/// Set on the compressions that produce output bytes from the root node.
pub const ROOT: u32 = 1 << 3;

pub(crate) const ROUNDS: usize = 7;

// The SHA-256 initial hash values.
pub(crate) const IV: ChainingValue = [
    0x6A09E667, 0xBB67AE85, 0x3C6EF372, 0xA54FF53A, 0x510E527F, 0x9B05688C, 0x1F83D9AB, 0x5BE0CD19,
];

// The index map for the permutation used to permute the block words is:
// `[2, 6, 3, 10, 7, 0, 4, 13, 1, 11, 12, 5, 9, 14, 15, 8]`
//
// This permutation decomposes into 2 cycles of length 8:
// `0 -> 2 -> 3 -> 10 -> 12 -> 9 -> 11 -> 5 -> 0`
// `1 -> 6 -> 4 -> 7 -> 13 -> 14 -> 15 -> 8 -> 1`

/// The index map for the permutation used to permute the block words.
const MSG_PERMUTATION: [usize; 16] = [2, 6, 3, 10, 7, 0, 4, 13, 1, 11, 12, 5, 9, 14, 15, 8];

/// Apply the MSG_PERMUTATION to the block words.
#[inline]
pub(crate) fn permute(m: &mut [u32; 16]) {
    *m = core::array::from_fn(|i| m[MSG_PERMUTATION[i]]);
}
