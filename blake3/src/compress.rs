//! The BLAKE3 compression function.

use crate::constants::{IV, ROUNDS, permute};

/// A 256-bit intermediate hash state, the output of compressing one block.
pub type ChainingValue = [u32; 8];

/// Compresses one block.
///
/// `block_words` is the zero-padded block as little-endian words, `block_len` the number of
/// meaningful bytes in it, `counter` the chunk index (or the output block index for root
/// compressions) and `flags` a combination of [`CHUNK_START`](crate::CHUNK_START),
/// [`CHUNK_END`](crate::CHUNK_END), [`PARENT`](crate::PARENT) and [`ROOT`](crate::ROOT).
///
/// Returns the full 16-word output; the first 8 words are the new chaining value.
#[must_use]
pub fn compress(
    chaining_value: &ChainingValue,
    block_words: &[u32; 16],
    counter: u64,
    block_len: u32,
    flags: u32,
) -> [u32; 16] {
    let cv = chaining_value;
    let mut state = [
        [cv[0], cv[1], cv[2], cv[3]],
        [cv[4], cv[5], cv[6], cv[7]],
        [IV[0], IV[1], IV[2], IV[3]],
        [counter as u32, (counter >> 32) as u32, block_len, flags],
    ];

    let mut m_vec = *block_words;
    for round_idx in 0..ROUNDS {
        round(&mut state, &m_vec);
        if round_idx + 1 < ROUNDS {
            permute(&mut m_vec);
        }
    }

    let mut out = [0u32; 16];
    for i in 0..4 {
        out[i] = state[0][i] ^ state[2][i];
        out[4 + i] = state[1][i] ^ state[3][i];
        out[8 + i] = state[2][i] ^ cv[i];
        out[12 + i] = state[3][i] ^ cv[4 + i];
    }
    out
}

/// Truncates a compression output to its chaining value.
#[inline]
#[must_use]
pub(crate) fn first_8_words(compression_output: [u32; 16]) -> ChainingValue {
    core::array::from_fn(|i| compression_output[i])
}

/// One full round: the four column quarter rounds followed by the four diagonal ones.
///
/// Columns (and likewise diagonals) touch disjoint state words, so each group is split into its
/// two half rounds without changing the result.
#[inline]
fn round(state: &mut [[u32; 4]; 4], m_vec: &[u32; 16]) {
    (0..4).for_each(|i| {
        (state[0][i], state[1][i], state[2][i], state[3][i]) = half_round(
            state[0][i],
            state[1][i],
            state[2][i],
            state[3][i],
            m_vec[2 * i],
            false,
        )
    });
    (0..4).for_each(|i| {
        (state[0][i], state[1][i], state[2][i], state[3][i]) = half_round(
            state[0][i],
            state[1][i],
            state[2][i],
            state[3][i],
            m_vec[2 * i + 1],
            true,
        )
    });

    (0..4).for_each(|i| {
        (
            state[0][i],
            state[1][(i + 1) % 4],
            state[2][(i + 2) % 4],
            state[3][(i + 3) % 4],
        ) = half_round(
            state[0][i],
            state[1][(i + 1) % 4],
            state[2][(i + 2) % 4],
            state[3][(i + 3) % 4],
            m_vec[8 + 2 * i],
            false,
        )
    });
    (0..4).for_each(|i| {
        (
            state[0][i],
            state[1][(i + 1) % 4],
            state[2][(i + 2) % 4],
            state[3][(i + 3) % 4],
        ) = half_round(
            state[0][i],
            state[1][(i + 1) % 4],
            state[2][(i + 2) % 4],
            state[3][(i + 3) % 4],
            m_vec[9 + 2 * i],
            true,
        )
    });
}

/// Perform half of a quarter round on the given elements.
///
/// The boolean flag, indicates whether this is the first (false) or second (true) half round.
#[inline(always)]
const fn half_round(
    mut a: u32,
    mut b: u32,
    mut c: u32,
    mut d: u32,
    m: u32,
    second: bool,
) -> (u32, u32, u32, u32) {
    let (rot_1, rot_2) = if second { (8, 7) } else { (16, 12) };

    a = a.wrapping_add(b).wrapping_add(m);
    d = (d ^ a).rotate_right(rot_1);
    c = c.wrapping_add(d);
    b = (b ^ c).rotate_right(rot_2);

    (a, b, c, d)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::{CHUNK_END, CHUNK_START, ROOT};

    #[test]
    fn test_empty_message_root_block() {
        // The empty message is a single zero-length block that is both chunk start, chunk end
        // and root.
        let out = compress(&IV, &[0; 16], 0, 0, CHUNK_START | CHUNK_END | ROOT);
        let mut digest = [0u8; 32];
        arbor_util::write_le_words(&out, &mut digest);
        assert_eq!(
            digest,
            hex!("af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262")
        );
    }

    #[test]
    fn test_flags_and_counter_separate_outputs() {
        let block: [u32; 16] = core::array::from_fn(|i| i as u32 * 0x01010101);
        let base = compress(&IV, &block, 0, 64, CHUNK_START);
        assert_ne!(base, compress(&IV, &block, 0, 64, CHUNK_START | CHUNK_END));
        assert_ne!(base, compress(&IV, &block, 1, 64, CHUNK_START));
        assert_ne!(base, compress(&IV, &block, 1 << 32, 64, CHUNK_START));
        assert_ne!(base, compress(&IV, &block, 0, 63, CHUNK_START));
        assert_eq!(base, compress(&IV, &block, 0, 64, CHUNK_START));
    }

    #[test]
    fn test_chaining_value_is_output_prefix() {
        let block = [7u32; 16];
        let out = compress(&IV, &block, 3, 64, 0);
        assert_eq!(first_8_words(out), out[..8]);
        assert_ne!(first_8_words(out), first_8_words(compress(&[0; 8], &block, 3, 64, 0)));
    }
}
