//! Various simple utilities.

#![no_std]

/// Computes `log_2(n)`
///
/// # Panics
/// Panics if `n` is not a power of two.
#[must_use]
#[inline]
pub fn log2_strict_usize(n: usize) -> usize {
    let res = n.trailing_zeros();
    assert_eq!(n.wrapping_shr(res), 1, "Not a power of two: {n}");
    res as usize
}

/// Returns the largest power of two less than or equal to `n`.
///
/// # Panics
/// Panics if `n` is zero.
#[must_use]
#[inline]
pub const fn largest_power_of_two_leq(n: usize) -> usize {
    assert!(n != 0, "no power of two is <= 0");
    1 << (usize::BITS - 1 - n.leading_zeros())
}

/// Reads `N` little-endian `u32` words from `bytes`.
///
/// `bytes` must hold exactly `4 * N` bytes. Callers zero-pad short blocks before calling this.
#[must_use]
#[inline]
pub fn words_from_le_bytes<const N: usize>(bytes: &[u8]) -> [u32; N] {
    debug_assert_eq!(bytes.len(), 4 * N);
    let mut words = [0u32; N];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Writes `words` into `out` as little-endian bytes.
///
/// Only `min(out.len() / 4, words.len())` words are written; a trailing partial word is ignored.
#[inline]
pub fn write_le_words(words: &[u32], out: &mut [u8]) {
    for (word, chunk) in words.iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

/// Split an iterator into small arrays and apply `func` to each.
///
/// Repeatedly read `BUFLEN` elements from `input` into a stack buffer and
/// pass the filled part to `func` as a slice. If less than `BUFLEN`
/// elements are remaining, that smaller slice is passed to `func` (if
/// it is non-empty) and the function returns.
#[inline]
pub fn apply_to_chunks<const BUFLEN: usize, I, H>(input: I, mut func: H)
where
    I: IntoIterator<Item = u8>,
    H: FnMut(&[u8]),
{
    let mut iter = input.into_iter();
    let mut buf = [0u8; BUFLEN];
    loop {
        let mut n = 0;
        for (slot, byte) in buf.iter_mut().zip(&mut iter) {
            *slot = byte;
            n += 1;
        }
        if n == 0 {
            break;
        }
        func(&buf[..n]);
        if n < BUFLEN {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn test_log2_strict_usize() {
        assert_eq!(log2_strict_usize(1), 0);
        assert_eq!(log2_strict_usize(1024), 10);
        assert_eq!(log2_strict_usize(1 << 40), 40);
    }

    #[test]
    #[should_panic]
    fn test_log2_strict_usize_not_power_of_two() {
        let _ = log2_strict_usize(3);
    }

    #[test]
    fn test_largest_power_of_two_leq() {
        assert_eq!(largest_power_of_two_leq(1), 1);
        assert_eq!(largest_power_of_two_leq(2), 2);
        assert_eq!(largest_power_of_two_leq(3), 2);
        assert_eq!(largest_power_of_two_leq(1023), 512);
        assert_eq!(largest_power_of_two_leq(1024), 1024);
        assert_eq!(largest_power_of_two_leq(1025), 1024);
        assert_eq!(largest_power_of_two_leq(usize::MAX), 1 << (usize::BITS - 1));
    }

    #[test]
    fn test_le_words() {
        let bytes: [u8; 8] = [0x67, 0xe6, 0x09, 0x6a, 0x85, 0xae, 0x67, 0xbb];
        let words: [u32; 2] = words_from_le_bytes(&bytes);
        assert_eq!(words, [0x6A09E667, 0xBB67AE85]);

        let mut out = [0u8; 8];
        write_le_words(&words, &mut out);
        assert_eq!(out, bytes);

        // Short output buffers only receive whole words.
        let mut short = [0xffu8; 6];
        write_le_words(&words, &mut short);
        assert_eq!(short, [0x67, 0xe6, 0x09, 0x6a, 0xff, 0xff]);
    }

    #[test]
    fn test_apply_to_chunks() {
        let mut lens = Vec::new();
        let mut seen = Vec::new();
        apply_to_chunks::<4, _, _>(0u8..10, |buf| {
            lens.push(buf.len());
            seen.extend_from_slice(buf);
        });
        assert_eq!(lens, [4, 4, 2]);
        assert_eq!(seen, (0u8..10).collect::<Vec<_>>());

        let mut calls = 0;
        apply_to_chunks::<4, _, _>(core::iter::empty(), |_| calls += 1);
        assert_eq!(calls, 0);

        lens.clear();
        apply_to_chunks::<4, _, _>(0u8..8, |buf| lens.push(buf.len()));
        assert_eq!(lens, [4, 4]);
    }
}
