use arbor_util::write_le_words;

use crate::compress::{ChainingValue, compress, first_8_words};
use crate::constants::{BLOCK_LEN, IV, OUT_LEN, PARENT, ROOT};
use crate::hash::Hash;

/// A node of the hash tree, captured just before its final compression.
///
/// Every chunk or parent node can either be compressed to a chaining value for its parent, or,
/// if it turns out to be the root, compressed with [`ROOT`] set any number of times to produce
/// output bytes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Output {
    input_cv: ChainingValue,
    block_words: [u32; 16],
    counter: u64,
    block_len: u32,
    flags: u32,
}

impl Output {
    pub(crate) const fn new(
        input_cv: ChainingValue,
        block_words: [u32; 16],
        counter: u64,
        block_len: u32,
        flags: u32,
    ) -> Self {
        Self {
            input_cv,
            block_words,
            counter,
            block_len,
            flags,
        }
    }

    /// The node whose block is the concatenation of two child chaining values.
    pub(crate) fn parent(left: &ChainingValue, right: &ChainingValue) -> Self {
        let mut block_words = [0u32; 16];
        block_words[..8].copy_from_slice(left);
        block_words[8..].copy_from_slice(right);
        Self::new(IV, block_words, 0, BLOCK_LEN as u32, PARENT)
    }

    pub(crate) fn chaining_value(&self) -> ChainingValue {
        first_8_words(compress(
            &self.input_cv,
            &self.block_words,
            self.counter,
            self.block_len,
            self.flags,
        ))
    }

    /// Output block `output_block_counter` of this node as the root.
    pub(crate) fn root_output_block(&self, output_block_counter: u64) -> [u8; BLOCK_LEN] {
        let words = compress(
            &self.input_cv,
            &self.block_words,
            output_block_counter,
            self.block_len,
            self.flags | ROOT,
        );
        let mut out = [0u8; BLOCK_LEN];
        write_le_words(&words, &mut out);
        out
    }

    pub(crate) fn root_hash(&self) -> Hash {
        let block = self.root_output_block(0);
        let mut digest = [0u8; OUT_LEN];
        digest.copy_from_slice(&block[..OUT_LEN]);
        digest.into()
    }

    #[cfg(test)]
    pub(crate) const fn flags(&self) -> u32 {
        self.flags
    }

    #[cfg(test)]
    pub(crate) const fn block_len(&self) -> u32 {
        self.block_len
    }

    #[cfg(test)]
    pub(crate) const fn counter(&self) -> u64 {
        self.counter
    }
}

/// A seekable reader over the extended output of a finalized hasher.
///
/// The output is a keystream of `2^64` blocks of 64 bytes each, produced by compressing the root
/// node with an increasing output block counter. Its first 32 bytes are the default digest.
#[derive(Clone, Debug)]
pub struct OutputReader {
    inner: Output,
    block_counter: u64,
    position_within_block: u8,
}

impl OutputReader {
    pub(crate) const fn new(inner: Output) -> Self {
        Self {
            inner,
            block_counter: 0,
            position_within_block: 0,
        }
    }

    /// Fills `buf` with the next `buf.len()` output bytes and advances the position.
    ///
    /// After the last of the `2^64` output blocks the stream starts over at block 0.
    pub fn fill(&mut self, buf: &mut [u8]) {
        let mut filled = 0;
        while filled < buf.len() {
            let block = self.inner.root_output_block(self.block_counter);
            let offset = self.position_within_block as usize;
            let take = (BLOCK_LEN - offset).min(buf.len() - filled);
            buf[filled..filled + take].copy_from_slice(&block[offset..offset + take]);
            filled += take;
            self.position_within_block += take as u8;
            if self.position_within_block as usize == BLOCK_LEN {
                self.block_counter = self.block_counter.wrapping_add(1);
                self.position_within_block = 0;
            }
        }
    }

    /// The byte offset of the next byte `fill` will produce, modulo `2^64`.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.block_counter
            .wrapping_mul(BLOCK_LEN as u64)
            .wrapping_add(self.position_within_block as u64)
    }

    /// Seeks to an absolute byte offset in the output stream.
    pub const fn set_position(&mut self, position: u64) {
        self.block_counter = position / BLOCK_LEN as u64;
        self.position_within_block = (position % BLOCK_LEN as u64) as u8;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::chunk::ChunkState;

    fn sample_output() -> Output {
        let mut state = ChunkState::new(0);
        state.update(b"output expansion");
        state.output()
    }

    #[test]
    fn test_root_hash_is_first_output_bytes() {
        let output = sample_output();
        let mut reader = OutputReader::new(output);
        let mut buf = [0u8; OUT_LEN];
        reader.fill(&mut buf);
        assert_eq!(output.root_hash(), buf);
        assert_eq!(reader.position(), OUT_LEN as u64);
    }

    #[test]
    fn test_root_differs_from_chaining_value() {
        let output = sample_output();
        let mut cv_bytes = [0u8; OUT_LEN];
        write_le_words(&output.chaining_value(), &mut cv_bytes);
        assert_ne!(output.root_hash(), cv_bytes);
    }

    #[test]
    fn test_piecewise_fill_matches_single_fill() {
        let mut whole = vec![0u8; 300];
        OutputReader::new(sample_output()).fill(&mut whole);

        let mut reader = OutputReader::new(sample_output());
        let mut pieces = vec![0u8; 300];
        let mut start = 0;
        for len in [1, 31, 32, 64, 65, 7, 100] {
            reader.fill(&mut pieces[start..start + len]);
            start += len;
        }
        assert_eq!(start, 300);
        assert_eq!(pieces, whole);
    }

    #[test]
    fn test_seek() {
        let mut whole = vec![0u8; 256];
        OutputReader::new(sample_output()).fill(&mut whole);

        let mut reader = OutputReader::new(sample_output());
        for position in [0usize, 1, 63, 64, 100, 191, 200] {
            reader.set_position(position as u64);
            let mut buf = [0u8; 40];
            reader.fill(&mut buf);
            assert_eq!(buf[..], whole[position..position + 40]);
            assert_eq!(reader.position(), position as u64 + 40);
        }
    }

    #[test]
    fn test_fill_across_last_byte_offset() {
        let output = sample_output();
        let mut reader = OutputReader::new(output);
        reader.set_position(u64::MAX - 1);
        assert_eq!(reader.position(), u64::MAX - 1);

        let mut buf = [0u8; 4];
        reader.fill(&mut buf);

        let last_addressable = output.root_output_block(u64::MAX / BLOCK_LEN as u64);
        let next = output.root_output_block(u64::MAX / BLOCK_LEN as u64 + 1);
        assert_eq!(buf[..2], last_addressable[BLOCK_LEN - 2..]);
        assert_eq!(buf[2..], next[..2]);
        // The byte offset is reported modulo 2^64.
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn test_fill_wraps_after_last_block() {
        let output = sample_output();
        let mut reader = OutputReader::new(output);
        // Block 2^64 - 1 lies beyond any byte offset `set_position` can express.
        reader.block_counter = u64::MAX;

        let mut buf = [0u8; BLOCK_LEN + 3];
        reader.fill(&mut buf);
        assert_eq!(buf[..BLOCK_LEN], output.root_output_block(u64::MAX));
        assert_eq!(buf[BLOCK_LEN..], output.root_output_block(0)[..3]);
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_output_blocks_use_counter() {
        let output = sample_output();
        assert_ne!(output.root_output_block(0), output.root_output_block(1));
    }
}
