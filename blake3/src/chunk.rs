use arbor_util::words_from_le_bytes;

use crate::compress::{ChainingValue, compress, first_8_words};
use crate::constants::{BLOCK_LEN, CHUNK_END, CHUNK_LEN, CHUNK_START, IV};
use crate::output::Output;

/// The state of one chunk being absorbed.
///
/// The most recent block is always kept in the buffer, even when full, because it is not known
/// to be the chunk's last block (which carries `CHUNK_END`) until more input arrives.
#[derive(Clone, Debug)]
pub(crate) struct ChunkState {
    cv: ChainingValue,
    counter: u64,
    block: [u8; BLOCK_LEN],
    block_len: u8,
    blocks_compressed: u8,
}

impl ChunkState {
    pub(crate) const fn new(counter: u64) -> Self {
        Self {
            cv: IV,
            counter,
            block: [0; BLOCK_LEN],
            block_len: 0,
            blocks_compressed: 0,
        }
    }

    /// The index of this chunk in the stream.
    pub(crate) const fn counter(&self) -> u64 {
        self.counter
    }

    /// The number of bytes absorbed into this chunk so far.
    pub(crate) const fn len(&self) -> usize {
        BLOCK_LEN * self.blocks_compressed as usize + self.block_len as usize
    }

    const fn start_flag(&self) -> u32 {
        if self.blocks_compressed == 0 {
            CHUNK_START
        } else {
            0
        }
    }

    /// Absorbs `input`, which must fit in the remainder of the chunk.
    pub(crate) fn update(&mut self, mut input: &[u8]) {
        debug_assert!(self.len() + input.len() <= CHUNK_LEN, "chunk overflow");
        while !input.is_empty() {
            if self.block_len as usize == BLOCK_LEN {
                let block_words = words_from_le_bytes(&self.block);
                self.cv = first_8_words(compress(
                    &self.cv,
                    &block_words,
                    self.counter,
                    BLOCK_LEN as u32,
                    self.start_flag(),
                ));
                self.blocks_compressed += 1;
                self.block = [0; BLOCK_LEN];
                self.block_len = 0;
            }

            let take = (BLOCK_LEN - self.block_len as usize).min(input.len());
            self.block[self.block_len as usize..][..take].copy_from_slice(&input[..take]);
            self.block_len += take as u8;
            input = &input[take..];
        }
    }

    /// The node for this chunk, treating what has been absorbed so far as the whole chunk.
    pub(crate) fn output(&self) -> Output {
        Output::new(
            self.cv,
            words_from_le_bytes(&self.block),
            self.counter,
            self.block_len as u32,
            self.start_flag() | CHUNK_END,
        )
    }
}

/// Hashes one complete, non-root chunk to its chaining value.
pub(crate) fn chunk_cv(input: &[u8], counter: u64) -> ChainingValue {
    let mut state = ChunkState::new(counter);
    state.update(input);
    state.output().chaining_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(len: usize) -> alloc::vec::Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_empty_chunk() {
        let state = ChunkState::new(0);
        assert_eq!(state.len(), 0);

        let output = state.output();
        assert_eq!(output.flags(), CHUNK_START | CHUNK_END);
        assert_eq!(output.block_len(), 0);
        assert_eq!(output.counter(), 0);
    }

    #[test]
    fn test_last_block_stays_buffered() {
        let mut state = ChunkState::new(5);
        state.update(&input(CHUNK_LEN));
        assert_eq!(state.len(), CHUNK_LEN);
        assert_eq!(state.blocks_compressed, 15);

        let output = state.output();
        assert_eq!(output.flags(), CHUNK_END);
        assert_eq!(output.block_len(), BLOCK_LEN as u32);
        assert_eq!(output.counter(), 5);
    }

    #[test]
    fn test_single_full_block_keeps_start_flag() {
        let mut state = ChunkState::new(0);
        state.update(&input(BLOCK_LEN));
        assert_eq!(state.blocks_compressed, 0);
        assert_eq!(state.output().flags(), CHUNK_START | CHUNK_END);

        state.update(&[0xAA]);
        assert_eq!(state.blocks_compressed, 1);
        assert_eq!(state.output().flags(), CHUNK_END);
        assert_eq!(state.output().block_len(), 1);
    }

    #[test]
    fn test_split_updates_match() {
        let data = input(CHUNK_LEN);
        for split in [0, 1, 63, 64, 65, 500, 1023, 1024] {
            let mut state = ChunkState::new(3);
            state.update(&data[..split]);
            state.update(&data[split..]);
            assert_eq!(state.output().chaining_value(), chunk_cv(&data, 3));
        }
    }

    #[test]
    fn test_counter_changes_chaining_value() {
        let data = input(CHUNK_LEN);
        assert_ne!(chunk_cv(&data, 0), chunk_cv(&data, 1));
    }
}
