//! The BLAKE3 hash function: a streaming hash built on a binary Merkle tree of 1 KiB chunks.
//!
//! [`Hasher`] absorbs input incrementally and produces either the default 32-byte [`Hash`] or an
//! arbitrary amount of extended output through an [`OutputReader`]. [`hash`] and [`Blake3`] are
//! one-shot conveniences on top of it.

#![no_std]

extern crate alloc;

mod chunk;
mod compress;
mod constants;
mod error;
mod hash;
mod hasher;
mod output;
mod parallel;
mod tree;

use alloc::vec::Vec;

use arbor_symmetric::CryptographicHasher;
use arbor_util::apply_to_chunks;
pub use compress::*;
pub use constants::{
    BLOCK_LEN, CHUNK_END, CHUNK_LEN, CHUNK_START, MAX_DEPTH, MAX_OUTPUT_LEN, OUT_LEN, PARENT, ROOT,
};
pub use error::*;
pub use hash::Hash;
pub use hasher::*;
pub use output::OutputReader;
pub use tree::ParentCompression;

/// Hashes `input` in one call.
#[must_use]
pub fn hash(input: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.absorb(input);
    hasher.root_output().root_hash()
}

/// Hashes `input` in one call and returns `len` bytes of extended output.
pub fn hash_extended(input: &[u8], len: usize) -> HasherResult<Vec<u8>> {
    let mut hasher = Hasher::new();
    hasher.absorb(input);
    hasher.finalize_extended(len)
}

/// The BLAKE3 hash function as a stateless [`CryptographicHasher`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Blake3;

impl CryptographicHasher<u8, [u8; OUT_LEN]> for Blake3 {
    fn hash_iter<I>(&self, input: I) -> [u8; OUT_LEN]
    where
        I: IntoIterator<Item = u8>,
    {
        const BUFLEN: usize = 512;
        let mut hasher = Hasher::new();
        apply_to_chunks::<BUFLEN, _, _>(input, |buf| hasher.absorb(buf));
        hasher.root_output().root_hash().into()
    }

    fn hash_iter_slices<'a, I>(&self, input: I) -> [u8; OUT_LEN]
    where
        I: IntoIterator<Item = &'a [u8]>,
        u8: 'a,
    {
        let mut hasher = Hasher::new();
        for chunk in input {
            hasher.absorb(chunk);
        }
        hasher.root_output().root_hash().into()
    }
}
