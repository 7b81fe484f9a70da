use arbor_symmetric::{CompressionFunction, PseudoCompressionFunction};

use crate::compress::ChainingValue;
use crate::constants::MAX_DEPTH;
use crate::output::Output;

/// The 2-to-1 compression that joins two sibling subtrees into their parent's chaining value.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParentCompression;

impl PseudoCompressionFunction<ChainingValue, 2> for ParentCompression {
    fn compress(&self, [left, right]: [ChainingValue; 2]) -> ChainingValue {
        Output::parent(&left, &right).chaining_value()
    }
}

impl CompressionFunction<ChainingValue, 2> for ParentCompression {}

/// The roots of the complete subtrees that are still waiting for a right sibling.
///
/// Entries are ordered bottom to top by strictly decreasing level, where the level of a subtree
/// is `log_2` of the number of chunks under it. After `n` chunks have been pushed there is exactly
/// one entry per set bit of `n`, which is what fixes the tree shape.
#[derive(Clone, Debug)]
pub(crate) struct SubtreeStack {
    cvs: [ChainingValue; MAX_DEPTH],
    levels: [u8; MAX_DEPTH],
    len: usize,
}

impl SubtreeStack {
    pub(crate) const fn new() -> Self {
        Self {
            cvs: [[0; 8]; MAX_DEPTH],
            levels: [0; MAX_DEPTH],
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn clear(&mut self) {
        self.len = 0;
    }

    /// Pushes the chaining value of one chunk that is known not to be the last one.
    pub(crate) fn push_chunk(&mut self, cv: ChainingValue) {
        self.push_subtree(cv, 0);
    }

    /// Pushes the root of a complete subtree of `2^level` chunks that is known not to contain the
    /// last chunk, merging it with equally sized subtrees to its left.
    pub(crate) fn push_subtree(&mut self, mut cv: ChainingValue, mut level: u8) {
        while self.len > 0 && self.levels[self.len - 1] == level {
            self.len -= 1;
            cv = ParentCompression.compress([self.cvs[self.len], cv]);
            level += 1;
        }
        debug_assert!(
            self.len == 0 || self.levels[self.len - 1] > level,
            "subtrees must arrive largest first"
        );
        self.cvs[self.len] = cv;
        self.levels[self.len] = level;
        self.len += 1;
    }

    /// Folds the waiting subtrees, right to left, onto the node of the final chunk.
    ///
    /// The result is the root node, not yet compressed; only the output compressions apply the
    /// `ROOT` flag.
    pub(crate) fn finalize(&self, last: Output) -> Output {
        self.cvs[..self.len]
            .iter()
            .rev()
            .fold(last, |right, left| {
                Output::parent(left, &right.chaining_value())
            })
    }

    #[cfg(test)]
    fn levels(&self) -> &[u8] {
        &self.levels[..self.len]
    }
}
