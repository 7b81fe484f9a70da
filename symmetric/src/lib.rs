//! A framework for symmetric cryptography primitives.

#![no_std]

mod compression;
mod hasher;
mod streaming;

pub use compression::*;
pub use hasher::*;
pub use streaming::*;
