//! Hash algorithm objects with the initialize / hash core / hash final lifecycle that host
//! checksum interfaces expect, forwarding to an owned streaming hasher.

#![no_std]

extern crate alloc;

mod algorithm;
mod error;

pub use algorithm::*;
pub use error::*;

/// BLAKE3 with the default 32-byte digest.
pub type Blake3Checksum = HashAlgorithmAdapter<arbor_blake3::Hasher>;
