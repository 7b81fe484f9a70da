//! Fork-join helpers that use `rayon` when the `parallel` feature is enabled and run serially
//! otherwise.

#![no_std]

#[cfg(feature = "parallel")]
pub mod prelude {
    pub use rayon::join;
}

#[cfg(not(feature = "parallel"))]
mod serial;

#[cfg(not(feature = "parallel"))]
pub mod prelude {
    pub use super::serial::*;
}
