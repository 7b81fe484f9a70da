/// An incremental byte hasher with an explicit lifecycle.
///
/// Input is absorbed through any number of [`update`](StreamingHasher::update) calls and the
/// digest is produced once by [`finalize_into`](StreamingHasher::finalize_into). After
/// finalization the hasher must be [`reset`](StreamingHasher::reset) before it accepts input
/// again; implementations report misuse through `Self::Error` rather than returning stale digests.
pub trait StreamingHasher {
    type Error;

    /// The default digest length in bytes.
    const OUTPUT_LEN: usize;

    fn update(&mut self, input: &[u8]) -> Result<(), Self::Error>;

    /// Finalizes the hasher, filling all of `out`.
    ///
    /// Extendable-output hashers fill buffers of any length. Fixed-output hashers may reject a
    /// buffer whose length differs from `OUTPUT_LEN`.
    fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), Self::Error>;

    /// Returns the hasher to the state of a freshly constructed one.
    fn reset(&mut self);
}
