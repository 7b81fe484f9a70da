/// Runs `oper_a` and then `oper_b` on the calling thread.
///
/// The bounds match `rayon::join` so that callers compile identically with and without the
/// `parallel` feature.
pub fn join<A, B, RA, RB>(oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    let result_a = oper_a();
    let result_b = oper_b();
    (result_a, result_b)
}
