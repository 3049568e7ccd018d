//! Scheduler and clock services of the host runtime

/// Cooperative yield to the executor
///
/// Lets other tasks run between frames. Carries no data and cannot fail.
#[allow(async_fn_in_trait)]
pub trait Yielder {
    async fn yield_now(&mut self);
}

/// Monotonic millisecond clock
///
/// Only used for frame timing statistics.
pub trait MonotonicClock {
    fn now_ms(&self) -> u64;
}
