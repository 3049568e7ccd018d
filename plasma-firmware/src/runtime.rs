//! Embassy implementations of the core scheduling traits

use embassy_time::Instant;

use plasma_core::traits::{MonotonicClock, Yielder};

/// Yields to the embassy executor
pub struct EmbassyYield;

impl Yielder for EmbassyYield {
    async fn yield_now(&mut self) {
        embassy_futures::yield_now().await;
    }
}

/// Milliseconds since boot from the embassy time driver
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
