//! Animation task
//!
//! Cycles the palette through the field forever. Owns the LCD and the
//! frame buffer; nothing else touches either once this task starts.

use defmt::*;

use plasma_core::traits::Yielder;
use plasma_core::Animator;

use crate::board::Lcd;
use crate::channels::CYCLE_STATS;
use crate::runtime::{EmbassyClock, EmbassyYield};

/// Animation task - one palette cycle per iteration
///
/// Presentation errors are logged and the next cycle starts from the phase
/// that failed. Every `stats_every_cycles` completed cycles the timing
/// summary is handed to the monitor (0 disables reporting).
#[embassy_executor::task]
pub async fn animation_task(
    mut animator: Animator<'static, 'static>,
    mut lcd: Lcd,
    stats_every_cycles: u16,
) {
    info!("Animation task started");

    let mut yielder = EmbassyYield;
    let clock = EmbassyClock;
    let mut cycles: u32 = 0;

    loop {
        match animator.run_cycle(&mut lcd, &mut yielder, &clock).await {
            Ok(summary) => {
                cycles = cycles.wrapping_add(1);
                if stats_every_cycles != 0 && cycles % u32::from(stats_every_cycles) == 0 {
                    CYCLE_STATS.signal((cycles, summary));
                }
            }
            Err(e) => {
                warn!(
                    "Frame present failed at phase {}: {}",
                    animator.phase().value(),
                    e
                );
                yielder.yield_now().await;
            }
        }
    }
}
