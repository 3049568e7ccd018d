//! Inter-task communication
//!
//! The animation task publishes timing summaries; the main task logs them.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use plasma_core::stats::CycleSummary;

/// Latest palette cycle timing, with the number of cycles completed so far
///
/// A newer summary overwrites one the monitor has not read yet.
pub static CYCLE_STATS: Signal<CriticalSectionRawMutex, (u32, CycleSummary)> = Signal::new();
