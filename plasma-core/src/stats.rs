//! Frame timing statistics
//!
//! Instrumentation only. Nothing in the animation depends on these numbers.

/// Timing of a single animation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Phase the frame was drawn with
    pub phase: u8,
    /// Time spent colorizing the frame buffer (ms)
    pub render_ms: u32,
    /// Time spent pushing the frame to the display (ms)
    pub present_ms: u32,
}

impl StepReport {
    /// Total step time (ms)
    pub fn total_ms(&self) -> u32 {
        self.render_ms.saturating_add(self.present_ms)
    }
}

/// Min/max/total of one duration series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Span {
    pub min_ms: u32,
    pub max_ms: u32,
    pub total_ms: u32,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            min_ms: u32::MAX,
            max_ms: 0,
            total_ms: 0,
        }
    }
}

impl Span {
    fn record(&mut self, ms: u32) {
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
        self.total_ms = self.total_ms.saturating_add(ms);
    }

    /// Average over `count` samples (0 when empty)
    pub fn average_ms(&self, count: u32) -> u32 {
        if count == 0 {
            0
        } else {
            self.total_ms / count
        }
    }
}

/// Summary of a run of frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleSummary {
    /// Frames recorded
    pub frames: u32,
    /// Colorize durations
    pub render: Span,
    /// Present durations
    pub present: Span,
    /// Wall time from first to last frame, including yields (ms)
    pub elapsed_ms: u32,
}

impl CycleSummary {
    /// Frames per second × 10, from wall time
    pub fn fps_x10(&self) -> u32 {
        if self.elapsed_ms == 0 {
            0
        } else {
            self.frames.saturating_mul(10_000) / self.elapsed_ms
        }
    }
}

/// Accumulator for step reports
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    summary: CycleSummary,
    started_ms: Option<u64>,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of the measured run
    pub fn start(&mut self, now_ms: u64) {
        self.started_ms = Some(now_ms);
    }

    /// Add a step
    pub fn record(&mut self, report: &StepReport) {
        self.summary.frames += 1;
        self.summary.render.record(report.render_ms);
        self.summary.present.record(report.present_ms);
    }

    /// Snapshot the run ending at `now_ms` and start a fresh one
    pub fn finish(&mut self, now_ms: u64) -> CycleSummary {
        let mut summary = self.summary;
        if let Some(start) = self.started_ms {
            summary.elapsed_ms = elapsed_ms(start, now_ms);
        }
        *self = Self::default();
        summary
    }
}

/// Milliseconds between two clock readings, clamped to `u32`
pub fn elapsed_ms(start_ms: u64, end_ms: u64) -> u32 {
    u32::try_from(end_ms.saturating_sub(start_ms)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(render_ms: u32, present_ms: u32) -> StepReport {
        StepReport {
            phase: 0,
            render_ms,
            present_ms,
        }
    }

    #[test]
    fn test_empty_summary() {
        let mut stats = FrameStats::new();
        let summary = stats.finish(100);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.render.average_ms(summary.frames), 0);
        assert_eq!(summary.fps_x10(), 0);
    }

    #[test]
    fn test_min_max_average() {
        let mut stats = FrameStats::new();
        stats.start(1_000);
        stats.record(&report(10, 50));
        stats.record(&report(14, 46));
        stats.record(&report(12, 54));

        let summary = stats.finish(1_200);
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.render.min_ms, 10);
        assert_eq!(summary.render.max_ms, 14);
        assert_eq!(summary.render.average_ms(3), 12);
        assert_eq!(summary.present.min_ms, 46);
        assert_eq!(summary.present.max_ms, 54);
        assert_eq!(summary.present.average_ms(3), 50);
        assert_eq!(summary.elapsed_ms, 200);
        // 3 frames in 200ms = 15.0 fps
        assert_eq!(summary.fps_x10(), 150);
    }

    #[test]
    fn test_finish_resets() {
        let mut stats = FrameStats::new();
        stats.start(0);
        stats.record(&report(1, 1));
        let _ = stats.finish(10);
        let empty = stats.finish(20);
        assert_eq!(empty.frames, 0);
        assert_eq!(empty.elapsed_ms, 0);
    }

    #[test]
    fn test_elapsed_clamps() {
        assert_eq!(elapsed_ms(10, 5), 0);
        assert_eq!(elapsed_ms(0, u64::MAX), u32::MAX);
        assert_eq!(report(3, 4).total_ms(), 7);
    }
}
