//! Fixed timestep accumulator
//!
//! Turns variable frame deltas from the host's frame callback into whole
//! simulation ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta honoured (a stalled tab shouldn't fast-forward).
/// Longer than `MAX_SUBSTEPS` ticks, so the substep cap is what binds.
const MAX_FRAME_DT: f32 = 0.25;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed seconds; returns how many ticks to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop the backlog if we hit the cap
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Fraction of a tick left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_frame_at_sixty_hz_is_one_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(SIM_DT * 1.01), 1);
        assert!(clock.alpha() < 0.1);
    }

    #[test]
    fn test_slow_frames_are_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        // Backlog beyond the cap is dropped, not replayed next frame
        assert!(clock.alpha() <= 1.0);
        assert_eq!(clock.advance(0.0), 1);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_clamp_allows_more_than_the_cap() {
        assert!(MAX_FRAME_DT > MAX_SUBSTEPS as f32 * SIM_DT);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(SIM_DT * 0.6), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
    }
}
