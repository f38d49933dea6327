//! Requiem Runner - A three-lane arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, jumps, coils, spawns, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences and key bindings
//! - `input`: Key name to action mapping
//! - `audio`: Fire-and-forget sound cues behind a swappable backend
//! - `render`: Read-only rendering boundary (asset fallbacks, view helpers)
//! - `frame_clock`: Fixed timestep accumulator for the host frame callback

pub mod audio;
pub mod frame_clock;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per display frame at 60 Hz)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of lanes obstacles and collectibles travel down
    pub const LANE_COUNT: usize = 3;
    /// Lane the player starts (and restarts) in
    pub const START_LANE: usize = 1;

    /// Default viewport used by headless runs and tests
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;
}

/// Convert a duration in milliseconds to whole simulation ticks
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    (ms as u64 * consts::TICKS_PER_SECOND as u64).div_ceil(1000)
}

/// Canvas dimensions. Lane pixel geometry is always derived from this plus a
/// lane index, so a resize never has to touch stored entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_VIEWPORT_WIDTH,
            height: consts::DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Left edge of the lane strip (lanes are centered horizontally)
    #[inline]
    pub fn lanes_left(&self, lane_width: f32) -> f32 {
        (self.width - lane_width * consts::LANE_COUNT as f32) / 2.0
    }

    /// Left x of an entity of `entity_width` centered in `lane`
    #[inline]
    pub fn lane_x(&self, lane: usize, lane_width: f32, entity_width: f32) -> f32 {
        self.lanes_left(lane_width) + lane as f32 * lane_width + (lane_width - entity_width) / 2.0
    }

    /// Horizontal center of `lane`
    #[inline]
    pub fn lane_center_x(&self, lane: usize, lane_width: f32) -> f32 {
        self.lanes_left(lane_width) + lane as f32 * lane_width + lane_width / 2.0
    }
}
