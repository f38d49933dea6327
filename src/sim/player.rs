//! The player: lane, jump arc and ultimate countdown

use serde::{Deserialize, Serialize};

use crate::consts::{LANE_COUNT, START_LANE};
use crate::tuning::JumpTuning;

/// Jump arc sub-state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpState {
    #[default]
    Grounded,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Lane index, always in `0..LANE_COUNT`
    pub lane: usize,
    pub jump: JumpState,
    /// Height above the base line, in `0..=max_jump_height`
    pub jump_height: f32,
    pub max_jump_height: f32,
    pub jump_speed: f32,
    /// Ultimate ticks remaining (zero when inactive)
    pub ultimate_ticks: u32,
}

impl Player {
    pub fn new(jump: &JumpTuning) -> Self {
        Self {
            lane: START_LANE,
            jump: JumpState::Grounded,
            jump_height: 0.0,
            max_jump_height: jump.max_height,
            jump_speed: jump.speed,
            ultimate_ticks: 0,
        }
    }

    pub fn move_left(&mut self) {
        self.lane = self.lane.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.lane + 1 < LANE_COUNT {
            self.lane += 1;
        }
    }

    /// Start a jump. Airborne jumps are ignored (no double jump).
    pub fn jump(&mut self) -> bool {
        if self.is_jumping() {
            return false;
        }
        self.jump = JumpState::Ascending;
        true
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jump != JumpState::Grounded
    }

    #[inline]
    pub fn is_ultimate(&self) -> bool {
        self.ultimate_ticks > 0
    }

    /// Advance the jump arc by one tick
    pub fn update_jump(&mut self) {
        match self.jump {
            JumpState::Grounded => {}
            JumpState::Ascending => {
                self.jump_height = (self.jump_height + self.jump_speed).min(self.max_jump_height);
                if self.jump_height >= self.max_jump_height {
                    self.jump = JumpState::Descending;
                }
            }
            JumpState::Descending => {
                self.jump_height -= self.jump_speed;
                if self.jump_height <= 0.0 {
                    self.jump_height = 0.0;
                    self.jump = JumpState::Grounded;
                }
            }
        }
    }

    pub fn start_ultimate(&mut self, duration: u32) {
        self.ultimate_ticks = duration;
    }

    /// Count the ultimate down. Returns true on the tick it ends.
    pub fn update_ultimate(&mut self) -> bool {
        if self.ultimate_ticks == 0 {
            return false;
        }
        self.ultimate_ticks -= 1;
        self.ultimate_ticks == 0
    }
}
