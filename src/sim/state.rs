//! Game state and core simulation types
//!
//! One aggregate owns everything a run mutates: phase, score, resources,
//! speed, the player, every entity population, the timer queue and the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Span;
use super::player::Player;
use super::pools::{EffectKind, EntityPools, Obstacle, TransientEffect};
use super::resources::{CoilRange, Resources, ScrollSpeed};
use super::schedule::{Scheduler, TimerTask};
use crate::Viewport;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start input
    NotStarted,
    /// Active gameplay
    Running,
    /// Game is paused (rendering continues)
    Paused,
    /// Run ended, waiting for the restart input
    GameOver,
}

/// Power granted by a rune pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuneEffect {
    /// Scroll speed scaled down for a while
    Slow,
    /// Every obstacle removed
    ClearBoard,
    /// Bonus souls
    SoulBonus,
}

/// Notable happenings during a tick, for audio and HUD feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    Paused,
    Resumed,
    CoilCast(CoilRange),
    ObstacleDestroyed,
    SoulCollected,
    RuneCollected(RuneEffect),
    UltimateReady,
    UltimateActivated,
    RequiemClear { cleared: usize },
    UltimateEnded,
    SpeedIncreased,
    Collision,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Simulation ticks since the state was created (all phases)
    pub time_ticks: u64,
    /// Score
    pub score: u64,
    pub resources: Resources,
    pub speed: ScrollSpeed,
    pub player: Player,
    pub pools: EntityPools,
    pub scheduler: Scheduler,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    /// Cosmetic particle emission toggle
    pub particles_enabled: bool,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            resources: Resources::new(&tuning),
            speed: ScrollSpeed::new(&tuning.speed),
            player: Player::new(&tuning.jump),
            tuning,
            viewport: Viewport::default(),
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            score: 0,
            pools: EntityPools::default(),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            particles_enabled: true,
        };
        state.arm_periodic_timers();
        state
    }

    /// Restore every run-scoped value to its initial state. Phase, viewport,
    /// RNG and the particle toggle are left alone.
    pub fn reset(&mut self) {
        self.score = 0;
        self.resources = Resources::new(&self.tuning);
        self.speed = ScrollSpeed::new(&self.tuning.speed);
        self.player = Player::new(&self.tuning.jump);
        self.pools.clear();
        self.scheduler.clear();
        self.arm_periodic_timers();
    }

    fn arm_periodic_timers(&mut self) {
        let spawn = &self.tuning.spawn;
        let (obstacles, collectibles, ramp) = (
            spawn.obstacle_period_ticks,
            spawn.collectible_period_ticks,
            self.tuning.speed.ramp_period_ticks,
        );
        self.scheduler.schedule_in(obstacles, TimerTask::SpawnObstacles);
        self.scheduler.schedule_in(collectibles, TimerTask::SpawnCollectible);
        self.scheduler.schedule_in(ramp, TimerTask::RampSpeed);
    }

    /// Apply a viewport resize. Entities keep their lane, so nothing else moves.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Toggle cosmetic particle emission. Live particles finish their lifetime.
    pub fn set_particles_enabled(&mut self, enabled: bool) {
        self.particles_enabled = enabled;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    // === Geometry ===

    /// Player sprite left edge
    pub fn player_x(&self) -> f32 {
        let layout = &self.tuning.layout;
        self.viewport
            .lane_x(self.player.lane, layout.lane_width, layout.player_size)
    }

    /// Player top edge when grounded
    pub fn player_base_y(&self) -> f32 {
        self.viewport.height - self.tuning.layout.player_bottom_offset
    }

    /// Player vertical extent, lifted by the current jump height
    pub fn player_span(&self) -> Span {
        let top = self.player_base_y() - self.player.jump_height;
        Span::new(top, top + self.tuning.layout.player_size)
    }

    /// Center of the player sprite, jump included
    pub fn player_center(&self) -> Vec2 {
        let size = self.tuning.layout.player_size;
        Vec2::new(
            self.player_x() + size / 2.0,
            self.player_span().top + size / 2.0,
        )
    }

    pub fn obstacle_x(&self, obstacle: &Obstacle) -> f32 {
        self.viewport
            .lane_x(obstacle.lane, self.tuning.layout.lane_width, obstacle.width)
    }

    pub fn obstacle_center(&self, obstacle: &Obstacle) -> Vec2 {
        Vec2::new(
            self.viewport
                .lane_center_x(obstacle.lane, self.tuning.layout.lane_width),
            obstacle.center_y(),
        )
    }

    pub fn lane_center_x(&self, lane: usize) -> f32 {
        self.viewport
            .lane_center_x(lane, self.tuning.layout.lane_width)
    }

    // === Souls ===

    /// Add souls, raising the ready banner when the total first reaches the
    /// ultimate threshold while the ultimate is idle.
    pub fn award_souls(&mut self, amount: u32) {
        let required = self.tuning.ultimate.souls_required;
        let before = self.resources.souls;
        self.resources.souls = before.saturating_add(amount);
        if before < required && self.resources.souls >= required && !self.player.is_ultimate() {
            let center = Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
            self.pools.effects.push(TransientEffect::new(
                EffectKind::UltimateReadyBanner,
                center,
                0.0,
                self.tuning.effects.ready_banner_ticks,
            ));
            self.events.push(GameEvent::UltimateReady);
        }
    }

    /// Floating "+1" text at `pos`
    pub fn push_soul_text(&mut self, pos: Vec2) {
        let fx = &self.tuning.effects;
        self.pools.effects.push(TransientEffect::new(
            EffectKind::SoulPickupText,
            pos,
            fx.soul_text_size,
            fx.soul_text_ticks,
        ));
    }

    /// Remove every obstacle, returning how many were cleared
    pub fn clear_obstacles(&mut self) -> usize {
        let cleared = self.pools.obstacles.len();
        self.pools.obstacles.clear();
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_LANE;

    #[test]
    fn test_new_state_waits_for_start_with_timers_armed() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.player.lane, START_LANE);
        assert_eq!(state.resources.mana, 250.0);
        assert_eq!(state.scheduler.len(), 3);
    }

    #[test]
    fn test_resize_rederives_positions_from_lane() {
        let mut state = GameState::new(1);
        let before = state.player_center();
        state.resize(1000.0, 600.0);
        let after = state.player_center();
        assert_eq!(after.x, 500.0);
        assert_ne!(before, after);
        assert_eq!(state.player.lane, START_LANE);
        assert_eq!(state.player_base_y(), 400.0);
    }

    #[test]
    fn test_ready_banner_only_on_threshold_crossing() {
        let mut state = GameState::new(1);
        state.award_souls(9);
        assert!(state.pools.effects.is_empty());
        state.award_souls(1);
        assert_eq!(state.pools.effects.len(), 1);
        state.award_souls(1);
        assert_eq!(state.pools.effects.len(), 1);
        assert_eq!(state.resources.souls, 11);
    }

    #[test]
    fn test_no_ready_banner_during_ultimate() {
        let mut state = GameState::new(1);
        state.player.start_ultimate(10);
        state.award_souls(10);
        assert!(state.pools.effects.is_empty());
    }
}
