//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Tick-counted timers only (no wall clock)
//! - No rendering, audio or platform dependencies

pub mod abilities;
pub mod autopilot;
pub mod collision;
pub mod emitters;
pub mod player;
pub mod pools;
pub mod resources;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use abilities::{activate_ultimate, cast_coil};
pub use collision::{Span, obstacle_blocks_player, touches_collectible};
pub use player::{JumpState, Player};
pub use pools::{
    Coil, Collectible, CollectibleKind, Color, EffectKind, EntityPools, Obstacle, ObstacleKind,
    Particle, TransientEffect,
};
pub use resources::{CoilRange, Cooldowns, Resources, ScrollSpeed};
pub use schedule::{Scheduler, TimerTask};
pub use state::{GameEvent, GamePhase, GameState, RuneEffect};
pub use tick::{TickInput, tick};
