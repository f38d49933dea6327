//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Per tick:
//! discrete input actions, then (while running) due timers, the player,
//! obstacles and collectibles, then cosmetic animation.

use glam::Vec2;
use rand::Rng;

use super::abilities::{self, activate_ultimate, cast_coil};
use super::autopilot;
use super::collision::{obstacle_blocks_player, touches_collectible};
use super::emitters;
use super::pools::{Collectible, CollectibleKind};
use super::schedule::TimerTask;
use super::spawn::{spawn_collectible, spawn_obstacles};
use super::state::{GameEvent, GamePhase, GameState};
use crate::input::Action;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Discrete key presses, applied in order
    pub actions: Vec<Action>,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn with(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            idle_mode: false,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    let was_running = state.is_running();
    for &action in &input.actions {
        apply_action(state, action);
    }
    if input.idle_mode {
        for action in autopilot::choose_actions(state) {
            apply_action(state, action);
        }
    }

    // A tick that starts, restarts or resumes the run only changes phase
    if was_running && state.is_running() {
        run_timers(state);
        update_player(state);
        update_obstacles(state);
        if state.is_running() {
            update_collectibles(state);
        }
    }

    if state.phase != GamePhase::NotStarted {
        update_cosmetics(state);
    }
}

/// Apply one key press, gated by the current phase
pub fn apply_action(state: &mut GameState, action: Action) {
    match (state.phase, action) {
        (GamePhase::NotStarted, Action::Start) => {
            state.phase = GamePhase::Running;
            state.events.push(GameEvent::Started);
            log::info!("Run started (seed {})", state.seed);
        }
        (GamePhase::GameOver, Action::Start) => {
            state.reset();
            state.phase = GamePhase::Running;
            state.events.push(GameEvent::Restarted);
            log::info!("Run restarted");
        }
        (GamePhase::Running, Action::Pause) => {
            state.phase = GamePhase::Paused;
            state.events.push(GameEvent::Paused);
        }
        (GamePhase::Paused, Action::Pause) => {
            state.phase = GamePhase::Running;
            state.events.push(GameEvent::Resumed);
        }
        (GamePhase::Running, Action::MoveLeft) => state.player.move_left(),
        (GamePhase::Running, Action::MoveRight) => state.player.move_right(),
        (GamePhase::Running, Action::Jump) => {
            state.player.jump();
        }
        (GamePhase::Running, Action::Cast(range)) => {
            cast_coil(state, range);
        }
        (GamePhase::Running, Action::Ultimate) => {
            activate_ultimate(state);
        }
        _ => {}
    }
}

/// Drain every timer due this tick
fn run_timers(state: &mut GameState) {
    state.scheduler.advance();
    while let Some(task) = state.scheduler.pop_due() {
        match task {
            TimerTask::SpawnObstacles => {
                spawn_obstacles(state);
                let period = state.tuning.spawn.obstacle_period_ticks;
                state.scheduler.schedule_in(period, task);
            }
            TimerTask::SpawnCollectible => {
                spawn_collectible(state);
                let period = state.tuning.spawn.collectible_period_ticks;
                state.scheduler.schedule_in(period, task);
            }
            TimerTask::RampSpeed => {
                if state.is_running() {
                    state.speed.increase(state.tuning.speed.ramp_step);
                    state.events.push(GameEvent::SpeedIncreased);
                    log::info!("Scroll speed now {:.1}", state.speed.current());
                }
                let period = state.tuning.speed.ramp_period_ticks;
                state.scheduler.schedule_in(period, task);
            }
            TimerTask::RestoreSpeed => state.speed.pop_slow(),
            TimerTask::RequiemClear => abilities::requiem_clear(state),
        }
    }
}

/// Cooldowns, mana, jump arc and ultimate countdown
fn update_player(state: &mut GameState) {
    let regen = state.tuning.mana.regen_per_tick;
    state.resources.tick(regen);
    state.player.update_jump();

    if state.player.update_ultimate() {
        state.events.push(GameEvent::UltimateEnded);
        log::info!("Requiem ended");
    }
    // Emission only while the ultimate is still live after the countdown
    if state.player.is_ultimate() {
        let chance = state.tuning.ultimate.ambient_particle_chance;
        if state.rng.random_bool(chance) {
            let center = state.player_center();
            emitters::ultimate_ring_particle(state, center);
        }
        let size = state.tuning.layout.player_size;
        let top_left = Vec2::new(state.player_x(), state.player_span().top);
        emitters::ultimate_embers(state, top_left, size);
    }
}

/// Scroll obstacles, end the run on contact, score the ones that pass
fn update_obstacles(state: &mut GameState) {
    let speed = state.speed.current();
    let floor = state.viewport.height;
    let span = state.player_span();
    let lane = state.player.lane;
    let invulnerable = state.player.is_ultimate();

    let mut collided = false;
    let mut passed = 0;
    state.pools.obstacles.retain_mut(|obs| {
        obs.y += speed;
        if obstacle_blocks_player(lane, span, invulnerable, obs) {
            collided = true;
        }
        if obs.y > floor {
            passed += 1;
            false
        } else {
            true
        }
    });
    state.score += passed;

    if collided {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Collision);
        log::info!("Game over - score {}", state.score);
    }
}

/// Scroll collectibles and apply pickups
fn update_collectibles(state: &mut GameState) {
    let speed = state.speed.current();
    let floor = state.viewport.height;
    let span = state.player_span();
    let lane = state.player.lane;

    let mut picked: Vec<Collectible> = Vec::new();
    state.pools.collectibles.retain_mut(|item| {
        item.y += speed;
        if touches_collectible(lane, span, item) {
            picked.push(item.clone());
            false
        } else {
            item.y <= floor
        }
    });

    for item in picked {
        let pos = Vec2::new(state.lane_center_x(item.lane), item.y);
        match item.kind {
            CollectibleKind::Soul => {
                state.push_soul_text(pos);
                state.events.push(GameEvent::SoulCollected);
                state.award_souls(1);
            }
            CollectibleKind::Rune => {
                abilities::apply_rune(state, pos);
            }
        }
    }
}

/// Live particles, effects and coils keep animating while paused or over.
/// Nothing new is emitted here.
fn update_cosmetics(state: &mut GameState) {
    state.pools.advance_particles();
    state.pools.advance_effects();
    state.pools.advance_coils();
}
