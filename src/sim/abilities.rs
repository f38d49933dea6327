//! Coils, the ultimate and rune powers
//!
//! Casts are validated up front; a rejected cast changes nothing and raises
//! no event.

use glam::Vec2;
use rand::Rng;

use super::collision::coil_hits;
use super::emitters;
use super::pools::{Coil, Color, EffectKind, TransientEffect};
use super::resources::CoilRange;
use super::schedule::TimerTask;
use super::state::{GameEvent, GameState, RuneEffect};

/// Raze tint shared by every range
const COIL_COLOR: Color = Color::rgba(184, 11, 11, 0.8);

/// Cast a coil at `range`. Returns the number of obstacles destroyed, or
/// `None` if the cast was rejected (not running, cooling down, or short on
/// mana).
pub fn cast_coil(state: &mut GameState, range: CoilRange) -> Option<usize> {
    if !state.is_running() {
        return None;
    }
    let coils = &state.tuning.coils;
    let params = coils.range(range);
    let (cost, cooldown, offset) = (params.cost, params.cooldown_ticks, params.forward_offset);
    let (expansion, lifetime, fade) = (coils.expansion_per_tick, coils.lifetime_ticks, coils.fade_per_tick);
    let radius = state.tuning.coil_radius();

    if !state.resources.spend_for_cast(range, cost, cooldown) {
        return None;
    }

    let origin = Vec2::new(
        state.player_x() + state.tuning.layout.player_size / 2.0,
        state.player_span().top - offset,
    );
    state.pools.coils.push(Coil {
        range,
        origin,
        radius: 0.0,
        max_radius: radius,
        expansion,
        color: COIL_COLOR,
        life: lifetime,
        alpha: 1.0,
        fade,
    });
    state.events.push(GameEvent::CoilCast(range));

    let destroyed = resolve_coil_hits(state, origin, radius);
    log::debug!(
        "Cast {} coil at ({:.0}, {:.0}), destroyed {destroyed}",
        range.as_str(),
        origin.x,
        origin.y
    );
    Some(destroyed)
}

/// Destroy every obstacle the coil reaches, one soul and one point each
fn resolve_coil_hits(state: &mut GameState, origin: Vec2, radius: f32) -> usize {
    let (hit, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.pools.obstacles)
        .into_iter()
        .partition(|obs| coil_hits(origin, radius, state.obstacle_center(obs), obs.width));
    state.pools.obstacles = kept;

    for obs in &hit {
        let top_left = Vec2::new(state.obstacle_x(obs), obs.y);
        emitters::hit_sparks(state, top_left, obs.width, obs.height);
        state.award_souls(1);
        state.score += 1;
        state.events.push(GameEvent::ObstacleDestroyed);
    }
    hit.len()
}

/// Activate the ultimate. Requires a full soul meter and an idle ultimate.
pub fn activate_ultimate(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    let ult = &state.tuning.ultimate;
    if state.resources.souls < ult.souls_required || state.player.is_ultimate() {
        return false;
    }
    let (duration, delay) = (ult.duration_ticks, ult.clear_delay_ticks);

    state.player.start_ultimate(duration);
    state.resources.souls = 0;
    let overlay = TransientEffect::new(
        EffectKind::RequiemOverlay,
        state.player_center(),
        300.0,
        delay.min(u32::MAX as u64) as u32,
    );
    state.pools.effects.push(overlay);
    state.scheduler.schedule_in(delay, TimerTask::RequiemClear);
    state.events.push(GameEvent::UltimateActivated);
    log::info!("Requiem activated, board clears in {delay} ticks");
    true
}

/// The ultimate's delayed board clear: every obstacle goes, with a burst
/// around the player
pub fn requiem_clear(state: &mut GameState) {
    let cleared = state.clear_obstacles();
    let mut center = state.player_center();
    // Burst is anchored to the grounded sprite
    center.y += state.player.jump_height;
    emitters::requiem_explosion(state, center);
    state.events.push(GameEvent::RequiemClear { cleared });
    log::info!("Requiem cleared {cleared} obstacles");
}

/// Apply a rune pickup at `pickup_pos` (the collectible's top center)
pub fn apply_rune(state: &mut GameState, pickup_pos: Vec2) -> RuneEffect {
    let effect = match state.rng.random_range(0..3) {
        0 => RuneEffect::Slow,
        1 => RuneEffect::ClearBoard,
        _ => RuneEffect::SoulBonus,
    };
    match effect {
        RuneEffect::Slow => {
            state.speed.push_slow();
            let ticks = state.tuning.speed.slow_ticks;
            state.scheduler.schedule_in(ticks, TimerTask::RestoreSpeed);
        }
        RuneEffect::ClearBoard => {
            state.clear_obstacles();
        }
        RuneEffect::SoulBonus => {
            let bonus = state.tuning.spawn.rune_soul_bonus;
            state.award_souls(bonus);
            for i in 0..bonus {
                let spread = (i as f32 - (bonus as f32 - 1.0) / 2.0) * 20.0;
                state.push_soul_text(pickup_pos + Vec2::new(spread, 0.0));
            }
        }
    }
    state.events.push(GameEvent::RuneCollected(effect));
    log::debug!("Rune collected: {effect:?}");
    effect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pools::{EffectKind, Obstacle, ObstacleKind};
    use crate::sim::state::GamePhase;

    fn running() -> GameState {
        let mut state = GameState::new(42);
        state.phase = GamePhase::Running;
        state
    }

    fn obstacle(lane: usize, y: f32) -> Obstacle {
        Obstacle {
            lane,
            y,
            width: 130.0,
            height: 130.0,
            kind: ObstacleKind::Creep,
        }
    }

    #[test]
    fn test_close_coil_spends_mana_and_destroys_in_radius() {
        let mut state = running();
        state.resources.mana = 250.0;
        // Origin is (640, 550); lane 1 obstacle centered 85 above it is hit
        state.pools.obstacles.push(obstacle(1, 400.0));
        // Far out of reach in the same lane
        state.pools.obstacles.push(obstacle(1, 0.0));
        // Adjacent lane, 200 px away horizontally
        state.pools.obstacles.push(obstacle(0, 400.0));

        let destroyed = cast_coil(&mut state, CoilRange::Close);
        assert_eq!(destroyed, Some(1));
        assert_eq!(state.resources.mana, 200.0);
        assert_eq!(state.resources.cooldowns.close, 120);
        assert_eq!(state.resources.souls, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.pools.obstacles.len(), 2);
        assert_eq!(state.pools.coils.len(), 1);
        assert_eq!(state.pools.coils[0].origin, Vec2::new(640.0, 550.0));
        assert_eq!(state.pools.particles.len(), 10);
    }

    #[test]
    fn test_one_cast_can_destroy_several() {
        let mut state = running();
        // Far origin is (640, 280)
        state.pools.obstacles.push(obstacle(1, 150.0));
        state.pools.obstacles.push(obstacle(1, 250.0));
        assert_eq!(cast_coil(&mut state, CoilRange::Far), Some(2));
        assert_eq!(state.resources.souls, 2);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_jumping_lifts_the_coil_origin() {
        let mut state = running();
        state.player.jump_height = 100.0;
        cast_coil(&mut state, CoilRange::Medium);
        assert_eq!(state.pools.coils[0].origin.y, 600.0 - 100.0 - 180.0);
    }

    #[test]
    fn test_rejected_casts_are_no_ops() {
        let mut state = running();
        state.resources.mana = 49.0;
        state.pools.obstacles.push(obstacle(1, 400.0));
        let resources = state.resources.clone();
        assert_eq!(cast_coil(&mut state, CoilRange::Close), None);
        assert_eq!(state.resources, resources);
        assert_eq!(state.pools.obstacles.len(), 1);
        assert!(state.pools.coils.is_empty());
        assert!(state.events.is_empty());

        state.resources.mana = 250.0;
        assert!(cast_coil(&mut state, CoilRange::Close).is_some());
        assert_eq!(cast_coil(&mut state, CoilRange::Close), None, "cooling down");
        assert!(cast_coil(&mut state, CoilRange::Medium).is_some(), "independent cooldown");

        state.phase = GamePhase::Paused;
        assert_eq!(cast_coil(&mut state, CoilRange::Far), None);
    }

    #[test]
    fn test_ultimate_needs_ten_souls() {
        let mut state = running();
        state.resources.souls = 9;
        assert!(!activate_ultimate(&mut state));

        state.resources.souls = 12;
        assert!(activate_ultimate(&mut state));
        assert!(state.player.is_ultimate());
        assert_eq!(state.player.ultimate_ticks, 300);
        assert_eq!(state.resources.souls, 0);
        assert_eq!(state.scheduler.pending(TimerTask::RequiemClear), 1);
        assert!(
            state
                .pools
                .effects
                .iter()
                .any(|e| e.kind == EffectKind::RequiemOverlay)
        );

        state.resources.souls = 10;
        assert!(!activate_ultimate(&mut state), "already active");
    }

    #[test]
    fn test_requiem_clear_empties_board_with_burst() {
        let mut state = running();
        state.pools.obstacles.push(obstacle(0, 10.0));
        state.pools.obstacles.push(obstacle(2, 300.0));
        requiem_clear(&mut state);
        assert!(state.pools.obstacles.is_empty());
        assert_eq!(state.pools.particles.len(), 200);
        assert!(state.events.contains(&GameEvent::RequiemClear { cleared: 2 }));
    }

    #[test]
    fn test_runes_cover_every_effect() {
        let mut state = running();
        let mut seen = Vec::new();
        for _ in 0..64 {
            state.pools.obstacles.push(obstacle(0, 10.0));
            let before = state.resources.souls;
            let restores = state.scheduler.pending(TimerTask::RestoreSpeed);
            match apply_rune(&mut state, Vec2::new(640.0, 600.0)) {
                RuneEffect::Slow => {
                    assert!(state.speed.is_slowed());
                    assert_eq!(
                        state.scheduler.pending(TimerTask::RestoreSpeed),
                        restores + 1
                    );
                }
                RuneEffect::ClearBoard => assert!(state.pools.obstacles.is_empty()),
                RuneEffect::SoulBonus => assert_eq!(state.resources.souls, before + 3),
            }
            let effect = *state.events.last().unwrap();
            if !seen.contains(&effect) {
                seen.push(effect);
            }
        }
        assert_eq!(seen.len(), 3);
    }
}
