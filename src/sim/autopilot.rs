//! Idle/demo mode - a simple AI that plays the game
//!
//! Starts and restarts runs, fires the ultimate as soon as it is charged,
//! razes obstacles bearing down on the player when a coil can reach them,
//! and otherwise sidesteps into the safest neighbouring lane.

use super::collision::{Span, coil_hits};
use super::resources::CoilRange;
use super::state::{GamePhase, GameState};
use crate::consts::LANE_COUNT;
use crate::input::Action;

/// How far above the player an obstacle counts as a threat
const THREAT_WINDOW: f32 = 220.0;

/// Actions the AI would press this tick
pub fn choose_actions(state: &GameState) -> Vec<Action> {
    match state.phase {
        GamePhase::NotStarted | GamePhase::GameOver => return vec![Action::Start],
        GamePhase::Paused => return Vec::new(),
        GamePhase::Running => {}
    }

    let mut actions = Vec::new();
    let ult = &state.tuning.ultimate;
    if state.resources.souls >= ult.souls_required && !state.player.is_ultimate() {
        actions.push(Action::Ultimate);
    }
    if state.player.is_ultimate() {
        return actions;
    }

    let span = state.player_span();
    let lane = state.player.lane;
    if !lane_threatened(state, lane, span) {
        return actions;
    }

    if let Some(range) = reachable_coil(state) {
        actions.push(Action::Cast(range));
        return actions;
    }

    // Sidestep toward the nearest clear lane
    let left = lane.checked_sub(1);
    let right = (lane + 1 < LANE_COUNT).then_some(lane + 1);
    let clear = |l: Option<usize>| l.filter(|&l| !lane_threatened(state, l, span));
    if clear(left).is_some() {
        actions.push(Action::MoveLeft);
    } else if clear(right).is_some() {
        actions.push(Action::MoveRight);
    }
    actions
}

fn lane_threatened(state: &GameState, lane: usize, player: Span) -> bool {
    let window = Span::new(player.top - THREAT_WINDOW, player.bottom);
    state
        .pools
        .obstacles
        .iter()
        .any(|obs| obs.lane == lane && window.overlaps(&Span::new(obs.y, obs.bottom())))
}

/// First affordable coil range whose blast would hit an obstacle in the
/// player's lane
fn reachable_coil(state: &GameState) -> Option<CoilRange> {
    let radius = state.tuning.coil_radius();
    let x = state.player_x() + state.tuning.layout.player_size / 2.0;
    let top = state.player_span().top;

    CoilRange::ALL.into_iter().find(|&range| {
        let params = state.tuning.coils.range(range);
        if !state.resources.can_cast(range, params.cost) {
            return false;
        }
        let origin = glam::Vec2::new(x, top - params.forward_offset);
        state.pools.obstacles.iter().any(|obs| {
            obs.lane == state.player.lane
                && coil_hits(origin, radius, state.obstacle_center(obs), obs.width)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pools::{Obstacle, ObstacleKind};

    fn running() -> GameState {
        let mut state = GameState::new(1);
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
    fn test_starts_and_restarts() {
        let mut state = GameState::new(1);
        assert_eq!(choose_actions(&state), vec![Action::Start]);
        state.phase = GamePhase::GameOver;
        assert_eq!(choose_actions(&state), vec![Action::Start]);
        state.phase = GamePhase::Paused;
        assert!(choose_actions(&state).is_empty());
    }

    #[test]
    fn test_razes_a_reachable_threat() {
        let mut state = running();
        state.pools.obstacles.push(obstacle(1, 400.0));
        assert_eq!(choose_actions(&state), vec![Action::Cast(CoilRange::Close)]);
    }

    #[test]
    fn test_sidesteps_when_out_of_mana() {
        let mut state = running();
        state.resources.mana = 0.0;
        state.pools.obstacles.push(obstacle(1, 400.0));
        state.pools.obstacles.push(obstacle(0, 400.0));
        assert_eq!(choose_actions(&state), vec![Action::MoveRight]);
    }

    #[test]
    fn test_fires_ultimate_when_charged() {
        let mut state = running();
        state.resources.souls = 10;
        assert_eq!(choose_actions(&state), vec![Action::Ultimate]);
    }
}
