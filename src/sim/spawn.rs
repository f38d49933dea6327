//! Periodic obstacle and collectible placement

use rand::Rng;
use rand::seq::SliceRandom;

use super::collision::{collectible_spot_blocked, lane_crowded_at_top};
use super::pools::{Collectible, CollectibleKind, Obstacle, ObstacleKind};
use super::state::GameState;
use crate::consts::LANE_COUNT;

/// Place one obstacle (or two, with the configured chance) in distinct
/// random lanes. A lane whose top is still occupied is skipped rather than
/// stacked. Returns how many obstacles were placed.
pub fn spawn_obstacles(state: &mut GameState) -> usize {
    if !state.is_running() {
        return 0;
    }
    let layout = &state.tuning.layout;
    let (width, height) = (layout.obstacle_width, layout.obstacle_height);
    let count = if state.rng.random_bool(state.tuning.spawn.two_obstacle_chance) {
        2
    } else {
        1
    };

    let mut lanes: Vec<usize> = (0..LANE_COUNT).collect();
    let mut placed = 0;
    for _ in 0..count {
        if lanes.is_empty() {
            break;
        }
        let lane = lanes.swap_remove(state.rng.random_range(0..lanes.len()));
        let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];

        if lane_crowded_at_top(&state.pools.obstacles, lane, height) {
            log::debug!("Skipping obstacle in crowded lane {lane}");
            continue;
        }
        state.pools.obstacles.push(Obstacle {
            lane,
            y: -height,
            width,
            height,
            kind,
        });
        placed += 1;
    }
    placed
}

/// Place one collectible in the first safe lane of a shuffled order. If no
/// lane is safe the cycle is skipped. Returns the placed kind.
pub fn spawn_collectible(state: &mut GameState) -> Option<CollectibleKind> {
    if !state.is_running() {
        return None;
    }
    let size = state.tuning.layout.collectible_size;
    let mut lanes: [usize; LANE_COUNT] = std::array::from_fn(|i| i);
    lanes.shuffle(&mut state.rng);

    let lane = lanes.into_iter().find(|&lane| {
        !collectible_spot_blocked(&state.pools.obstacles, &state.pools.collectibles, lane, size)
    });
    let Some(lane) = lane else {
        log::debug!("No safe lane for a collectible, skipping spawn");
        return None;
    };

    let kind = if state.rng.random_bool(state.tuning.spawn.soul_chance) {
        CollectibleKind::Soul
    } else {
        CollectibleKind::Rune
    };
    let phase = state.rng.random::<f32>();
    state.pools.collectibles.push(Collectible {
        lane,
        y: -size,
        size,
        kind,
        phase,
    });
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_nothing_spawns_unless_running() {
        let mut state = GameState::new(3);
        assert_eq!(spawn_obstacles(&mut state), 0);
        assert_eq!(spawn_collectible(&mut state), None);
        state.phase = GamePhase::Paused;
        assert_eq!(spawn_obstacles(&mut state), 0);
        assert!(state.pools.obstacles.is_empty());
        assert!(state.pools.collectibles.is_empty());
    }

    #[test]
    fn test_obstacles_start_above_the_viewport() {
        let mut state = running(3);
        let placed = spawn_obstacles(&mut state);
        assert!(placed == 1 || placed == 2);
        for obs in &state.pools.obstacles {
            assert_eq!(obs.y, -130.0);
        }
    }

    #[test]
    fn test_crowded_lanes_are_never_stacked() {
        let mut state = running(11);
        for _ in 0..50 {
            spawn_obstacles(&mut state);
        }
        // Nothing moved, so each lane holds at most one obstacle
        for lane in 0..LANE_COUNT {
            let in_lane = state.pools.obstacles.iter().filter(|o| o.lane == lane).count();
            assert!(in_lane <= 1);
        }
    }

    #[test]
    fn test_collectible_spawn_is_skipped_when_every_lane_is_blocked() {
        let mut state = running(5);
        for lane in 0..LANE_COUNT {
            state.pools.obstacles.push(Obstacle {
                lane,
                y: -130.0,
                width: 130.0,
                height: 130.0,
                kind: ObstacleKind::Pudge,
            });
        }
        assert_eq!(spawn_collectible(&mut state), None);
        assert!(state.pools.collectibles.is_empty());
    }

    #[test]
    fn test_collectible_uses_the_only_safe_lane() {
        let mut state = running(5);
        for lane in [0, 2] {
            state.pools.obstacles.push(Obstacle {
                lane,
                y: -130.0,
                width: 130.0,
                height: 130.0,
                kind: ObstacleKind::Tinker,
            });
        }
        assert!(spawn_collectible(&mut state).is_some());
        assert_eq!(state.pools.collectibles[0].lane, 1);
        assert_eq!(state.pools.collectibles[0].y, -60.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_obstacle_pairs_use_distinct_lanes(seed in any::<u64>()) {
                let mut state = running(seed);
                spawn_obstacles(&mut state);
                let lanes: Vec<usize> = state.pools.obstacles.iter().map(|o| o.lane).collect();
                prop_assert!(lanes.iter().all(|&l| l < LANE_COUNT));
                if lanes.len() == 2 {
                    prop_assert_ne!(lanes[0], lanes[1]);
                }
            }
        }
    }
}
