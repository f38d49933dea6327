//! Collision detection for lane entities
//!
//! Everything travels in lanes, so a lane match already guarantees
//! horizontal overlap and the contact tests reduce to one shared vertical
//! axis. Coil hits are the exception: a circle-vs-center distance test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pools::{Collectible, Obstacle};

/// A vertical extent `[top, bottom)` in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub top: f32,
    pub bottom: f32,
}

impl Span {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.top < other.bottom && self.bottom > other.top
    }
}

/// Whether an obstacle ends the run: same lane, vertical spans overlapping
/// (a jump high enough to clear the obstacle leaves no overlap), and the
/// player not protected by the ultimate.
pub fn obstacle_blocks_player(
    player_lane: usize,
    player: Span,
    invulnerable: bool,
    obstacle: &Obstacle,
) -> bool {
    if invulnerable || player_lane != obstacle.lane {
        return false;
    }
    player.overlaps(&Span::new(obstacle.y, obstacle.bottom()))
}

/// Whether the player picks up `item`. Any height reaches it on a lane match.
pub fn touches_collectible(player_lane: usize, player: Span, item: &Collectible) -> bool {
    player_lane == item.lane && player.overlaps(&Span::new(item.y, item.bottom()))
}

/// Whether a coil centered at `origin` with `radius` destroys an obstacle
/// centered at `obstacle_center`
#[inline]
pub fn coil_hits(origin: Vec2, radius: f32, obstacle_center: Vec2, obstacle_width: f32) -> bool {
    origin.distance(obstacle_center) < radius + obstacle_width / 2.0
}

/// Whether an obstacle already occupies the top of `lane` closely enough to
/// make a new spawn there unfair
pub fn lane_crowded_at_top(obstacles: &[Obstacle], lane: usize, height: f32) -> bool {
    obstacles
        .iter()
        .any(|obs| obs.lane == lane && obs.y.abs() < height * 2.0)
}

/// Whether a collectible of `size` spawned at the top of `lane` would sit on
/// an obstacle or crowd another collectible
pub fn collectible_spot_blocked(
    obstacles: &[Obstacle],
    collectibles: &[Collectible],
    lane: usize,
    size: f32,
) -> bool {
    let spawn_center = -size / 2.0;
    let spawn_top = -size;
    let obstacle_near = obstacles.iter().any(|obs| {
        obs.lane == lane && (obs.center_y() - spawn_center).abs() < obs.height + size
    });
    let collectible_near = collectibles
        .iter()
        .any(|col| col.lane == lane && (col.y - spawn_top).abs() < size * 2.0);
    obstacle_near || collectible_near
}
