//! Rendering boundary
//!
//! The simulation never touches assets. A renderer reads [`GameState`]
//! after the update phase and uses these helpers to pick a sprite (or the
//! flat-color fallback when the image failed to load) and to place it.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::{LANE_COUNT, TICKS_PER_SECOND};
use crate::sim::{Collectible, CollectibleKind, Color, EffectKind, GameState, ObstacleKind};

/// Every sprite the renderer may draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Player,
    Background,
    Obstacle(ObstacleKind),
    Collectible(CollectibleKind),
    RequiemOverlay,
}

impl AssetKey {
    /// All assets, in load order
    pub fn all() -> Vec<AssetKey> {
        let mut keys = vec![AssetKey::Player, AssetKey::Background];
        keys.extend(ObstacleKind::ALL.map(AssetKey::Obstacle));
        keys.push(AssetKey::Collectible(CollectibleKind::Soul));
        keys.push(AssetKey::Collectible(CollectibleKind::Rune));
        keys.push(AssetKey::RequiemOverlay);
        keys
    }

    /// Conventional asset path
    pub fn path(&self) -> &'static str {
        match self {
            AssetKey::Player => "images/shadowfiend.png",
            AssetKey::Background => "images/background.svg",
            AssetKey::Obstacle(ObstacleKind::Creep) => "images/creep.png",
            AssetKey::Obstacle(ObstacleKind::Tinker) => "images/tinker.png",
            AssetKey::Obstacle(ObstacleKind::Pudge) => "images/pudge.png",
            AssetKey::Collectible(CollectibleKind::Soul) => "images/soul.png",
            AssetKey::Collectible(CollectibleKind::Rune) => "images/rune.png",
            AssetKey::RequiemOverlay => "images/requiem.gif",
        }
    }

    /// Flat color drawn when the image is unavailable
    pub fn fallback_color(&self) -> Color {
        match self {
            AssetKey::Player => Color::rgba(51, 51, 51, 1.0),
            AssetKey::Background => Color::rgba(17, 17, 17, 1.0),
            AssetKey::Obstacle(ObstacleKind::Creep) => Color::rgba(136, 68, 0, 1.0),
            AssetKey::Obstacle(ObstacleKind::Tinker) => Color::rgba(0, 102, 204, 1.0),
            AssetKey::Obstacle(ObstacleKind::Pudge) => Color::rgba(51, 136, 51, 1.0),
            AssetKey::Collectible(CollectibleKind::Soul) => Color::rgba(255, 51, 51, 1.0),
            AssetKey::Collectible(CollectibleKind::Rune) => Color::rgba(255, 204, 0, 1.0),
            AssetKey::RequiemOverlay => Color::rgba(255, 0, 0, 0.4),
        }
    }
}

/// "Is this image usable" query answered by the host's asset loader
pub trait AssetCatalog {
    fn is_available(&self, key: AssetKey) -> bool;
}

/// Catalog built from load results
#[derive(Debug, Clone, Default)]
pub struct AssetReport {
    loaded: HashSet<AssetKey>,
    failed: HashSet<AssetKey>,
}

impl AssetReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&mut self, key: AssetKey) {
        self.failed.remove(&key);
        self.loaded.insert(key);
    }

    pub fn mark_failed(&mut self, key: AssetKey) {
        log::warn!("Failed to load {}. Using fallback.", key.path());
        self.loaded.remove(&key);
        self.failed.insert(key);
    }

    /// Whether every asset has either loaded or failed
    pub fn is_settled(&self) -> bool {
        AssetKey::all()
            .iter()
            .all(|k| self.loaded.contains(k) || self.failed.contains(k))
    }

    pub fn log_summary(&self) {
        log::info!(
            "Images loaded: {}, Failed: {}",
            self.loaded.len(),
            self.failed.len()
        );
    }
}

impl AssetCatalog for AssetReport {
    fn is_available(&self, key: AssetKey) -> bool {
        self.loaded.contains(&key)
    }
}

/// What to draw for an asset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    Image(AssetKey),
    Fallback(Color),
}

impl Sprite {
    pub fn resolve(catalog: &dyn AssetCatalog, key: AssetKey) -> Self {
        if catalog.is_available(key) {
            Sprite::Image(key)
        } else {
            Sprite::Fallback(key.fallback_color())
        }
    }
}

/// Milliseconds of simulated time, for animation clocks
pub fn sim_time_ms(state: &GameState) -> f64 {
    state.time_ticks as f64 * 1000.0 / TICKS_PER_SECOND as f64
}

/// Vertical bob applied to collectibles, +/- 5 px
pub fn float_offset(item: &Collectible, time_ms: f64) -> f32 {
    ((time_ms * 0.005 + item.phase as f64).sin() * 5.0) as f32
}

/// Top-left of the player sprite, jump included
pub fn player_draw_pos(state: &GameState) -> Vec2 {
    Vec2::new(state.player_x(), state.player_span().top)
}

/// Top-left of a collectible sprite, float animation included
pub fn collectible_draw_pos(state: &GameState, item: &Collectible, time_ms: f64) -> Vec2 {
    let x = state
        .viewport
        .lane_x(item.lane, state.tuning.layout.lane_width, item.size);
    Vec2::new(x, item.y + float_offset(item, time_ms))
}

/// Offset of the scrolling background, wrapping at the viewport height
pub fn background_scroll(state: &GameState, time_ms: f64) -> f32 {
    let speed = state.speed.current() as f64 * 0.5;
    let height = state.viewport.height.max(1.0) as f64;
    ((time_ms * speed * 0.01) % height) as f32
}

/// Lane divider x positions (`LANE_COUNT + 1` lines)
pub fn lane_dividers(state: &GameState) -> Vec<f32> {
    let width = state.tuning.layout.lane_width;
    let left = state.viewport.lanes_left(width);
    (0..=LANE_COUNT).map(|i| left + i as f32 * width).collect()
}

/// Remaining ultimate as a fraction, for the HUD
pub fn ultimate_remaining(state: &GameState) -> f32 {
    let max = state.tuning.ultimate.duration_ticks;
    if max == 0 {
        0.0
    } else {
        state.player.ultimate_ticks.min(max) as f32 / max as f32
    }
}

/// Cooldown overlay fraction for each coil range, close to far
pub fn cooldown_fractions(state: &GameState) -> [f32; 3] {
    crate::sim::CoilRange::ALL.map(|range| {
        let max = state.tuning.coils.range(range).cooldown_ticks;
        if max == 0 {
            0.0
        } else {
            state.resources.cooldowns.get(range) as f32 / max as f32
        }
    })
}

/// Whether any requiem overlay is on screen
pub fn requiem_overlay_visible(state: &GameState) -> bool {
    state
        .pools
        .effects
        .iter()
        .any(|e| e.kind == EffectKind::RequiemOverlay)
}
