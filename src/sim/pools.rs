//! Entity populations
//!
//! Four independent, order-irrelevant collections plus the active coils.
//! Insertion appends; removal goes through `retain`, which visits every
//! element exactly once, so removing in place never skips a neighbour.
//! Drawing order is insertion order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::resources::CoilRange;

/// Obstacle sprite variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Creep,
    Tinker,
    Pudge,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Creep, ObstacleKind::Tinker, ObstacleKind::Pudge];
}

/// A lane obstacle. Horizontal position is derived from `lane`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub lane: usize,
    /// Top edge (grows each tick by the scroll speed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Soul,
    Rune,
}

/// A collectible riding down a lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub lane: usize,
    pub y: f32,
    pub size: f32,
    pub kind: CollectibleKind,
    /// Float-animation phase token
    pub phase: f32,
}

impl Collectible {
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }
}

/// RGBA color with 0-255 channels and 0-1 alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A particle for visual effects (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    /// Remaining lifetime in ticks
    pub life: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Floating "+1" that drifts upward
    SoulPickupText,
    /// "ULTIMATE READY" banner
    UltimateReadyBanner,
    /// Requiem cast overlay, centered on the player until the board clear
    RequiemOverlay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransientEffect {
    pub kind: EffectKind,
    pub pos: Vec2,
    pub size: f32,
    pub life: u32,
    pub max_life: u32,
}

impl TransientEffect {
    pub fn new(kind: EffectKind, pos: Vec2, size: f32, life: u32) -> Self {
        Self {
            kind,
            pos,
            size,
            life,
            max_life: life,
        }
    }

    /// Opacity in [0, 1], fading out over the lifetime
    pub fn fade(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// An expanding raze ring. Its hits are resolved once, when it is cast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coil {
    pub range: CoilRange,
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub expansion: f32,
    pub color: Color,
    pub life: u32,
    pub alpha: f32,
    pub fade: f32,
}

impl Coil {
    /// Grow, then fade. Returns false once the coil should be dropped.
    pub fn advance(&mut self) -> bool {
        if self.radius < self.max_radius {
            self.radius = (self.radius + self.expansion).min(self.max_radius);
        }
        self.life = self.life.saturating_sub(1);
        if self.radius >= self.max_radius {
            self.alpha -= self.fade;
        }
        self.alpha > 0.0 && self.life > 0
    }
}

/// Every entity population in the run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityPools {
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub particles: Vec<Particle>,
    pub effects: Vec<TransientEffect>,
    pub coils: Vec<Coil>,
}

impl EntityPools {
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.collectibles.clear();
        self.particles.clear();
        self.effects.clear();
        self.coils.clear();
    }

    /// Move particles and drop the expired ones
    pub fn advance_particles(&mut self) {
        self.particles.retain_mut(|p| {
            p.pos += p.vel;
            p.life = p.life.saturating_sub(1);
            p.life > 0
        });
    }

    /// Age transient effects; floating text drifts up one pixel per tick
    pub fn advance_effects(&mut self) {
        self.effects.retain_mut(|e| {
            if e.kind == EffectKind::SoulPickupText {
                e.pos.y -= 1.0;
            }
            e.life = e.life.saturating_sub(1);
            e.life > 0
        });
    }

    pub fn advance_coils(&mut self) {
        self.coils.retain_mut(Coil::advance);
    }

    /// Number of live entities across all populations
    pub fn population(&self) -> usize {
        self.obstacles.len()
            + self.collectibles.len()
            + self.particles.len()
            + self.effects.len()
            + self.coils.len()
    }
}
