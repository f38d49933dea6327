//! Data-driven game balance
//!
//! Every gameplay constant lives here so runs can be re-tuned from a JSON file
//! without a rebuild. Times are in simulation ticks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ms_to_ticks;
use crate::sim::CoilRange;

/// Environment variable naming the tuning file
pub const TUNING_ENV_VAR: &str = "REQUIEM_RUNNER_TUNING";
/// Tuning file used when the environment variable is unset
pub const DEFAULT_TUNING_PATH: &str = "config/tuning.json";

/// Failure to produce a usable [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Lane and sprite geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    pub lane_width: f32,
    pub player_size: f32,
    /// Distance from the viewport bottom to the player's top edge
    pub player_bottom_offset: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub collectible_size: f32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            lane_width: 200.0,
            player_size: 150.0,
            player_bottom_offset: 200.0,
            obstacle_width: 130.0,
            obstacle_height: 130.0,
            collectible_size: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpTuning {
    pub max_height: f32,
    pub speed: f32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            max_height: 150.0,
            speed: 7.0,
        }
    }
}

/// Scroll speed and its ramp/debuff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTuning {
    pub base: f32,
    pub ramp_step: f32,
    pub ramp_period_ticks: u64,
    /// Multiplier applied while a slow rune is active
    pub slow_factor: f32,
    pub slow_ticks: u64,
}

impl Default for SpeedTuning {
    fn default() -> Self {
        Self {
            base: 5.0,
            ramp_step: 0.5,
            ramp_period_ticks: ms_to_ticks(30_000),
            slow_factor: 0.7,
            slow_ticks: ms_to_ticks(5_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManaTuning {
    pub start: f32,
    pub max: f32,
    pub regen_per_tick: f32,
}

impl Default for ManaTuning {
    fn default() -> Self {
        Self {
            start: 250.0,
            max: 291.0,
            regen_per_tick: 0.2,
        }
    }
}

/// Per-range coil parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoilRangeTuning {
    pub cost: f32,
    pub cooldown_ticks: u32,
    /// How far ahead of the player's top edge the coil lands
    pub forward_offset: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoilTuning {
    pub close: CoilRangeTuning,
    pub medium: CoilRangeTuning,
    pub far: CoilRangeTuning,
    /// Radius as a fraction of lane width, shared by all ranges
    pub radius_lane_fraction: f32,
    pub expansion_per_tick: f32,
    pub lifetime_ticks: u32,
    pub fade_per_tick: f32,
    pub hit_particles: u32,
}

impl Default for CoilTuning {
    fn default() -> Self {
        Self {
            close: CoilRangeTuning {
                cost: 50.0,
                cooldown_ticks: 120,
                forward_offset: 50.0,
            },
            medium: CoilRangeTuning {
                cost: 50.0,
                cooldown_ticks: 180,
                forward_offset: 180.0,
            },
            far: CoilRangeTuning {
                cost: 50.0,
                cooldown_ticks: 240,
                forward_offset: 320.0,
            },
            radius_lane_fraction: 0.25,
            expansion_per_tick: 15.0,
            lifetime_ticks: 30,
            fade_per_tick: 0.05,
            hit_particles: 10,
        }
    }
}

impl CoilTuning {
    pub fn range(&self, range: CoilRange) -> &CoilRangeTuning {
        match range {
            CoilRange::Close => &self.close,
            CoilRange::Medium => &self.medium,
            CoilRange::Far => &self.far,
        }
    }
}

/// The ultimate ("Requiem")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UltimateTuning {
    pub souls_required: u32,
    pub duration_ticks: u32,
    /// Delay between activation and the board clear
    pub clear_delay_ticks: u64,
    pub explosion_particles: u32,
    /// Per-tick chance of an ambient ring particle while active
    pub ambient_particle_chance: f64,
    /// Ember particles emitted over the sprite each tick while active
    pub embers_per_tick: u32,
}

impl Default for UltimateTuning {
    fn default() -> Self {
        Self {
            souls_required: 10,
            duration_ticks: 300,
            clear_delay_ticks: 95,
            explosion_particles: 200,
            ambient_particle_chance: 0.3,
            embers_per_tick: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub obstacle_period_ticks: u64,
    pub collectible_period_ticks: u64,
    pub two_obstacle_chance: f64,
    pub soul_chance: f64,
    /// Souls granted by the bonus rune
    pub rune_soul_bonus: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            obstacle_period_ticks: ms_to_ticks(1_500),
            collectible_period_ticks: ms_to_ticks(3_000),
            two_obstacle_chance: 0.3,
            soul_chance: 0.8,
            rune_soul_bonus: 3,
        }
    }
}

/// Transient effect lifetimes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    pub soul_text_ticks: u32,
    pub soul_text_size: f32,
    pub ready_banner_ticks: u32,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            soul_text_ticks: 30,
            soul_text_size: 20.0,
            ready_banner_ticks: 180,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub layout: LayoutTuning,
    pub jump: JumpTuning,
    pub speed: SpeedTuning,
    pub mana: ManaTuning,
    pub coils: CoilTuning,
    pub ultimate: UltimateTuning,
    pub spawn: SpawnTuning,
    pub effects: EffectTuning,
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a tuning file
    pub fn from_path(path: &str) -> Result<Self, TuningError> {
        let content = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load tuning from the configured path. Falls back to defaults if the file
    /// is missing or unusable.
    pub fn load() -> Self {
        let path =
            std::env::var(TUNING_ENV_VAR).unwrap_or_else(|_| DEFAULT_TUNING_PATH.to_string());
        match Self::from_path(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(TuningError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("No tuning file at {path}, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}, using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if self.jump.speed <= 0.0 {
            return invalid("jump.speed", "must be positive");
        }
        if self.jump.max_height < 0.0 {
            return invalid("jump.max_height", "must not be negative");
        }
        if self.mana.max <= 0.0 {
            return invalid("mana.max", "must be positive");
        }
        if self.layout.lane_width <= 0.0 {
            return invalid("layout.lane_width", "must be positive");
        }
        if self.spawn.obstacle_period_ticks == 0 {
            return invalid("spawn.obstacle_period_ticks", "must be at least one tick");
        }
        if self.spawn.collectible_period_ticks == 0 {
            return invalid("spawn.collectible_period_ticks", "must be at least one tick");
        }
        if self.speed.ramp_period_ticks == 0 {
            return invalid("speed.ramp_period_ticks", "must be at least one tick");
        }
        if self.ultimate.duration_ticks == 0 {
            return invalid("ultimate.duration_ticks", "must be at least one tick");
        }
        if self.speed.slow_factor < 0.0 {
            return invalid("speed.slow_factor", "must not be negative");
        }
        let probabilities = [
            ("spawn.two_obstacle_chance", self.spawn.two_obstacle_chance),
            ("spawn.soul_chance", self.spawn.soul_chance),
            (
                "ultimate.ambient_particle_chance",
                self.ultimate.ambient_particle_chance,
            ),
        ];
        for (field, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return invalid(field, "must be within [0, 1]");
            }
        }
        Ok(())
    }

    /// Shared coil radius
    pub fn coil_radius(&self) -> f32 {
        self.layout.lane_width * self.coils.radius_lane_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.coil_radius(), 50.0);
        assert_eq!(tuning.spawn.obstacle_period_ticks, 90);
        assert_eq!(tuning.spawn.collectible_period_ticks, 180);
        assert_eq!(tuning.speed.ramp_period_ticks, 1800);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let tuning = Tuning::from_json(r#"{ "jump": { "speed": 10.0 } }"#).unwrap();
        assert_eq!(tuning.jump.speed, 10.0);
        assert_eq!(tuning.jump.max_height, 150.0);
        assert_eq!(tuning.mana, ManaTuning::default());
    }

    #[test]
    fn test_zero_jump_speed_is_rejected() {
        let err = Tuning::from_json(r#"{ "jump": { "speed": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "jump.speed",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_ultimate_duration_is_rejected() {
        let err = Tuning::from_json(r#"{ "ultimate": { "duration_ticks": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "ultimate.duration_ticks",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_slow_factor_is_rejected() {
        let err = Tuning::from_json(r#"{ "speed": { "slow_factor": -0.5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "speed.slow_factor",
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_range_probability_is_rejected() {
        let err = Tuning::from_json(r#"{ "spawn": { "soul_chance": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = Tuning::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }

    #[test]
    fn test_coil_ranges_have_distinct_cooldowns() {
        let coils = CoilTuning::default();
        assert_eq!(coils.range(CoilRange::Close).cooldown_ticks, 120);
        assert_eq!(coils.range(CoilRange::Medium).cooldown_ticks, 180);
        assert_eq!(coils.range(CoilRange::Far).cooldown_ticks, 240);
    }
}
