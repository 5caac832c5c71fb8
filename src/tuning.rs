//! Data-driven game balance
//!
//! Every constant the simulation reads lives on [`Tuning`]. Defaults match the
//! shipped game; overrides can be loaded from JSON (LocalStorage on web, a
//! file on native) and are validated before use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from building or loading a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simulation and presentation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Road ===
    /// World x distance between lane centres
    pub lane_width: f32,
    /// Batches appear at `z = -spawn_distance`
    pub spawn_distance: f32,
    /// Entities at or past this z are removed
    pub despawn_distance: f32,

    // === Difficulty ===
    /// Speed at the start of every run (units/s)
    pub initial_speed: f32,
    /// Speed never exceeds this
    pub max_speed: f32,
    /// Speed gained per running second
    pub speed_increment: f32,

    // === Spawning ===
    /// Road distance between batches; the interval is `spawn_spacing / speed`
    pub spawn_spacing: f32,
    /// Speed floor used for the interval so it stays bounded when slow
    pub min_spawn_speed: f32,
    /// Probability that a batch has no road items
    pub breather_chance: f64,
    /// Probability that a non-breather batch has two road items instead of one
    pub multi_spawn_chance: f64,

    // === Scoring ===
    /// Half depth of the collision window around the player (z = 0)
    pub hit_window: f32,
    /// Points per collectible
    pub collectible_value: u64,

    // === Render sizes ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub collectible_radius: f32,
    /// Base x distance of decorations from the road centre
    pub decoration_offset: f32,
    /// Max extra outward offset of a decoration
    pub decoration_x_jitter: f32,
    /// Max longitudinal offset of a decoration toward the player
    pub decoration_z_jitter: f32,
    pub decoration_min_height: f32,
    pub decoration_height_range: f32,

    // === Presentation / input ===
    /// Lane-change slide speed of the car model (units/s)
    pub lateral_speed: f32,
    /// Minimum horizontal swipe length in pixels
    pub swipe_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            spawn_distance: SPAWN_DISTANCE,
            despawn_distance: DESPAWN_DISTANCE,

            initial_speed: INITIAL_GAME_SPEED,
            max_speed: MAX_GAME_SPEED,
            speed_increment: SPEED_INCREMENT,

            spawn_spacing: SPAWN_SPACING,
            min_spawn_speed: MIN_SPAWN_SPEED,
            breather_chance: BREATHER_CHANCE,
            multi_spawn_chance: MULTI_SPAWN_CHANCE,

            hit_window: HIT_WINDOW,
            collectible_value: BALL_SCORE_VALUE,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            collectible_radius: BALL_RADIUS,
            decoration_offset: TREE_OFFSET_X,
            decoration_x_jitter: TREE_VARIANCE,
            decoration_z_jitter: TREE_Z_JITTER,
            decoration_min_height: TREE_MIN_HEIGHT,
            decoration_height_range: TREE_HEIGHT_RANGE,

            lateral_speed: PLAYER_SPEED_LATERAL,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be finite and positive",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be finite and non-negative",
        })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be within [0, 1]",
        })
    }
}

impl Tuning {
    /// Check every field; called by all loading paths
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("lane_width", self.lane_width)?;
        positive("spawn_distance", self.spawn_distance)?;
        positive("despawn_distance", self.despawn_distance)?;
        positive("initial_speed", self.initial_speed)?;
        positive("max_speed", self.max_speed)?;
        non_negative("speed_increment", self.speed_increment)?;
        positive("spawn_spacing", self.spawn_spacing)?;
        positive("min_spawn_speed", self.min_spawn_speed)?;
        positive("hit_window", self.hit_window)?;
        probability("breather_chance", self.breather_chance)?;
        probability("multi_spawn_chance", self.multi_spawn_chance)?;
        positive("obstacle_width", self.obstacle_width)?;
        positive("obstacle_height", self.obstacle_height)?;
        positive("collectible_radius", self.collectible_radius)?;
        non_negative("decoration_offset", self.decoration_offset)?;
        non_negative("decoration_x_jitter", self.decoration_x_jitter)?;
        non_negative("decoration_z_jitter", self.decoration_z_jitter)?;
        positive("decoration_min_height", self.decoration_min_height)?;
        non_negative("decoration_height_range", self.decoration_height_range)?;
        positive("lateral_speed", self.lateral_speed)?;
        non_negative("swipe_threshold", self.swipe_threshold)?;

        if self.initial_speed > self.max_speed {
            return Err(TuningError::Invalid {
                field: "initial_speed",
                reason: "must not exceed max_speed",
            });
        }
        if self.despawn_distance <= self.hit_window {
            return Err(TuningError::Invalid {
                field: "despawn_distance",
                reason: "must lie beyond the hit window",
            });
        }
        if self.spawn_distance <= self.hit_window {
            return Err(TuningError::Invalid {
                field: "spawn_distance",
                reason: "must lie beyond the hit window",
            });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse an override, logging and falling back to defaults on failure
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key for developer overrides
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "turbo_rush_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
