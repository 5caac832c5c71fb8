//! Turbo Rush - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, difficulty)
//! - `tuning`: Data-driven game balance
//! - `driver`: Host-side frame clock, input and run lifecycle
//! - `present`: Render snapshot handed to the external renderer
//! - `best_score`: Persisted best score

pub mod best_score;
pub mod driver;
pub mod present;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use driver::Driver;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the host feeds into the clock (stalled tabs, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Road layout
    pub const LANE_WIDTH: f32 = 2.5;
    pub const SPAWN_DISTANCE: f32 = 90.0;
    pub const DESPAWN_DISTANCE: f32 = 15.0;

    /// Speed ramp (world units per second)
    pub const INITIAL_GAME_SPEED: f32 = 15.0;
    pub const MAX_GAME_SPEED: f32 = 60.0;
    pub const SPEED_INCREMENT: f32 = 0.5;

    /// One batch roughly every 12 units of road
    pub const SPAWN_SPACING: f32 = 12.0;
    /// Below this speed the spawn interval stops growing
    pub const MIN_SPAWN_SPEED: f32 = 10.0;

    /// Half depth of the player's footprint along the track
    pub const HIT_WINDOW: f32 = 1.0;

    pub const BALL_SCORE_VALUE: u64 = 10;
    pub const BREATHER_CHANCE: f64 = 0.1;
    pub const MULTI_SPAWN_CHANCE: f64 = 0.3;

    /// Render sizes
    pub const OBSTACLE_WIDTH: f32 = 1.8;
    pub const OBSTACLE_HEIGHT: f32 = 1.0;
    pub const BALL_RADIUS: f32 = 0.4;

    /// Roadside trees
    pub const TREE_OFFSET_X: f32 = 5.0;
    pub const TREE_VARIANCE: f32 = 2.0;
    pub const TREE_Z_JITTER: f32 = 5.0;
    pub const TREE_MIN_HEIGHT: f32 = 4.0;
    pub const TREE_HEIGHT_RANGE: f32 = 3.0;

    /// Player car lateral slide speed (presentation only)
    pub const PLAYER_SPEED_LATERAL: f32 = 15.0;
    /// Minimum horizontal swipe in CSS pixels
    pub const SWIPE_THRESHOLD: f32 = 50.0;
}
