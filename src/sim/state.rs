//! Game state and core simulation types

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::lane::Lane;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Title screen, no run started yet
    #[default]
    Ready,
    /// Active gameplay
    Running,
    /// Run frozen by the player or by losing focus
    Paused,
    /// Run ended by hitting an obstacle
    GameOver,
}

/// Something the host should react to (sound, floating text, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A collectible was picked up and removed
    Collected {
        id: EntityId,
        kind: EntityKind,
        /// World position for transient feedback
        anchor: Vec3,
        points: u64,
    },
    /// The player drove into an obstacle; the run is over
    Crashed { id: EntityId, lane: Lane, score: u64 },
}

/// Complete simulation state for one player
#[derive(Debug, Clone)]
pub struct SimState {
    /// Balance constants, fixed for the lifetime of the state
    pub tuning: Tuning,
    /// Seed of the current run
    pub seed: u64,
    pub phase: RunPhase,
    /// Road speed in units per second
    pub speed: f32,
    /// Seconds since the last batch
    pub since_last_spawn: f32,
    /// Active entities (order irrelevant)
    pub entities: Vec<Entity>,
    pub score: u64,
    /// Balls collected this run
    pub collectibles: u32,
    /// Running ticks this run
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: EntityId,
}

impl SimState {
    /// Create an idle state; call [`SimState::start_run`] to play
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            speed: tuning.initial_speed,
            tuning,
            seed,
            phase: RunPhase::Ready,
            since_last_spawn: 0.0,
            entities: Vec::new(),
            score: 0,
            collectibles: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Begin a fresh run, discarding whatever was on the road
    pub fn start_run(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = RunPhase::Running;
        self.speed = self.tuning.initial_speed;
        self.since_last_spawn = 0.0;
        self.entities.clear();
        self.score = 0;
        self.collectibles = 0;
        self.time_ticks = 0;
        self.next_id = 1;
        log::info!("Run started (seed {})", seed);
    }

    /// Back to the title screen
    pub fn exit_to_menu(&mut self) {
        self.phase = RunPhase::Ready;
        self.speed = self.tuning.initial_speed;
        self.since_last_spawn = 0.0;
        self.entities.clear();
        self.score = 0;
        self.collectibles = 0;
    }

    /// Flip between Running and Paused; other phases are unaffected
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            RunPhase::Running => RunPhase::Paused,
            RunPhase::Paused => RunPhase::Running,
            other => other,
        };
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an entity by hand (tests, scripted scenarios)
    pub fn place(&mut self, kind: EntityKind, lane: i8, z: f32) -> EntityId {
        let id = self.next_entity_id();
        let (width, height) = match kind {
            EntityKind::Obstacle => (self.tuning.obstacle_width, self.tuning.obstacle_height),
            EntityKind::Collectible => {
                let d = self.tuning.collectible_radius * 2.0;
                (d, d)
            }
            EntityKind::Decoration => (1.0, self.tuning.decoration_min_height),
        };
        self.entities.push(Entity {
            id,
            kind,
            lane,
            z,
            width,
            height,
            x_jitter: 0.0,
        });
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = SimState::new(7, Tuning::default());
        assert_eq!(state.phase, RunPhase::Ready);
        assert_eq!(state.speed, 15.0);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_start_run_resets_everything() {
        let mut state = SimState::new(7, Tuning::default());
        state.start_run(7);
        state.speed = 42.0;
        state.score = 120;
        state.collectibles = 12;
        state.since_last_spawn = 0.3;
        state.place(EntityKind::Obstacle, 0, -10.0);

        state.start_run(8);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.speed, state.tuning.initial_speed);
        assert_eq!(state.score, 0);
        assert_eq!(state.collectibles, 0);
        assert_eq!(state.since_last_spawn, 0.0);
        assert!(state.entities.is_empty());
        assert_eq!(state.seed, 8);
    }

    #[test]
    fn test_toggle_pause_only_while_playing() {
        let mut state = SimState::new(1, Tuning::default());
        state.toggle_pause();
        assert_eq!(state.phase, RunPhase::Ready);

        state.start_run(1);
        state.toggle_pause();
        assert_eq!(state.phase, RunPhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, RunPhase::Running);

        state.phase = RunPhase::GameOver;
        state.toggle_pause();
        assert_eq!(state.phase, RunPhase::GameOver);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = SimState::new(1, Tuning::default());
        let a = state.next_entity_id();
        let b = state.place(EntityKind::Collectible, 1, -5.0);
        let c = state.next_entity_id();
        assert!(a < b && b < c);
    }
}
