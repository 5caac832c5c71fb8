//! Host-side game driver
//!
//! Owns everything the simulation treats as external: the frame clock, the
//! player's lane and input gestures, pause requests, the presentation slide
//! and the best score. The browser entry point and the native demo both run
//! the game through this type.

use crate::best_score::BestScore;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::present::{EntityInstance, LateralMotion, RenderFrame, build_instances};
use crate::sim::autopilot;
use crate::sim::{
    Lane, LaneShift, PlayerLane, RunPhase, SimEvent, SimState, SwipeTracker, TickInput, tick,
};
use crate::tuning::Tuning;

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Driver {
    pub state: SimState,
    lane: PlayerLane,
    swipe: SwipeTracker,
    lateral: LateralMotion,
    best: BestScore,
    accumulator: f32,
    /// Pause toggle waiting for the next simulation step
    pending_pause: bool,
    autopilot: bool,
}

impl Driver {
    pub fn new(seed: u64, tuning: Tuning, best: BestScore) -> Self {
        let swipe = SwipeTracker::new(tuning.swipe_threshold);
        Self {
            state: SimState::new(seed, tuning),
            lane: PlayerLane::new(),
            swipe,
            lateral: LateralMotion::new(),
            best,
            accumulator: 0.0,
            pending_pause: false,
            autopilot: false,
        }
    }

    /// New game: fresh road, initial speed, centre lane
    pub fn start_run(&mut self, seed: u64) {
        self.state.start_run(seed);
        self.lane.reset();
        self.lateral.reset();
        self.swipe.cancel();
        self.accumulator = 0.0;
        self.pending_pause = false;
    }

    /// Abandon the run and return to the title screen
    pub fn exit_to_menu(&mut self) {
        self.state.exit_to_menu();
        self.lane.reset();
        self.lateral.reset();
        self.accumulator = 0.0;
        self.pending_pause = false;
        log::info!("Returned to menu");
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn lane(&self) -> Lane {
        self.lane.current()
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
        log::info!("Autopilot: {}", self.autopilot);
    }

    /// Lane change from the player; ignored unless a run is active
    pub fn shift_lane(&mut self, shift: LaneShift) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.lane.shift(shift)
    }

    /// Toggle pause on the next step (only meaningful mid-run)
    pub fn request_pause(&mut self) {
        if matches!(self.state.phase, RunPhase::Running | RunPhase::Paused) {
            self.pending_pause = !self.pending_pause;
        }
    }

    /// Pause if running (tab hidden, window blur); never unpauses.
    ///
    /// A resume still waiting for the next step is cancelled.
    pub fn auto_pause(&mut self) {
        match self.state.phase {
            RunPhase::Running if !self.pending_pause => {
                self.pending_pause = true;
                log::info!("Auto-paused");
            }
            RunPhase::Paused if self.pending_pause => {
                self.pending_pause = false;
                log::info!("Resume cancelled by auto-pause");
            }
            _ => {}
        }
    }

    /// Route a `KeyboardEvent.key`; returns true if the key was used
    pub fn key_down(&mut self, key: &str) -> bool {
        if let Some(shift) = LaneShift::from_key(key) {
            self.shift_lane(shift);
            return true;
        }
        match key {
            "Escape" | "p" | "P" => {
                self.request_pause();
                true
            }
            "i" | "I" => {
                self.toggle_autopilot();
                true
            }
            _ => false,
        }
    }

    pub fn touch_start(&mut self, x: f32) {
        self.swipe.begin(x);
    }

    pub fn touch_end(&mut self, x: f32) {
        if let Some(shift) = self.swipe.end(x) {
            self.shift_lane(shift);
        }
    }

    /// Run as many fixed simulation steps as the frame delta allows.
    ///
    /// Returns every event produced during the frame.
    pub fn advance(&mut self, frame_dt: f32) -> Vec<SimEvent> {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        let mut events = Vec::new();

        if !self.state.is_running() && !self.pending_pause {
            // Nothing to simulate; don't bank time for later
            self.accumulator = 0.0;
            self.update_presentation(dt);
            return events;
        }

        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if self.autopilot && self.state.is_running() {
                if let Some(shift) =
                    autopilot::steer(&self.state.entities, self.lane.current(), &self.state.tuning)
                {
                    self.lane.shift(shift);
                }
            }

            let input = TickInput {
                player_lane: self.lane.current(),
                pause: std::mem::take(&mut self.pending_pause),
            };
            let step = tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &step {
                if let SimEvent::Crashed { score, .. } = event {
                    log::info!("Game over - score {}", score);
                    self.best.record(*score);
                }
            }
            events.extend(step);

            if !self.state.is_running() {
                self.accumulator = 0.0;
                break;
            }
        }

        // Drop time we could not simulate this frame
        self.accumulator = self.accumulator.min(SIM_DT);

        self.update_presentation(dt);
        events
    }

    fn update_presentation(&mut self, dt: f32) {
        // The car freezes with everything else while paused
        if self.state.phase != RunPhase::Paused {
            self.lateral.update(self.lane.current(), dt, &self.state.tuning);
        }
    }

    pub fn render_frame(&self, events: &[SimEvent]) -> RenderFrame {
        RenderFrame::new(
            &self.state,
            &self.lateral,
            self.best.value(),
            self.autopilot,
            events,
        )
    }

    pub fn instances(&self) -> Vec<EntityInstance> {
        build_instances(&self.state)
    }
}
