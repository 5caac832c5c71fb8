//! Discrete lane state for the player
//!
//! The simulation only ever looks at the discrete [`Lane`]. Smooth sliding
//! between lanes is handled by `present::LateralMotion`.

use serde::{Deserialize, Serialize};

/// One of the three road lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Signed lane index (-1, 0, 1), also the x multiplier for lane width
    pub fn index(self) -> i8 {
        match self {
            Lane::Left => -1,
            Lane::Center => 0,
            Lane::Right => 1,
        }
    }

    pub fn from_index(index: i8) -> Option<Self> {
        match index {
            -1 => Some(Lane::Left),
            0 => Some(Lane::Center),
            1 => Some(Lane::Right),
            _ => None,
        }
    }

    /// Neighbouring lane in the given direction, clamped at the road edges
    pub fn shifted(self, shift: LaneShift) -> Self {
        let next = self.index() + shift.delta();
        Lane::from_index(next).unwrap_or(self)
    }

    /// Lane centre in world x
    pub fn x(self, lane_width: f32) -> f32 {
        self.index() as f32 * lane_width
    }
}

/// A single discrete lane change request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneShift {
    Left,
    Right,
}

impl LaneShift {
    fn delta(self) -> i8 {
        match self {
            LaneShift::Left => -1,
            LaneShift::Right => 1,
        }
    }

    /// Map a `KeyboardEvent.key` value to a lane shift
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(LaneShift::Left),
            "ArrowRight" | "d" | "D" => Some(LaneShift::Right),
            _ => None,
        }
    }
}

/// Authoritative player lane, owned by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerLane {
    lane: Lane,
}

impl PlayerLane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Lane {
        self.lane
    }

    /// Move one lane; returns true if the lane actually changed
    pub fn shift(&mut self, shift: LaneShift) -> bool {
        let next = self.lane.shifted(shift);
        let changed = next != self.lane;
        self.lane = next;
        changed
    }

    /// Jump straight to a lane (autopilot, tests)
    pub fn set(&mut self, lane: Lane) {
        self.lane = lane;
    }

    pub fn reset(&mut self) {
        self.lane = Lane::Center;
    }
}

/// Turns a touch start/end pair into at most one lane shift
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
    threshold: f32,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            start_x: None,
            threshold,
        }
    }

    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish the gesture. Short swipes and unmatched ends yield nothing.
    pub fn end(&mut self, x: f32) -> Option<LaneShift> {
        let start = self.start_x.take()?;
        let diff = start - x;
        if diff.abs() <= self.threshold {
            return None;
        }
        if diff > 0.0 {
            Some(LaneShift::Left)
        } else {
            Some(LaneShift::Right)
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_clamps_at_edges() {
        let mut lane = PlayerLane::new();
        assert_eq!(lane.current(), Lane::Center);

        assert!(lane.shift(LaneShift::Left));
        assert_eq!(lane.current(), Lane::Left);
        assert!(!lane.shift(LaneShift::Left));
        assert_eq!(lane.current(), Lane::Left);

        assert!(lane.shift(LaneShift::Right));
        assert!(lane.shift(LaneShift::Right));
        assert!(!lane.shift(LaneShift::Right));
        assert_eq!(lane.current(), Lane::Right);

        lane.reset();
        assert_eq!(lane.current(), Lane::Center);
    }

    #[test]
    fn test_index_round_trip_and_decoration_lanes() {
        for lane in Lane::ALL {
            assert_eq!(Lane::from_index(lane.index()), Some(lane));
        }
        assert_eq!(Lane::from_index(2), None);
        assert_eq!(Lane::from_index(-2), None);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(LaneShift::from_key("ArrowLeft"), Some(LaneShift::Left));
        assert_eq!(LaneShift::from_key("d"), Some(LaneShift::Right));
        assert_eq!(LaneShift::from_key("Escape"), None);
    }

    #[test]
    fn test_swipe_threshold() {
        let mut swipe = SwipeTracker::new(50.0);

        swipe.begin(200.0);
        assert_eq!(swipe.end(170.0), None);

        // Finger moved toward negative x
        swipe.begin(200.0);
        assert_eq!(swipe.end(120.0), Some(LaneShift::Left));

        swipe.begin(100.0);
        assert_eq!(swipe.end(151.0), Some(LaneShift::Right));

        // End without a start
        assert_eq!(swipe.end(0.0), None);
    }
}
