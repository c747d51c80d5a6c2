//! Per-tick player intent

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::axis;

/// What one player wants to do during a single tick.
///
/// Movement buttons drive thrust; `ch_*` buttons nudge the crosshair. When
/// `aim` is set (pointer aiming) the crosshair jumps straight to it and the
/// `ch_*` buttons are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionSet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
    pub ch_up: bool,
    pub ch_down: bool,
    pub ch_left: bool,
    pub ch_right: bool,
    /// Direct crosshair position (mouse/pointer)
    #[serde(default)]
    pub aim: Option<Vec2>,
}

impl ActionSet {
    /// Pointer-driven actions: crosshair follows `aim`
    pub fn with_aim(mut self, aim: Vec2) -> Self {
        self.aim = Some(aim);
        self
    }

    /// Thrust direction in screen space (y grows downward), components in {-1, 0, 1}
    pub fn thrust(&self) -> Vec2 {
        Vec2::new(axis(self.right, self.left), axis(self.down, self.up))
    }

    /// Discrete crosshair direction, components in {-1, 0, 1}
    pub fn crosshair_dir(&self) -> Vec2 {
        Vec2::new(axis(self.ch_right, self.ch_left), axis(self.ch_down, self.ch_up))
    }

    /// Steer the crosshair buttons from `crosshair` toward `target`, one axis sign at a time
    pub fn steer_crosshair(&mut self, crosshair: Vec2, target: Vec2) {
        self.ch_left = target.x < crosshair.x;
        self.ch_right = target.x > crosshair.x;
        self.ch_up = target.y < crosshair.y;
        self.ch_down = target.y > crosshair.y;
    }
}
