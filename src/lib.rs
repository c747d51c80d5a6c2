//! Move n' Shoot - a 2-player top-down arena shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, bullets, collisions, game state)
//! - `ai`: Action policies that read the game state and emit actions
//! - `session`: Headless match driver with fixed-step accumulation
//! - `settings`: JSON-backed configuration
//! - `results`: Match results log

pub mod ai;
pub mod error;
pub mod results;
pub mod session;
pub mod settings;
pub mod sim;

pub use ai::{Policy, PolicyKind};
pub use error::SimError;
pub use results::{MatchLog, MatchResult};
pub use session::{Session, SessionError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Display frame rate the simulation is paced against
    pub const FRAME_RATE: f32 = 60.0;
    /// Ticks per displayed frame (physics runs at FRAME_RATE * SLOWDOWN_FACTOR)
    pub const SLOWDOWN_FACTOR: f32 = 2.0;
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / (FRAME_RATE * SLOWDOWN_FACTOR);
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena defaults
    pub const ARENA_WIDTH: f32 = 1600.0;
    pub const ARENA_HEIGHT: f32 = 800.0;
    /// At most two players share an arena
    pub const MAX_PLAYERS: usize = 2;

    /// Player body
    pub const PLAYER_SIZE: f32 = 100.0;
    pub const MAX_SPEED: f32 = 1500.0;
    /// Thrust acceleration magnitude (pixels/s²)
    pub const THRUST_ACCEL: f32 = 20000.0;
    /// Friction deceleration magnitude (pixels/s²)
    pub const FRICTION_DECEL: f32 = 3000.0;
    /// Below this speed the player stops dead
    pub const STICTION_SPEED: f32 = 30.0;
    /// Friction only applies above this speed
    pub const FRICTION_MIN_SPEED: f32 = 0.1;
    /// Wall bounce keeps 80% of the normal velocity
    pub const WALL_RESTITUTION: f32 = 0.8;

    /// Crosshair step per tick for discrete aiming (pixels)
    pub const CROSSHAIR_STEP: f32 = 30.0;
    pub const CROSSHAIR_START: (f32, f32) = (200.0, 200.0);

    /// Bullet defaults
    pub const BULLET_SIZE: f32 = 20.0;
    pub const SHOOTING_SPEED: f32 = 3000.0;
    /// Where an inert bullet is parked (off-screen)
    pub const BULLET_PARKED: (f32, f32) = (-100.0, -100.0);

    /// Probability an AI flips one of its held actions per tick
    pub const POLICY_FLIP_PROB: f64 = 0.05;
    /// Score that ends a match
    pub const MAX_SCORE: u32 = 100;
}

/// Unit vector pointing from `from` to `to`, or `None` when they coincide
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Scale `v` down so its length is at most `max_len`
#[inline]
pub fn limit_length(v: Vec2, max_len: f32) -> Vec2 {
    let len = v.length();
    if len > max_len { v * (max_len / len) } else { v }
}

/// Clamp a point into the box `[0, size.x] x [0, size.y]`
#[inline]
pub fn clamp_to_box(p: Vec2, size: Vec2) -> Vec2 {
    p.clamp(Vec2::ZERO, size)
}

/// Signed axis value from a pair of opposing buttons
#[inline]
pub fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}
