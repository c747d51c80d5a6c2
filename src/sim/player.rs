//! Player and bullet kinematics
//!
//! Players move under a discretized constant-acceleration model: the action
//! taken on tick `i` sets the acceleration that is integrated on tick `i + 1`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::ActionSet;
use super::rect::Rect;
use crate::consts::*;
use crate::{direction, limit_length};

/// A player's single projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// In flight
    pub was_shot: bool,
    pub size: f32,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            pos: Vec2::from(BULLET_PARKED),
            vel: Vec2::ZERO,
            was_shot: false,
            size: BULLET_SIZE,
        }
    }
}

impl Bullet {
    /// Park the bullet off-screen and make it available again
    pub fn reset(&mut self) {
        self.pos = Vec2::from(BULLET_PARKED);
        self.vel = Vec2::ZERO;
        self.was_shot = false;
    }

    /// Put the bullet in flight from `from` with velocity `vel`
    pub fn fire(&mut self, from: Vec2, vel: Vec2) {
        self.pos = from;
        self.vel = vel;
        self.was_shot = true;
    }

    /// Move along the flight path; inert bullets stay put
    pub fn advance(&mut self, dt: f32) {
        if self.was_shot {
            self.pos += self.vel * dt;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// A square player body with a crosshair and one bullet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    pub crosshair: Vec2,
    pub score: u32,
    pub bullet: Bullet,
    /// Side length of the square body
    pub size: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            crosshair: Vec2::from(CROSSHAIR_START),
            score: 0,
            bullet: Bullet::default(),
            size: PLAYER_SIZE,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Advance the player one tick.
    ///
    /// Returns true if a bullet was fired this tick.
    pub fn update(&mut self, actions: &ActionSet, dt: f32) -> bool {
        self.integrate(dt);
        self.apply_thrust(actions.thrust());
        self.limit_speed();
        self.apply_friction();
        self.move_crosshair(actions);

        let fired = actions.shoot && self.try_shoot();
        self.bullet.advance(dt);
        fired
    }

    /// Constant-acceleration position and velocity step
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt + self.accel * (dt * dt) / 2.0;
        self.vel += self.accel * dt;
    }

    /// Replace the acceleration with full thrust along `thrust` (zero thrust = coast)
    pub fn apply_thrust(&mut self, thrust: Vec2) {
        self.accel = thrust.normalize_or_zero() * THRUST_ACCEL;
    }

    /// Cap speed at MAX_SPEED and stop dead below the stiction threshold
    pub fn limit_speed(&mut self) {
        self.vel = limit_length(self.vel, MAX_SPEED);
        if self.vel.length() < STICTION_SPEED {
            self.vel = Vec2::ZERO;
        }
    }

    /// Friction opposes the current velocity, felt on the next integration
    pub fn apply_friction(&mut self) {
        let speed = self.vel.length();
        if speed > FRICTION_MIN_SPEED {
            self.accel -= self.vel / speed * FRICTION_DECEL;
        }
    }

    pub fn move_crosshair(&mut self, actions: &ActionSet) {
        match actions.aim {
            Some(aim) => self.crosshair = aim,
            None => self.crosshair += actions.crosshair_dir() * CROSSHAIR_STEP,
        }
    }

    /// Fire toward the crosshair if the bullet is free.
    ///
    /// A crosshair sitting exactly on the player gives no direction, so no shot.
    pub fn try_shoot(&mut self) -> bool {
        if self.bullet.was_shot {
            return false;
        }
        match direction(self.pos, self.crosshair) {
            Some(dir) => {
                self.bullet.fire(self.pos, dir * SHOOTING_SPEED);
                true
            }
            None => false,
        }
    }

    /// Clear score, bullet and motion for a new round
    pub fn reset(&mut self, pos: Vec2, crosshair: Vec2) {
        self.score = 0;
        self.bullet.reset();
        self.vel = Vec2::ZERO;
        self.accel = Vec2::ZERO;
        self.pos = pos;
        self.crosshair = crosshair;
    }
}
