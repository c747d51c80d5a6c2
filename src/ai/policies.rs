//! Built-in policies
//!
//! All three share the same held-button movement; they differ in how they
//! work the crosshair.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{HeldButtons, Policy, predict_aim_point};
use crate::consts::SHOOTING_SPEED;
use crate::sim::{ActionSet, GameState};

/// Wanders and waves the crosshair around at random
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    held: HeldButtons,
    seed: u64,
    rng: Pcg32,
}

impl RandomPolicy {
    pub fn new(seed: u64, flip_prob: f64) -> Self {
        Self {
            held: HeldButtons::new(flip_prob),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn decide(&mut self, _me: usize, _state: &GameState) -> ActionSet {
        let next = self.held.next_all(&mut self.rng);
        self.held.hold(next)
    }

    fn reset(&mut self) {
        self.held.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Random movement, crosshair chases the opponent's current position
#[derive(Debug, Clone)]
pub struct PursuitPolicy {
    held: HeldButtons,
    seed: u64,
    rng: Pcg32,
}

impl PursuitPolicy {
    pub fn new(seed: u64, flip_prob: f64) -> Self {
        Self {
            held: HeldButtons::new(flip_prob),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Policy for PursuitPolicy {
    fn decide(&mut self, me: usize, state: &GameState) -> ActionSet {
        let mut next = self.held.next_movement(&mut self.rng);
        if let (Some(own), Some(opponent)) = (state.players.get(me), state.opponent(me)) {
            next.steer_crosshair(own.crosshair, opponent.pos);
        }
        self.held.hold(next)
    }

    fn reset(&mut self) {
        self.held.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    fn name(&self) -> &str {
        "pursuit"
    }
}

/// Random movement, crosshair leads the opponent to where a bullet would meet it
#[derive(Debug, Clone)]
pub struct InterceptPolicy {
    held: HeldButtons,
    seed: u64,
    rng: Pcg32,
}

impl InterceptPolicy {
    pub fn new(seed: u64, flip_prob: f64) -> Self {
        Self {
            held: HeldButtons::new(flip_prob),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Point the crosshair should head for. Falls back to the opponent's
    /// current position when no intercept exists.
    pub fn aim_target(&self, me: usize, state: &GameState) -> Option<Vec2> {
        let own = state.players.get(me)?;
        let opponent = state.opponent(me)?;
        let target = predict_aim_point(own.pos, opponent.pos, opponent.vel, SHOOTING_SPEED)
            .unwrap_or_else(|| {
                log::trace!("No intercept for player {}, aiming at opponent", me + 1);
                opponent.pos
            });
        Some(target)
    }
}

impl Policy for InterceptPolicy {
    fn decide(&mut self, me: usize, state: &GameState) -> ActionSet {
        let mut next = self.held.next_movement(&mut self.rng);
        if let (Some(own), Some(target)) = (state.players.get(me), self.aim_target(me, state)) {
            next.steer_crosshair(own.crosshair, target);
        }
        self.held.hold(next)
    }

    fn reset(&mut self) {
        self.held.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    fn name(&self) -> &str {
        "intercept"
    }
}
