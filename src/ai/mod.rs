//! Computer-controlled players
//!
//! A policy looks at the game state and decides what its player does this
//! tick. Policies never touch the state; each one owns its own memory of the
//! buttons it held last tick and its own seeded RNG, so two instances never
//! influence each other.

pub mod intercept;
pub mod policies;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::POLICY_FLIP_PROB;
use crate::sim::{ActionSet, GameState};

pub use intercept::{intercept_time, predict_aim_point};
pub use policies::{InterceptPolicy, PursuitPolicy, RandomPolicy};

/// Decision maker for one player
pub trait Policy {
    /// Decide the actions for player `me` this tick
    fn decide(&mut self, me: usize, state: &GameState) -> ActionSet;

    /// Forget held buttons (called when a new round starts)
    fn reset(&mut self);

    /// Policy name for logs
    fn name(&self) -> &str;
}

/// Available policy implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Random,
    Pursuit,
    #[default]
    Intercept,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::Pursuit => "pursuit",
            PolicyKind::Intercept => "intercept",
        }
    }

    /// Build a fresh policy of this kind
    pub fn build(self, seed: u64, flip_prob: f64) -> Box<dyn Policy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(seed, flip_prob)),
            PolicyKind::Pursuit => Box::new(PursuitPolicy::new(seed, flip_prob)),
            PolicyKind::Intercept => Box::new(InterceptPolicy::new(seed, flip_prob)),
        }
    }
}

/// Buttons held over from the previous tick.
///
/// Each tick every button flips with probability `flip_prob` and otherwise
/// keeps its previous value, so AI players commit to a direction for a while
/// instead of jittering.
#[derive(Debug, Clone)]
pub struct HeldButtons {
    pub previous: ActionSet,
    flip_prob: f64,
}

impl HeldButtons {
    /// `flip_prob` is clamped into [0, 1]; NaN falls back to the default
    pub fn new(flip_prob: f64) -> Self {
        let flip_prob = if flip_prob.is_nan() {
            log::warn!("Flip probability is NaN, using {POLICY_FLIP_PROB}");
            POLICY_FLIP_PROB
        } else {
            flip_prob.clamp(0.0, 1.0)
        };
        Self {
            previous: ActionSet::default(),
            flip_prob,
        }
    }

    pub fn flip_prob(&self) -> f64 {
        self.flip_prob
    }

    /// Next movement and shoot buttons; crosshair buttons are left cleared
    pub fn next_movement<R: Rng + ?Sized>(&self, rng: &mut R) -> ActionSet {
        let prev = &self.previous;
        let mut flip = |held: bool| held ^ rng.random_bool(self.flip_prob);
        ActionSet {
            up: flip(prev.up),
            down: flip(prev.down),
            left: flip(prev.left),
            right: flip(prev.right),
            shoot: flip(prev.shoot),
            ..Default::default()
        }
    }

    /// Next value for every button, crosshair buttons included
    pub fn next_all<R: Rng + ?Sized>(&self, rng: &mut R) -> ActionSet {
        let mut next = self.next_movement(rng);
        let prev = &self.previous;
        let mut flip = |held: bool| held ^ rng.random_bool(self.flip_prob);
        next.ch_up = flip(prev.ch_up);
        next.ch_down = flip(prev.ch_down);
        next.ch_left = flip(prev.ch_left);
        next.ch_right = flip(prev.ch_right);
        next
    }

    /// Remember what was chosen this tick
    pub fn hold(&mut self, actions: ActionSet) -> ActionSet {
        self.previous = actions;
        actions
    }

    pub fn clear(&mut self) {
        self.previous = ActionSet::default();
    }
}
