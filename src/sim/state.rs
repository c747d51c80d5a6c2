//! Game state and core simulation types
//!
//! The arena, up to two players and the world RNG live here. A seed fully
//! determines a headless run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionAxes, resolve_player_collision};
use super::player::Player;
use crate::consts::*;
use crate::error::SimError;

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired { shooter: usize },
    /// Shooter scored a point
    BulletHit { shooter: usize, target: usize },
    BulletLeftArena { shooter: usize },
    WallBounce { player: usize },
    PlayerCollision { axes: CollisionAxes },
}

/// Immutable play field bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Uniformly random point inside the arena
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..=self.width),
            rng.random_range(0.0..=self.height),
        )
    }
}

/// What a renderer needs to draw one player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: f32,
    pub crosshair: Vec2,
    pub bullet_pos: Vec2,
    pub bullet_active: bool,
    pub score: u32,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            pos: p.pos,
            size: p.size,
            crosshair: p.crosshair,
            bullet_pos: p.bullet.pos,
            bullet_active: p.bullet.was_shot,
            score: p.score,
        }
    }
}

/// Read-only copy of the world for rendering or logging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub arena: Arena,
    pub players: Vec<PlayerView>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    /// Players in join order (index 0 = player 1)
    pub players: Vec<Player>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Tie-breaks and resets draw from here
    rng: Pcg32,
}

impl GameState {
    /// Create an empty arena with the given seed
    pub fn new(arena: Arena, seed: u64) -> Self {
        Self {
            seed,
            arena,
            players: Vec::with_capacity(MAX_PLAYERS),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Add a player at `pos`. Returns its index.
    pub fn add_player(&mut self, pos: Vec2) -> Result<usize, SimError> {
        if self.players.len() >= MAX_PLAYERS {
            log::warn!("Rejected player at {pos}: arena full");
            return Err(SimError::ArenaFull { max: MAX_PLAYERS });
        }
        self.players.push(Player::new(pos));
        let index = self.players.len() - 1;
        log::info!("Player {} joined at {}", index + 1, pos);
        Ok(index)
    }

    /// The other player in a two-player game
    pub fn opponent(&self, index: usize) -> Option<&Player> {
        match self.players.len() {
            2 if index < 2 => self.players.get(1 - index),
            _ => None,
        }
    }

    /// Resolve an overlap between the two players, if any.
    ///
    /// Returns `Ok(None)` when they are not touching.
    pub fn resolve_player_collision(&mut self) -> Result<Option<CollisionAxes>, SimError> {
        let [p1, p2] = self.players.as_mut_slice() else {
            return Err(SimError::NotEnoughPlayers {
                found: self.players.len(),
            });
        };
        let axes = resolve_player_collision(p1, p2, &mut self.rng);
        if axes.is_some() {
            // Swapping components can push a speed past the cap, and rewinding can leave the arena
            let bounds = self.arena.size();
            for p in [p1, p2] {
                p.vel = crate::limit_length(p.vel, MAX_SPEED);
                p.pos = crate::clamp_to_box(p.pos, bounds);
            }
        }
        Ok(axes)
    }

    /// Start a fresh round: zero scores, park bullets, stop players and scatter them
    pub fn reset_game(&mut self) {
        for player in &mut self.players {
            let pos = self.arena.random_point(&mut self.rng);
            let crosshair = self.arena.random_point(&mut self.rng);
            player.reset(pos, crosshair);
        }
        log::info!("Game reset ({} players)", self.players.len());
    }

    /// Highest-scoring player index, `None` on a tie or with no players
    pub fn leader(&self) -> Option<usize> {
        let best = self.players.iter().map(|p| p.score).max()?;
        let mut leaders = self.players.iter().enumerate().filter(|(_, p)| p.score == best);
        let (index, _) = leaders.next()?;
        match leaders.next() {
            Some(_) => None,
            None => Some(index),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            arena: self.arena,
            players: self.players.iter().map(PlayerView::from).collect(),
        }
    }
}
