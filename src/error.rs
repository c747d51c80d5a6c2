//! Error types for rejected simulation operations

use thiserror::Error;

/// Operations the simulation refuses to perform. Nothing is mutated when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("arena already holds the maximum of {max} players")]
    ArenaFull { max: usize },

    #[error("player collision needs two players, found {found}")]
    NotEnoughPlayers { found: usize },

    #[error("expected {expected} action sets, got {got}")]
    ActionCountMismatch { expected: usize, got: usize },
}
