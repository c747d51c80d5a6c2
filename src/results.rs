//! Match results log
//!
//! Keeps every finished match of a headless run and can be written to disk
//! as JSON for later comparison between policies.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Results log I/O failures
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("results file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid results JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Final score per player
    pub scores: [u32; 2],
    /// Ticks simulated
    pub ticks: u64,
    /// Winning player index, `None` for a draw
    pub winner: Option<usize>,
    /// Policy names, in player order
    #[serde(default)]
    pub policies: [String; 2],
}

/// Every match played so far
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchLog {
    pub entries: Vec<MatchResult>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, result: MatchResult) {
        self.entries.push(result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Matches won by each player
    pub fn wins(&self) -> [u32; 2] {
        let mut wins = [0; 2];
        for winner in self.entries.iter().filter_map(|e| e.winner) {
            if let Some(w) = wins.get_mut(winner) {
                *w += 1;
            }
        }
        wins
    }

    pub fn draws(&self) -> u32 {
        self.entries.iter().filter(|e| e.winner.is_none()).count() as u32
    }

    /// Mean match length in ticks
    pub fn average_ticks(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: u64 = self.entries.iter().map(|e| e.ticks).sum();
        Some(total as f64 / self.entries.len() as f64)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResultsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let log: Self = serde_json::from_str(&json)?;
        log::info!("Loaded {} match results", log.entries.len());
        Ok(log)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ResultsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Match results saved ({} entries)", self.entries.len());
        Ok(())
    }
}
