//! Match settings
//!
//! Loaded from a JSON file; every field has a default so partial files work.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::PolicyKind;
use crate::consts::*;
use crate::sim::Arena;

/// Settings loading failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Per-player setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSettings {
    pub start: Vec2,
    pub policy: PolicyKind,
}

/// Match settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Timing ===
    /// Display frame rate
    pub frame_rate: f32,
    /// Physics ticks per displayed frame
    pub slowdown_factor: f32,

    // === Match rules ===
    /// First player to this score wins
    pub max_score: u32,
    /// Hard stop for headless runs (0 = unlimited)
    pub max_ticks: u64,
    /// Number of matches to play back to back
    pub matches: u32,

    // === Players ===
    pub players: [PlayerSettings; 2],
    /// Per-tick probability an AI flips a held button
    pub flip_prob: f64,

    // === Determinism / output ===
    pub seed: u64,
    /// Where to write the match results log, if anywhere
    pub results_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            frame_rate: FRAME_RATE,
            slowdown_factor: SLOWDOWN_FACTOR,

            max_score: MAX_SCORE,
            max_ticks: 1_000_000,
            matches: 1,

            players: [
                PlayerSettings {
                    start: Vec2::new(100.0, 100.0),
                    policy: PolicyKind::Pursuit,
                },
                PlayerSettings {
                    start: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
                    policy: PolicyKind::Intercept,
                },
            ],
            flip_prob: POLICY_FLIP_PROB,

            seed: 0,
            results_path: None,
        }
    }
}

impl Settings {
    /// Fixed physics step derived from frame rate and slowdown
    pub fn dt(&self) -> f32 {
        1.0 / (self.frame_rate * self.slowdown_factor)
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |field: &'static str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {v}"),
                })
            }
        };
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("frame_rate", self.frame_rate)?;
        positive("slowdown_factor", self.slowdown_factor)?;
        positive("dt", self.dt())?;

        // A player box must fit, or the wall bounce cannot put it back inside
        for (field, v) in [("arena_width", self.arena_width), ("arena_height", self.arena_height)] {
            if v < PLAYER_SIZE {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be at least the player size {PLAYER_SIZE}, got {v}"),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.flip_prob) {
            return Err(SettingsError::Invalid {
                field: "flip_prob",
                reason: format!("must be within [0, 1], got {}", self.flip_prob),
            });
        }
        if self.max_score == 0 {
            return Err(SettingsError::Invalid {
                field: "max_score",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
