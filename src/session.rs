//! Match driver
//!
//! Owns the game state and one policy per player, feeds policy decisions into
//! the fixed-step tick and decides when a match is over. Works the same with
//! or without a display: a render loop calls [`Session::advance`] with real
//! frame times, a headless run calls [`Session::run_match`].

use thiserror::Error;

use crate::ai::Policy;
use crate::consts::MAX_SUBSTEPS;
use crate::error::SimError;
use crate::results::MatchResult;
use crate::settings::{Settings, SettingsError};
use crate::sim::{ActionSet, GameState, TickReport, tick};

/// Reasons a session cannot be set up
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Sim(#[from] SimError),
}

/// A running match between two policies
pub struct Session {
    pub state: GameState,
    policies: Vec<Box<dyn Policy>>,
    dt: f32,
    max_score: u32,
    max_ticks: u64,
    /// Ticks since the current match started
    match_ticks: u64,
    accumulator: f32,
}

impl Session {
    /// Build the arena, players and policies described by `settings`
    pub fn new(settings: &Settings) -> Result<Self, SessionError> {
        settings.validate()?;

        let mut state = GameState::new(settings.arena(), settings.seed);
        let mut policies = Vec::with_capacity(settings.players.len());

        for (i, player) in settings.players.iter().enumerate() {
            state.add_player(player.start)?;
            // Distinct streams per player so the two AIs never mirror each other
            let seed = settings.seed.wrapping_add(1 + i as u64);
            policies.push(player.policy.build(seed, settings.flip_prob));
        }

        Ok(Self::with_policies(state, policies, settings))
    }

    /// Use an existing state and caller-provided policies (one per player)
    pub fn with_policies(state: GameState, policies: Vec<Box<dyn Policy>>, settings: &Settings) -> Self {
        log::info!(
            "Session: {} (dt={:.5}s, first to {})",
            policies.iter().map(|p| p.name()).collect::<Vec<_>>().join(" vs "),
            settings.dt(),
            settings.max_score
        );
        Self {
            state,
            policies,
            dt: settings.dt(),
            max_score: settings.max_score,
            max_ticks: settings.max_ticks,
            match_ticks: 0,
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn match_ticks(&self) -> u64 {
        self.match_ticks
    }

    /// Ask every policy for its actions. Policies only read the state.
    pub fn decide(&mut self) -> Vec<ActionSet> {
        let state = &self.state;
        self.policies
            .iter_mut()
            .enumerate()
            .map(|(i, policy)| policy.decide(i, state))
            .collect()
    }

    /// One fixed-step tick driven by the policies
    pub fn step(&mut self) -> Result<TickReport, SimError> {
        let actions = self.decide();
        self.step_with(&actions)
    }

    /// One fixed-step tick with externally supplied actions (e.g. a human player)
    pub fn step_with(&mut self, actions: &[ActionSet]) -> Result<TickReport, SimError> {
        let report = tick(&mut self.state, actions, self.dt)?;
        self.match_ticks += 1;
        Ok(report)
    }

    /// Run as many ticks as fit into `frame_dt`, capped at MAX_SUBSTEPS.
    ///
    /// Leftover time carries over to the next frame. Returns the ticks run.
    pub fn advance(&mut self, frame_dt: f32) -> Result<u32, SimError> {
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS && !self.is_finished() {
            self.step()?;
            self.accumulator -= self.dt;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = 0.0;
        }
        Ok(substeps)
    }

    /// Someone reached the winning score, or the tick budget is spent
    pub fn is_finished(&self) -> bool {
        let scored_out = self.state.players.iter().any(|p| p.score >= self.max_score);
        let timed_out = self.max_ticks > 0 && self.match_ticks >= self.max_ticks;
        scored_out || timed_out
    }

    /// Play until the match is over
    pub fn run_match(&mut self) -> Result<MatchResult, SimError> {
        while !self.is_finished() {
            self.step()?;
        }
        let result = self.result();
        log::info!(
            "Match over after {} ticks: {} - {}",
            result.ticks,
            result.scores[0],
            result.scores[1]
        );
        Ok(result)
    }

    /// Current standing as a match result
    pub fn result(&self) -> MatchResult {
        let score = |i: usize| self.state.players.get(i).map_or(0, |p| p.score);
        let name = |i: usize| self.policies.get(i).map_or_else(String::new, |p| p.name().to_string());
        MatchResult {
            scores: [score(0), score(1)],
            ticks: self.match_ticks,
            winner: self.state.leader(),
            policies: [name(0), name(1)],
        }
    }

    /// New round: reset the arena and every policy's memory
    pub fn restart(&mut self) {
        self.state.reset_game();
        for policy in &mut self.policies {
            policy.reset();
        }
        self.match_ticks = 0;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::PolicyKind;

    fn quick_settings() -> Settings {
        Settings {
            max_score: 2,
            max_ticks: 20_000,
            seed: 2024,
            ..Default::default()
        }
    }

    #[test]
    fn test_match_runs_to_completion() {
        let mut session = Session::new(&quick_settings()).unwrap();
        let result = session.run_match().unwrap();

        assert!(session.is_finished());
        assert!(result.ticks > 0);
        assert!(result.ticks <= 20_000);
        if let Some(w) = result.winner {
            assert!(result.scores[w] >= result.scores[1 - w]);
        }
        assert_eq!(result.policies, ["pursuit".to_string(), "intercept".to_string()]);
    }

    #[test]
    fn test_same_seed_same_match() {
        let a = Session::new(&quick_settings()).unwrap().run_match().unwrap();
        let b = Session::new(&quick_settings()).unwrap().run_match().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tick_budget_ends_match() {
        let settings = Settings {
            max_ticks: 50,
            ..quick_settings()
        };
        let mut session = Session::new(&settings).unwrap();
        let result = session.run_match().unwrap();
        assert_eq!(result.ticks, 50);
    }

    #[test]
    fn test_advance_accumulates_partial_frames() {
        let mut session = Session::new(&quick_settings()).unwrap();
        let dt = session.dt();

        // Half a tick: nothing runs yet
        assert_eq!(session.advance(dt * 0.5).unwrap(), 0);
        // The other half completes one tick
        assert_eq!(session.advance(dt * 0.6).unwrap(), 1);
        // One 60 Hz frame is two 120 Hz ticks
        assert_eq!(session.advance(1.0 / 60.0).unwrap(), 2);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut session = Session::new(&quick_settings()).unwrap();
        assert_eq!(session.advance(1.0).unwrap(), MAX_SUBSTEPS);
        assert_eq!(session.match_ticks(), MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_restart_clears_scores() {
        let mut session = Session::new(&quick_settings()).unwrap();
        session.run_match().unwrap();
        session.restart();
        assert_eq!(session.match_ticks(), 0);
        assert!(session.state.players.iter().all(|p| p.score == 0 && !p.bullet.was_shot));
        assert!(!session.is_finished());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let zero_rate = Settings {
            frame_rate: 0.0,
            ..quick_settings()
        };
        assert!(matches!(
            Session::new(&zero_rate),
            Err(SessionError::Settings(SettingsError::Invalid { field: "frame_rate", .. }))
        ));

        let tiny_arena = Settings {
            arena_width: 40.0,
            arena_height: 40.0,
            ..quick_settings()
        };
        assert!(matches!(
            Session::new(&tiny_arena),
            Err(SessionError::Settings(SettingsError::Invalid { field: "arena_width", .. }))
        ));
    }

    #[test]
    fn test_step_with_human_actions() {
        let settings = Settings {
            players: [
                crate::settings::PlayerSettings {
                    start: glam::Vec2::new(100.0, 100.0),
                    policy: PolicyKind::Random,
                },
                crate::settings::PlayerSettings {
                    start: glam::Vec2::new(1500.0, 700.0),
                    policy: PolicyKind::Random,
                },
            ],
            ..quick_settings()
        };
        let mut session = Session::new(&settings).unwrap();
        let aim = ActionSet {
            shoot: true,
            ..Default::default()
        }
        .with_aim(glam::Vec2::new(1500.0, 700.0));

        session.step_with(&[aim, ActionSet::default()]).unwrap();
        assert!(session.state.players[0].bullet.was_shot);
        assert!(session.step_with(&[aim]).is_err());
    }
}
