//! Fixed timestep simulation tick
//!
//! Advances every player and bullet, applies the arena bounds, scores hits and
//! finally resolves player-vs-player contact.

use super::action::ActionSet;
use super::collision::{bounce_off_walls, bullet_left_arena};
use super::state::{GameEvent, GameState};
use crate::error::SimError;

/// Everything that happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    /// Points scored this tick, per shooter index
    pub fn hits(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::BulletHit { shooter, .. } => Some(*shooter),
            _ => None,
        })
    }
}

/// Advance the game state by one fixed timestep.
///
/// `actions` holds one entry per player, in player order. A length mismatch
/// is rejected before anything moves.
pub fn tick(state: &mut GameState, actions: &[ActionSet], dt: f32) -> Result<TickReport, SimError> {
    if actions.len() != state.players.len() {
        return Err(SimError::ActionCountMismatch {
            expected: state.players.len(),
            got: actions.len(),
        });
    }

    let mut report = TickReport::default();
    let bounds = state.arena.size();
    let count = state.players.len();

    state.time_ticks += 1;

    for (i, input) in actions.iter().enumerate() {
        let player = &mut state.players[i];

        if player.update(input, dt) {
            report.events.push(GameEvent::BulletFired { shooter: i });
        }

        player.crosshair = crate::clamp_to_box(player.crosshair, bounds);

        if bounce_off_walls(player, bounds) {
            report.events.push(GameEvent::WallBounce { player: i });
        }

        if !player.bullet.was_shot {
            continue;
        }

        let bullet_rect = player.bullet.rect();
        if bullet_left_arena(&bullet_rect, bounds) {
            player.bullet.reset();
            report.events.push(GameEvent::BulletLeftArena { shooter: i });
            continue;
        }

        // Bullets only ever test against the opponent
        if count != 2 {
            continue;
        }
        let target = 1 - i;
        let target_rect = state.players[target].rect();
        if bullet_rect.overlaps(&target_rect) {
            let shooter = &mut state.players[i];
            shooter.score += 1;
            shooter.bullet.reset();
            log::debug!(
                "Player {} hit player {} (score {})",
                i + 1,
                target + 1,
                shooter.score
            );
            report.events.push(GameEvent::BulletHit { shooter: i, target });
        }
    }

    if count == 2 {
        if let Some(axes) = state.resolve_player_collision()? {
            report.events.push(GameEvent::PlayerCollision { axes });
        }
    }

    log::trace!("Tick {}: {} events", state.time_ticks, report.events.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::CollisionAxes;
    use crate::sim::state::Arena;
    use glam::Vec2;
    use proptest::prelude::*;

    fn two_player_state() -> GameState {
        let mut state = GameState::new(Arena::default(), 12345);
        state.add_player(Vec2::new(100.0, 100.0)).unwrap();
        state.add_player(Vec2::new(1500.0, 700.0)).unwrap();
        state
    }

    fn idle() -> [ActionSet; 2] {
        [ActionSet::default(); 2]
    }

    #[test]
    fn test_action_count_mismatch_is_rejected() {
        let mut state = two_player_state();
        let before = state.players.clone();
        let err = tick(&mut state, &[ActionSet::default()], SIM_DT).unwrap_err();
        assert_eq!(err, SimError::ActionCountMismatch { expected: 2, got: 1 });
        assert_eq!(state.players, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_wall_bounce_through_tick() {
        let mut state = two_player_state();
        state.players[0].pos = Vec2::new(50.5, 400.0);
        state.players[0].vel = Vec2::new(-100.0, 0.0);

        let report = tick(&mut state, &idle(), SIM_DT).unwrap();
        let p = &state.players[0];
        assert_eq!(p.rect().left(), 0.0);
        assert!((p.vel.x - 80.0).abs() < 1e-3);
        assert!(report.events.contains(&GameEvent::WallBounce { player: 0 }));
    }

    #[test]
    fn test_hit_scores_once_and_resets_bullet() {
        let mut state = two_player_state();
        state.players[1].pos = Vec2::new(400.0, 100.0);

        let mut actions = idle();
        actions[0].shoot = true;
        actions[0].aim = Some(Vec2::new(400.0, 100.0));

        let mut hits = 0;
        for _ in 0..20 {
            let report = tick(&mut state, &actions, SIM_DT).unwrap();
            hits += report.hits().count();
            if hits > 0 {
                break;
            }
        }

        assert_eq!(hits, 1);
        assert_eq!(state.players[0].score, 1);
        assert!(!state.players[0].bullet.was_shot);
        assert_eq!(state.players[1].score, 0);
    }

    #[test]
    fn test_bullet_leaving_arena_resets() {
        let mut state = two_player_state();
        let mut actions = idle();
        actions[0].shoot = true;
        actions[0].aim = Some(Vec2::new(100.0, 0.0));

        let report = tick(&mut state, &actions, SIM_DT).unwrap();
        assert!(report.events.contains(&GameEvent::BulletFired { shooter: 0 }));
        assert!(state.players[0].bullet.was_shot);

        actions[0].shoot = false;
        let mut left = false;
        for _ in 0..10 {
            let report = tick(&mut state, &actions, SIM_DT).unwrap();
            if report.events.contains(&GameEvent::BulletLeftArena { shooter: 0 }) {
                left = true;
                break;
            }
        }
        assert!(left);
        assert!(!state.players[0].bullet.was_shot);
        assert_eq!(state.players[0].score, 0);
    }

    #[test]
    fn test_crosshair_clamped_to_arena() {
        let mut state = two_player_state();
        let mut actions = idle();
        actions[0].aim = Some(Vec2::new(-50.0, 5000.0));
        actions[1].ch_right = true;
        for _ in 0..100 {
            tick(&mut state, &actions, SIM_DT).unwrap();
        }
        assert_eq!(state.players[0].crosshair, Vec2::new(0.0, 800.0));
        assert_eq!(state.players[1].crosshair.x, 1600.0);
    }

    #[test]
    fn test_single_player_ticks_without_collision() {
        let mut state = GameState::new(Arena::default(), 3);
        state.add_player(Vec2::new(800.0, 400.0)).unwrap();
        let actions = [ActionSet {
            shoot: true,
            ..Default::default()
        }];
        for _ in 0..30 {
            let report = tick(&mut state, &actions, SIM_DT).unwrap();
            assert!(report.hits().next().is_none());
        }
    }

    #[test]
    fn test_players_bounce_apart() {
        let mut state = two_player_state();
        state.players[0].pos = Vec2::new(700.0, 400.0);
        state.players[0].vel = Vec2::new(600.0, 0.0);
        state.players[1].pos = Vec2::new(805.0, 400.0);
        state.players[1].vel = Vec2::new(-600.0, 0.0);

        let report = tick(&mut state, &idle(), SIM_DT).unwrap();
        assert!(report.events.contains(&GameEvent::PlayerCollision {
            axes: CollisionAxes { x: true, y: false }
        }));
        assert!(state.players[0].vel.x < 0.0);
        assert!(state.players[1].vel.x > 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut s1 = two_player_state();
        let mut s2 = two_player_state();
        let mut actions = idle();
        actions[0].right = true;
        actions[0].shoot = true;
        actions[1].up = true;
        actions[1].ch_left = true;

        for _ in 0..120 {
            tick(&mut s1, &actions, SIM_DT).unwrap();
            tick(&mut s2, &actions, SIM_DT).unwrap();
        }
        assert_eq!(s1.players, s2.players);
        assert_eq!(s1.time_ticks, 120);
    }

    fn arb_actions() -> impl Strategy<Value = ActionSet> {
        (any::<[bool; 9]>(), proptest::option::of((-200.0f32..1800.0, -200.0f32..1000.0))).prop_map(
            |(b, aim)| ActionSet {
                up: b[0],
                down: b[1],
                left: b[2],
                right: b[3],
                shoot: b[4],
                ch_up: b[5],
                ch_down: b[6],
                ch_left: b[7],
                ch_right: b[8],
                aim: aim.map(|(x, y)| Vec2::new(x, y)),
            },
        )
    }

    proptest! {
        #[test]
        fn prop_speed_and_bounds_hold(
            seed in any::<u64>(),
            steps in proptest::collection::vec((arb_actions(), arb_actions()), 1..200),
        ) {
            let mut state = GameState::new(Arena::default(), seed);
            state.add_player(Vec2::new(100.0, 100.0)).unwrap();
            state.add_player(Vec2::new(1600.0, 800.0)).unwrap();
            let size = state.arena.size();

            for (a, b) in steps {
                tick(&mut state, &[a, b], SIM_DT).unwrap();
                for p in &state.players {
                    prop_assert!(p.vel.length() <= MAX_SPEED + 0.01);
                    prop_assert!(p.pos.cmpge(Vec2::ZERO).all() && p.pos.cmple(size).all());
                    prop_assert!(p.crosshair.cmpge(Vec2::ZERO).all() && p.crosshair.cmple(size).all());
                }
            }
        }

        #[test]
        fn prop_scores_never_decrease(
            steps in proptest::collection::vec((arb_actions(), arb_actions()), 1..200),
        ) {
            let mut state = GameState::new(Arena::default(), 99);
            state.add_player(Vec2::new(100.0, 100.0)).unwrap();
            state.add_player(Vec2::new(1600.0, 800.0)).unwrap();
            let mut last = [0u32; 2];

            for (a, b) in steps {
                let report = tick(&mut state, &[a, b], SIM_DT).unwrap();
                let mut gained = [0u32; 2];
                for shooter in report.hits() {
                    gained[shooter] += 1;
                }
                for i in 0..2 {
                    prop_assert_eq!(state.players[i].score, last[i] + gained[i]);
                    last[i] = state.players[i].score;
                }
            }
        }
    }
}
