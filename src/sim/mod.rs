//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by player index)
//! - No rendering or platform dependencies

pub mod action;
pub mod collision;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use action::ActionSet;
pub use collision::{CollisionAxes, bounce_off_walls, resolve_player_collision};
pub use player::{Bullet, Player};
pub use rect::Rect;
pub use state::{Arena, GameEvent, GameState, PlayerView, Snapshot};
pub use tick::{TickReport, tick};
