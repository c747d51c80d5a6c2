//! Collision detection and response for square bodies
//!
//! The interesting part is the player-vs-player resolver: instead of pushing
//! overlapping players apart at the tick boundary, it estimates how long ago
//! the boxes first touched, rewinds both players to that instant and then
//! exchanges velocity along the colliding axis.

use glam::{BVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::rect::Rect;
use crate::consts::WALL_RESTITUTION;

/// Which axes took part in a player-vs-player collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionAxes {
    pub x: bool,
    pub y: bool,
}

impl CollisionAxes {
    fn as_bvec(&self) -> BVec2 {
        BVec2::new(self.x, self.y)
    }
}

/// Keep a player box inside the arena, bouncing off any edge it crossed.
///
/// Returns true if at least one wall was hit.
pub fn bounce_off_walls(player: &mut Player, arena: Vec2) -> bool {
    let r = player.rect();
    let half = r.half();
    let mut hit = false;

    if r.left() < 0.0 {
        player.pos.x = half.x;
        player.vel.x = -player.vel.x * WALL_RESTITUTION;
        hit = true;
    }
    if r.top() < 0.0 {
        player.pos.y = half.y;
        player.vel.y = -player.vel.y * WALL_RESTITUTION;
        hit = true;
    }
    if r.right() > arena.x {
        player.pos.x = arena.x - half.x;
        player.vel.x = -player.vel.x * WALL_RESTITUTION;
        hit = true;
    }
    if r.bottom() > arena.y {
        player.pos.y = arena.y - half.y;
        player.vel.y = -player.vel.y * WALL_RESTITUTION;
        hit = true;
    }

    hit
}

/// Check whether a bullet box has fully left the arena
pub fn bullet_left_arena(bullet_rect: &Rect, arena: Vec2) -> bool {
    bullet_rect.is_outside(arena)
}

/// Resolve an overlap between two equal-size square players as a perfectly
/// elastic, equal-mass collision.
///
/// Assumes both velocities were constant since the boxes started touching,
/// which is only accurate when ticks are short relative to player motion.
/// Acceleration during the rewound interval is ignored.
///
/// The rewind is not bounded. Two players drifting together at nearly the
/// same velocity give a tiny closing speed and a rewind of many seconds, which
/// can carry both centers far outside the arena; the caller clamps them back
/// in, so such a collision ends with an instant jump onto the nearest wall.
///
/// When both players are at rest relative to each other there is no way to
/// tell which axis collided, so random positive closing speeds are drawn from
/// `rng` to break the tie.
///
/// Returns `None` when the boxes do not overlap.
pub fn resolve_player_collision<R: Rng + ?Sized>(
    p1: &mut Player,
    p2: &mut Player,
    rng: &mut R,
) -> Option<CollisionAxes> {
    if !p1.rect().overlaps(&p2.rect()) {
        return None;
    }

    let side = p1.size;

    // Penetration depth along each axis
    let depth = Vec2::splat(side) - (p1.pos - p2.pos).abs();

    // Closing speed along each axis
    let mut closing = (p1.vel - p2.vel).abs();
    if closing == Vec2::ZERO {
        closing = Vec2::new(
            rng.random_range(f32::MIN_POSITIVE..1.0),
            rng.random_range(f32::MIN_POSITIVE..1.0),
        );
    }

    let dt_x = if closing.x > 0.0 { depth.x / closing.x } else { f32::INFINITY };
    let dt_y = if closing.y > 0.0 { depth.y / closing.y } else { f32::INFINITY };

    // The axis that started overlapping most recently is the one that collided
    let axes = CollisionAxes {
        x: dt_x <= dt_y,
        y: dt_y <= dt_x,
    };

    // Rewind to the estimated moment of impact
    let rewind = dt_x.min(dt_y);
    p1.pos -= p1.vel * rewind;
    p2.pos -= p2.vel * rewind;

    // Equal masses: exchange velocity components along the colliding axes
    let mask = axes.as_bvec();
    let (v1, v2) = (p1.vel, p2.vel);
    p1.vel = Vec2::select(mask, v2, v1);
    p2.vel = Vec2::select(mask, v1, v2);

    log::debug!(
        "Player collision resolved: axes=({}, {}) rewind={:.4}s",
        axes.x,
        axes.y,
        rewind
    );

    Some(axes)
}
