//! Axis-aligned square bounds for players and bullets
//!
//! Every body in the arena is a square centered on its position, so a box is
//! fully described by its center and side length.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box centered on `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Square of side `side` centered on `center`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::new(center, Vec2::splat(side))
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True when the box lies entirely outside `[0, bounds.x] x [0, bounds.y]`
    pub fn is_outside(&self, bounds: Vec2) -> bool {
        self.right() < 0.0 || self.bottom() < 0.0 || self.left() > bounds.x || self.top() > bounds.y
    }
}
