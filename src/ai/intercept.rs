//! Lead-target prediction
//!
//! A bullet fired now at speed `S` from `x1` meets a target at `x2` moving with
//! constant velocity `v2` after time `t` where
//!
//! ```text
//! |x2 + v2·t - x1| = S·t
//! ```
//!
//! Squaring gives `(|v2|² - S²)·t² + 2(v2·d)·t + |d|² = 0` with `d = x2 - x1`.

use glam::{DVec2, Vec2};

/// Relative tolerance for treating target speed as equal to bullet speed
const EQUAL_SPEED_EPS: f64 = 1e-9;

/// Earliest non-negative time at which a bullet of speed `speed` fired from
/// `shooter` can reach a target at `target` moving with `target_vel`.
///
/// Returns `None` when the target can never be caught (it outruns the bullet
/// or the quadratic has no real root). Solved in f64.
pub fn intercept_time(shooter: Vec2, target: Vec2, target_vel: Vec2, speed: f32) -> Option<f32> {
    let d: DVec2 = (target - shooter).as_dvec2();
    let v: DVec2 = target_vel.as_dvec2();
    let s = speed as f64;

    let a = v.length_squared() - s * s;
    let b = 2.0 * v.dot(d);
    let c = d.length_squared();

    if c == 0.0 {
        return Some(0.0);
    }

    let t = if a.abs() <= EQUAL_SPEED_EPS * s * s {
        // Target as fast as the bullet: the equation is linear
        if b >= 0.0 {
            return None;
        }
        -c / b
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        (-b - disc.sqrt()) / (2.0 * a)
    };

    (t.is_finite() && t >= 0.0).then_some(t as f32)
}

/// Where to aim so a bullet meets the target, assuming it keeps its velocity
pub fn predict_aim_point(shooter: Vec2, target: Vec2, target_vel: Vec2, speed: f32) -> Option<Vec2> {
    let t = intercept_time(shooter, target, target_vel, speed)? as f64;
    Some((target.as_dvec2() + target_vel.as_dvec2() * t).as_vec2())
}
