use glam::Vec2;

/// Squared-length threshold below which a drag counts as "no direction".
pub const DRAG_EPSILON_SQ: f32 = 1e-4;

/// Normalize a 2D vector, substituting zero for anything shorter than
/// `sqrt(DRAG_EPSILON_SQ)` so degenerate drags never produce NaN.
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    if v.length_squared() > DRAG_EPSILON_SQ {
        v / v.length()
    } else {
        Vec2::ZERO
    }
}

/// Clamp to [0, 1]. NaN maps to 0.
#[inline]
pub fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// `distance / max` clamped to [0, 1]; zero when `max` is not positive.
#[inline]
pub fn fraction_of(distance: f32, max: f32) -> f32 {
    if max > 0.0 {
        clamp01(distance / max)
    } else {
        0.0
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
