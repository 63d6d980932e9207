//! Elastic impulse resolution along a contact axis.
//!
//! Velocities are split into a component along the axis and a remainder;
//! only the axis components go through the 1-D elastic collision law, so
//! no rotation is ever introduced.

use glam::DVec2;

use crate::types::*;

/// Split `v` into its scalar projection on unit `axis` and the perpendicular remainder.
pub fn decompose(v: DVec2, axis: DVec2) -> (f64, DVec2) {
    let along = v.dot(axis);
    (along, v - axis * along)
}

/// 1-D perfectly elastic collision of A (mass `m_a`, velocity `v0`) with
/// B (mass `m_b`, velocity `u0`). Returns `(v', u')`.
pub fn elastic_1d(m_a: f64, v0: f64, m_b: f64, u0: f64) -> (f64, f64) {
    let total = m_a + m_b;
    let v = v0 - (2.0 * m_b * (v0 - u0)) / total;
    let u = u0 + (2.0 * m_a * (v0 - u0)) / total;
    (v, u)
}

/// Exchange momentum between `a` and `b` along `axis.normal`, then push `b`
/// out along the normal by `axis.depth`.
pub fn resolve(a: &mut Body, b: &mut Body, axis: &ContactAxis) {
    let n = axis.normal;
    if n == DVec2::ZERO {
        return;
    }
    apply_impulse(a, b, n);
    separate(b, axis);
}

/// Velocity half of [`resolve`]: the elastic law on the normal components only.
pub fn apply_impulse(a: &mut Body, b: &mut Body, normal: DVec2) {
    let (v0, a_perp) = decompose(a.velocity, normal);
    let (u0, b_perp) = decompose(b.velocity, normal);
    let (v, u) = elastic_1d(a.mass(), v0, b.mass(), u0);
    a.velocity = a_perp + normal * v;
    b.velocity = b_perp + normal * u;
}

/// Positional half of [`resolve`]: move `b` out of `a` along the normal.
pub fn separate(b: &mut Body, axis: &ContactAxis) {
    b.position += axis.normal * axis.depth;
}
