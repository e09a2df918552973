//! Vertex helpers.
//!
//! Vertex algebra (add/sub/scale/dot/cross/normalize) comes straight from
//! nalgebra; this module only adds the tolerance-aware predicates the
//! kernel needs on top of it.

use nalgebra::{Point2, Point3, Vector3};

use crate::tolerance::{EPSILON, VERTEX_WELD};

/// A position in 3D space.
pub type Vertex = Point3<f32>;

/// A texture coordinate carried alongside a vertex.
pub type Uv = Point2<f32>;

/// Returns `true` if every component of `a` and `b` differs by at most `epsilon`.
#[inline]
pub fn approx_eq(a: &Vertex, b: &Vertex, epsilon: f32) -> bool {
    (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon && (a.z - b.z).abs() <= epsilon
}

/// Near-equality using the default [`EPSILON`].
#[inline]
pub fn nearly_equal(a: &Vertex, b: &Vertex) -> bool {
    approx_eq(a, b, EPSILON)
}

/// Returns `true` if the two vertices are within [`VERTEX_WELD`] of each other.
#[inline]
pub fn welded(a: &Vertex, b: &Vertex) -> bool {
    (a - b).norm_squared() <= VERTEX_WELD * VERTEX_WELD
}

/// Linear interpolation between two vertices.
#[inline]
pub fn lerp(a: &Vertex, b: &Vertex, t: f32) -> Vertex {
    a + (b - a) * t
}

/// Linear interpolation between two texture coordinates.
#[inline]
pub fn lerp_uv(a: &Uv, b: &Uv, t: f32) -> Uv {
    a + (b - a) * t
}

/// Returns `v` normalized, or `None` if its length is below [`EPSILON`].
#[inline]
pub fn try_normalize(v: Vector3<f32>) -> Option<Vector3<f32>> {
    v.try_normalize(EPSILON)
}

/// Appends `point` to `points` unless an existing entry is welded to it.
///
/// Returns `true` if the point was inserted.
pub fn push_unique(points: &mut Vec<Vertex>, point: Vertex) -> bool {
    if points.iter().any(|p| welded(p, &point)) {
        return false;
    }
    points.push(point);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_respects_epsilon() {
        let a = Vertex::new(1.0, 2.0, 3.0);
        let b = Vertex::new(1.0 + 5e-6, 2.0, 3.0);
        assert!(nearly_equal(&a, &b));
        assert!(!approx_eq(&a, &Vertex::new(1.1, 2.0, 3.0), 0.01));
    }

    #[test]
    fn weld_uses_distance() {
        let a = Vertex::new(0.0, 0.0, 0.0);
        assert!(welded(&a, &Vertex::new(0.0005, 0.0, 0.0)));
        assert!(!welded(&a, &Vertex::new(0.002, 0.0, 0.0)));
    }

    #[test]
    fn lerp_midpoint() {
        let m = lerp(&Vertex::new(0.0, 0.0, 0.0), &Vertex::new(2.0, 4.0, -6.0), 0.5);
        assert_eq!(m, Vertex::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn push_unique_skips_welded_points() {
        let mut points = Vec::new();
        assert!(push_unique(&mut points, Vertex::new(1.0, 1.0, 1.0)));
        assert!(!push_unique(&mut points, Vertex::new(1.0, 1.0, 1.0005)));
        assert!(push_unique(&mut points, Vertex::new(2.0, 1.0, 1.0)));
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn try_normalize_rejects_zero() {
        assert!(try_normalize(Vector3::zeros()).is_none());
        let n = try_normalize(Vector3::new(0.0, 3.0, 0.0)).unwrap();
        assert_eq!(n, Vector3::new(0.0, 1.0, 0.0));
    }
}
