//! Plane representation and classification.

use nalgebra::Vector3;

use crate::tolerance::{COPLANAR_NORMAL, EPSILON, PLANE_THICKNESS};
use crate::vertex::{Vertex, try_normalize};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies within the plane thickness
    On,
}

/// Classification of a polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No vertex is behind the plane and at least one is in front
    Front,
    /// No vertex is in front of the plane and at least one is behind
    Back,
    /// All vertices lie on the plane
    On,
    /// Vertices are on both sides
    Spanning,
}

/// A plane in 3D space, represented as `normal · point = distance`.
///
/// The normal is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<f32>,
    distance: f32,
}

impl Plane {
    /// Creates a plane from a normal vector and distance.
    ///
    /// The normal is normalized and the distance rescaled to match.
    /// Returns `None` if the normal has (near) zero length.
    pub fn new(normal: Vector3<f32>, distance: f32) -> Option<Self> {
        let norm = normal.norm();
        if norm <= EPSILON {
            return None;
        }
        Some(Self {
            normal: normal / norm,
            distance: distance / norm,
        })
    }

    /// Creates a plane from a point on the plane and a normal vector.
    ///
    /// Returns `None` if the normal has (near) zero length.
    pub fn from_point_and_normal(point: Vertex, normal: Vector3<f32>) -> Option<Self> {
        let unit_normal = try_normalize(normal)?;
        Some(Self {
            normal: unit_normal,
            distance: unit_normal.dot(&point.coords),
        })
    }

    /// Creates a plane from three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Returns `None` if the points are collinear (or nearly so).
    pub fn from_points(a: Vertex, b: Vertex, c: Vertex) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        Self::from_point_and_normal(a, normal)
    }

    /// Builds a plane from an already-unit normal without renormalizing.
    pub(crate) fn from_unit(normal: Vector3<f32>, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    #[inline]
    pub fn signed_distance(&self, point: &Vertex) -> f32 {
        self.normal.dot(&point.coords) - self.distance
    }

    /// Classifies which side of the plane a point lies on using [`PLANE_THICKNESS`].
    #[inline]
    pub fn classify_point(&self, point: &Vertex) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_THICKNESS)
    }

    /// Classifies which side of the plane a point lies on, with a custom tolerance.
    pub fn classify_point_with_epsilon(&self, point: &Vertex, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::On
        }
    }

    /// Classifies a set of points (a polygon's vertices) against the plane.
    pub fn classify_points<'a>(
        &self,
        points: impl IntoIterator<Item = &'a Vertex>,
    ) -> Classification {
        let mut front = false;
        let mut back = false;

        for point in points {
            match self.classify_point(point) {
                PlaneSide::Front => front = true,
                PlaneSide::Back => back = true,
                PlaneSide::On => {}
            }
        }

        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::On,
        }
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    /// Returns this plane moved by `amount` along its normal.
    ///
    /// Negative amounts move the plane backwards (into the solid when the
    /// normal points outward).
    #[inline]
    pub fn offset(&self, amount: f32) -> Self {
        Self {
            normal: self.normal,
            distance: self.distance + amount,
        }
    }

    /// Projects a point onto the plane (finds the closest point on the plane).
    #[inline]
    pub fn project_point(&self, point: &Vertex) -> Vertex {
        point - self.normal * self.signed_distance(point)
    }

    /// Returns `true` if both planes have (nearly) the same orientation,
    /// ignoring their distances.
    #[inline]
    pub fn is_parallel_to(&self, other: &Plane) -> bool {
        self.normal.dot(&other.normal).abs() >= COPLANAR_NORMAL
    }

    /// Returns `true` if both planes describe the same surface with the same facing.
    pub fn is_coplanar_with(&self, other: &Plane) -> bool {
        self.normal.dot(&other.normal) >= COPLANAR_NORMAL
            && (self.distance - other.distance).abs() <= PLANE_THICKNESS
    }

    /// Computes the intersection of the segment `start -> end` with the plane.
    ///
    /// Returns `Some((t, point))` with `t` clamped to `[0, 1]`, or `None`
    /// when the segment is (nearly) parallel to the plane. Callers treat the
    /// parallel case as the edge lying on the plane.
    pub fn intersect_segment(&self, start: &Vertex, end: &Vertex) -> Option<(f32, Vertex)> {
        let d0 = self.signed_distance(start);
        let d1 = self.signed_distance(end);
        let denom = d0 - d1;

        if denom.abs() < EPSILON {
            return None;
        }

        let t = (d0 / denom).clamp(0.0, 1.0);
        Some((t, start + (end - start) * t))
    }

    /// Returns the single point shared by three planes, if they meet in one.
    pub fn intersect_three(a: &Plane, b: &Plane, c: &Plane) -> Option<Vertex> {
        let bc = b.normal.cross(&c.normal);
        let denom = a.normal.dot(&bc);
        if denom.abs() < EPSILON {
            return None;
        }

        let ca = c.normal.cross(&a.normal);
        let ab = a.normal.cross(&b.normal);
        let p = (bc * a.distance + ca * b.distance + ab * c.distance) / denom;
        Some(Vertex::from(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_normalizes() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 2.0), 4.0).unwrap();
        assert_relative_eq!(plane.normal(), Vector3::z());
        assert_relative_eq!(plane.distance(), 2.0);
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert!(Plane::new(Vector3::zeros(), 1.0).is_none());
        let p = Vertex::origin();
        assert!(Plane::from_point_and_normal(p, Vector3::zeros()).is_none());
    }

    #[test]
    fn from_points_follows_right_hand_rule() {
        let plane = Plane::from_points(
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(1.0, 0.0, 1.0),
            Vertex::new(0.0, 1.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(plane.normal(), Vector3::z());
        assert_relative_eq!(plane.distance(), 1.0);
    }

    #[test]
    fn collinear_points_have_no_plane() {
        let plane = Plane::from_points(
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 1.0, 1.0),
            Vertex::new(2.0, 2.0, 2.0),
        );
        assert!(plane.is_none());
    }

    #[test]
    fn classify_point_uses_thickness() {
        let plane = Plane::new(Vector3::y(), 0.0).unwrap();
        assert_eq!(plane.classify_point(&Vertex::new(0.0, 1.0, 0.0)), PlaneSide::Front);
        assert_eq!(plane.classify_point(&Vertex::new(0.0, -1.0, 0.0)), PlaneSide::Back);
        assert_eq!(plane.classify_point(&Vertex::new(3.0, 0.005, 2.0)), PlaneSide::On);
    }

    #[test]
    fn classify_points_covers_all_cases() {
        let plane = Plane::new(Vector3::z(), 0.0).unwrap();
        let above = [Vertex::new(0.0, 0.0, 1.0), Vertex::new(1.0, 0.0, 0.0)];
        let below = [Vertex::new(0.0, 0.0, -1.0), Vertex::new(1.0, 0.0, 0.0)];
        let on = [Vertex::new(0.0, 0.0, 0.0), Vertex::new(1.0, 0.0, 0.0)];
        let across = [Vertex::new(0.0, 0.0, 1.0), Vertex::new(1.0, 0.0, -1.0)];

        assert_eq!(plane.classify_points(&above), Classification::Front);
        assert_eq!(plane.classify_points(&below), Classification::Back);
        assert_eq!(plane.classify_points(&on), Classification::On);
        assert_eq!(plane.classify_points(&across), Classification::Spanning);
    }

    #[test]
    fn flip_and_offset() {
        let plane = Plane::new(Vector3::x(), 3.0).unwrap();
        let flipped = plane.flipped();
        assert_relative_eq!(flipped.normal(), -Vector3::x());
        assert_relative_eq!(flipped.distance(), -3.0);

        let moved = plane.offset(-1.0);
        assert_relative_eq!(moved.signed_distance(&Vertex::new(2.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn coplanar_and_parallel() {
        let a = Plane::new(Vector3::z(), 1.0).unwrap();
        let b = Plane::new(Vector3::z(), 1.005).unwrap();
        let c = Plane::new(Vector3::z(), 5.0).unwrap();

        assert!(a.is_coplanar_with(&b));
        assert!(!a.is_coplanar_with(&c));
        assert!(a.is_parallel_to(&c));
        assert!(a.is_parallel_to(&c.flipped()));
        assert!(!a.is_coplanar_with(&b.flipped()));
    }

    #[test]
    fn intersect_segment_midpoint() {
        let plane = Plane::new(Vector3::z(), 0.0).unwrap();
        let (t, point) = plane
            .intersect_segment(&Vertex::new(0.0, 0.0, -1.0), &Vertex::new(2.0, 0.0, 1.0))
            .unwrap();
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(point, Vertex::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn intersect_segment_parallel_is_none() {
        let plane = Plane::new(Vector3::z(), 0.0).unwrap();
        let hit = plane.intersect_segment(&Vertex::new(0.0, 0.0, 1.0), &Vertex::new(5.0, 0.0, 1.0));
        assert!(hit.is_none());
    }

    #[test]
    fn intersect_segment_clamps() {
        let plane = Plane::new(Vector3::z(), 0.0).unwrap();
        let (t, _) = plane
            .intersect_segment(&Vertex::new(0.0, 0.0, 1.0), &Vertex::new(0.0, 0.0, 2.0))
            .unwrap();
        assert_relative_eq!(t, 0.0);
    }

    #[test]
    fn three_planes_meet_at_corner() {
        let x = Plane::new(Vector3::x(), 1.0).unwrap();
        let y = Plane::new(Vector3::y(), 2.0).unwrap();
        let z = Plane::new(Vector3::z(), 3.0).unwrap();
        let p = Plane::intersect_three(&x, &y, &z).unwrap();
        assert_relative_eq!(p, Vertex::new(1.0, 2.0, 3.0), epsilon = 1e-5);

        let z2 = Plane::new(Vector3::x(), 4.0).unwrap();
        assert!(Plane::intersect_three(&x, &y, &z2).is_none());
    }
}
