//! Cap polygon synthesis for cut surfaces.
//!
//! When a brush is cut, the cut surface is an open loop. The cap is rebuilt
//! from the original brush: every edge crossing (and every vertex on) the
//! cutting plane contributes a point, and the points are wound angularly
//! around their centroid.

use nalgebra::Vector3;
use tracing::debug;

use crate::brush::Brush;
use crate::plane::{Plane, PlaneSide};
use crate::polygon::{Polygon, centroid};
use crate::vertex::{Vertex, push_unique};

/// Collects the points where a brush's edges meet a plane.
///
/// Scans every edge of every polygon: vertices lying on the plane are taken
/// as-is, edges whose endpoints sit on opposite sides contribute their
/// intersection point. All points are projected onto the plane and
/// deduplicated with the vertex weld tolerance.
pub fn collect_plane_intersection_points(brush: &Brush, plane: &Plane) -> Vec<Vertex> {
    let mut points = Vec::new();

    for polygon in brush.polygons() {
        for (start, end) in polygon.edges() {
            let start_side = plane.classify_point(start);
            let end_side = plane.classify_point(end);

            if start_side == PlaneSide::On {
                push_unique(&mut points, plane.project_point(start));
            }

            let crosses = matches!(
                (start_side, end_side),
                (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
            );
            if crosses {
                if let Some((_, hit)) = plane.intersect_segment(start, end) {
                    push_unique(&mut points, plane.project_point(&hit));
                }
            }
        }
    }

    points
}

/// Orders a set of coplanar points into a counter-clockwise loop around the
/// plane's normal.
///
/// Points are sorted by angle around their centroid inside an orthonormal
/// in-plane basis `u = normal × reference`, `v = normal × u`.
pub fn order_points_into_polygon(points: &[Vertex], plane: &Plane) -> Vec<Vertex> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let normal = plane.normal();
    let (u, v) = plane_basis(&normal);
    let center = centroid(points);

    let mut keyed: Vec<(f32, Vertex)> = points
        .iter()
        .map(|p| {
            let d = p - center;
            (d.dot(&v).atan2(d.dot(&u)), *p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Orthonormal basis spanning the plane with the given unit normal.
///
/// `(u, v, normal)` is right-handed, so increasing angle in `(u, v)` turns
/// counter-clockwise when viewed from the front.
pub(crate) fn plane_basis(normal: &Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let reference = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = normal.cross(&reference).normalize();
    let v = normal.cross(&u);
    (u, v)
}

/// Builds the cap polygon closing `brush`'s cross-section with `plane`,
/// facing along `facing`'s normal.
///
/// Returns `None` when fewer than three distinct intersection points exist
/// or the loop is degenerate. The cap inherits the material of the brush's
/// first polygon.
pub fn build_cap(brush: &Brush, plane: &Plane, facing: &Plane) -> Option<Polygon> {
    let points = collect_plane_intersection_points(brush, plane);
    if points.len() < 3 {
        debug!(points = points.len(), "Too few intersection points for a cap");
        return None;
    }

    let ordered = order_points_into_polygon(&points, plane);
    let mut cap = Polygon::new(ordered)?;
    if let Some(first) = brush.polygons().first() {
        cap = cap.with_material(first.material_id());
    }

    if !cap.faces_same_direction(facing) {
        cap = cap.flipped();
    }

    cap.is_valid().then_some(cap)
}
