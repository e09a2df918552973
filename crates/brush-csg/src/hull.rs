//! # Quickhull
//!
//! 3D convex hull of a point set, emitted as a brush of triangles.
//!
//! 1. Weld duplicate points.
//! 2. Build a tetrahedron from the axis extremes and the points farthest
//!    from them.
//! 3. Give every remaining point to the first face it lies in front of.
//! 4. While a face has outside points: take its farthest point, remove every
//!    face that point can see, and fan new faces from the horizon to it.
//!    Orphaned points are handed to the new faces.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::brush::Brush;
use crate::error::{CsgError, CsgResult};
use crate::plane::Plane;
use crate::polygon::{Polygon, centroid};
use crate::result::ConvexHullResult;
use crate::tolerance::{DEGENERATE_AREA, PLANE_THICKNESS};
use crate::vertex::{Vertex, push_unique};

/// Computes the convex hull of `points` as a triangulated brush.
///
/// Failures (too few points, collinear or coplanar input) are reported in
/// the result rather than raised.
pub fn compute_convex_hull(points: &[Vertex]) -> ConvexHullResult {
    info!(points = points.len(), "Computing convex hull");
    match quickhull(points) {
        Ok(hull) => {
            info!(faces = hull.len(), "Convex hull complete");
            ConvexHullResult::success(hull)
        }
        Err(err) => {
            warn!(%err, "Convex hull failed");
            ConvexHullResult::failure(err.to_string())
        }
    }
}

/// Computes the convex hull of every vertex of every brush.
pub fn compute_convex_hull_of_brushes(brushes: &[Brush]) -> ConvexHullResult {
    if brushes.is_empty() {
        return ConvexHullResult::failure(
            CsgError::invalid_input("no brushes to enclose").to_string(),
        );
    }
    let points: Vec<Vertex> = brushes.iter().flat_map(Brush::vertices).copied().collect();
    compute_convex_hull(&points)
}

/// A triangular hull face, wound outward, with its outside set.
#[derive(Debug, Clone)]
struct HullFace {
    corners: [usize; 3],
    plane: Plane,
    outside: Vec<usize>,
}

impl HullFace {
    /// Builds the face so that `interior` lies behind it.
    fn new(corners: [usize; 3], points: &[Vertex], interior: &Vertex) -> Option<Self> {
        let [a, b, c] = corners;
        let plane = Plane::from_points(points[a], points[b], points[c])?;
        let (corners, plane) = if plane.signed_distance(interior) > 0.0 {
            ([a, c, b], plane.flipped())
        } else {
            (corners, plane)
        };
        Some(Self {
            corners,
            plane,
            outside: Vec::new(),
        })
    }

    /// Membership test for outside sets.
    fn is_outside(&self, point: &Vertex) -> bool {
        self.plane.signed_distance(point) > PLANE_THICKNESS
    }

    /// Strict visibility from an eye point. Faces the eye sits barely in
    /// front of must still be replaced, or the new fan folds inward.
    fn is_visible_from(&self, eye: &Vertex) -> bool {
        self.plane.signed_distance(eye) > 0.0
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.corners;
        [(a, b), (b, c), (c, a)]
    }

    fn farthest_outside(&self, points: &[Vertex]) -> Option<usize> {
        self.outside.iter().copied().max_by(|&a, &b| {
            self.plane
                .signed_distance(&points[a])
                .total_cmp(&self.plane.signed_distance(&points[b]))
        })
    }
}

fn quickhull(points: &[Vertex]) -> CsgResult<Brush> {
    if points.len() < 4 {
        return Err(CsgError::invalid_input(format!(
            "convex hull needs at least 4 points, got {}",
            points.len()
        )));
    }

    let mut unique = Vec::with_capacity(points.len());
    for p in points {
        push_unique(&mut unique, *p);
    }
    if unique.len() < 4 {
        return Err(CsgError::degenerate(format!(
            "convex hull needs at least 4 unique points, got {}",
            unique.len()
        )));
    }

    let simplex = initial_simplex(&unique)?;
    let interior = centroid(&simplex.map(|i| unique[i]));
    let [a, b, c, d] = simplex;
    let mut faces: Vec<HullFace> = [[a, b, c], [a, d, b], [b, d, c], [c, d, a]]
        .into_iter()
        .filter_map(|corners| HullFace::new(corners, &unique, &interior))
        .collect();
    if faces.len() != 4 {
        return Err(CsgError::internal("initial tetrahedron has a degenerate face"));
    }

    for (index, point) in unique.iter().enumerate() {
        if simplex.contains(&index) {
            continue;
        }
        if let Some(face) = faces.iter_mut().find(|f| f.is_outside(point)) {
            face.outside.push(index);
        }
    }

    let max_iterations = unique.len() * 2;
    let mut iterations = 0;
    while let Some(face_index) = faces.iter().position(|f| !f.outside.is_empty()) {
        if iterations >= max_iterations {
            warn!(iterations, "Quickhull iteration cap reached; hull may be incomplete");
            break;
        }
        iterations += 1;

        let Some(eye_index) = faces[face_index].farthest_outside(&unique) else {
            break;
        };
        let eye = unique[eye_index];

        let (visible, kept): (Vec<HullFace>, Vec<HullFace>) =
            std::mem::take(&mut faces).into_iter().partition(|f| f.is_visible_from(&eye));
        faces = kept;

        let horizon = horizon_edges(&visible);
        let orphans: Vec<usize> = visible
            .iter()
            .flat_map(|f| f.outside.iter().copied())
            .filter(|&i| i != eye_index)
            .collect();

        let center = hull_centroid(&faces, &horizon, eye_index, &unique);
        let first_new = faces.len();
        for (from, to) in horizon {
            match HullFace::new([from, to, eye_index], &unique, &center) {
                Some(face) => faces.push(face),
                None => debug!(from, to, eye = eye_index, "Skipping degenerate horizon face"),
            }
        }

        // New faces first; an orphan outside only a kept face still counts.
        for orphan in orphans {
            let point = unique[orphan];
            let (kept, fresh) = faces.split_at_mut(first_new);
            let mut candidates = fresh.iter_mut().chain(kept.iter_mut());
            if let Some(face) = candidates.find(|f| f.is_outside(&point)) {
                face.outside.push(orphan);
            }
        }
    }

    debug!(iterations, faces = faces.len(), "Quickhull loop finished");

    let polygons: Vec<Polygon> = faces
        .iter()
        .filter_map(|face| Polygon::new(face.corners.iter().map(|&i| unique[i]).collect()))
        .collect();
    if polygons.is_empty() {
        return Err(CsgError::degenerate("convex hull has no valid faces"));
    }
    Ok(Brush::from_polygons(polygons))
}

/// Picks four points spanning a non-degenerate tetrahedron.
///
/// The fourth point lies behind the plane of the first three.
fn initial_simplex(points: &[Vertex]) -> CsgResult<[usize; 4]> {
    let extremes = axis_extremes(points);

    let mut pair = (extremes[0], extremes[1]);
    let mut pair_distance = -1.0;
    for &e in &extremes {
        for (i, p) in points.iter().enumerate() {
            let distance = (p - points[e]).norm_squared();
            if distance > pair_distance {
                pair_distance = distance;
                pair = (e, i);
            }
        }
    }
    let (p0, p1) = pair;
    let axis = points[p1] - points[p0];

    let (p2, area) = farthest(points, |p| axis.cross(&(p - points[p0])).norm());
    if area <= DEGENERATE_AREA {
        return Err(CsgError::degenerate("all points are collinear"));
    }

    let base = Plane::from_points(points[p0], points[p1], points[p2])
        .ok_or_else(|| CsgError::internal("could not build base plane for convex hull"))?;
    let (p3, height) = farthest(points, |p| base.signed_distance(p).abs());
    if height <= PLANE_THICKNESS {
        return Err(CsgError::degenerate("all points are coplanar"));
    }

    if base.signed_distance(&points[p3]) > 0.0 {
        Ok([p0, p2, p1, p3])
    } else {
        Ok([p0, p1, p2, p3])
    }
}

/// Indices of the min/max point along x, y and z.
fn axis_extremes(points: &[Vertex]) -> [usize; 6] {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[axis * 2]][axis] {
                extremes[axis * 2] = i;
            }
            if p[axis] > points[extremes[axis * 2 + 1]][axis] {
                extremes[axis * 2 + 1] = i;
            }
        }
    }
    extremes
}

fn farthest(points: &[Vertex], metric: impl Fn(&Vertex) -> f32) -> (usize, f32) {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, metric(p)))
        .fold((0, f32::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best })
}

/// Edges of the visible region that border a face which stays.
///
/// Each edge keeps the winding of its visible face, so fanning it to the
/// eye point gives an outward face.
fn horizon_edges(visible: &[HullFace]) -> Vec<(usize, usize)> {
    let edges: HashSet<(usize, usize)> = visible.iter().flat_map(HullFace::edges).collect();
    visible
        .iter()
        .flat_map(HullFace::edges)
        .filter(|&(a, b)| !edges.contains(&(b, a)))
        .collect()
}

/// Centroid of the hull's vertices once `eye` has been added.
fn hull_centroid(
    faces: &[HullFace],
    horizon: &[(usize, usize)],
    eye: usize,
    points: &[Vertex],
) -> Vertex {
    let mut indices: HashSet<usize> = faces.iter().flat_map(|f| f.corners).collect();
    indices.extend(horizon.iter().flat_map(|&(a, b)| [a, b]));
    indices.insert(eye);
    let corners: Vec<Vertex> = indices.into_iter().map(|i| points[i]).collect();
    centroid(&corners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_cube_corners(half: f32) -> Vec<Vertex> {
        let mut corners = Vec::new();
        for x in [-half, half] {
            for y in [-half, half] {
                for z in [-half, half] {
                    corners.push(Vertex::new(x, y, z));
                }
            }
        }
        corners
    }

    /// Points on a sphere from a seeded LCG.
    fn make_sphere_cloud(seed: u64, count: usize, radius: f32) -> Vec<Vertex> {
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 40) as f32) / ((1u64 << 24) as f32)
        };
        (0..count)
            .map(|_| {
                let z = next() * 2.0 - 1.0;
                let theta = next() * std::f32::consts::TAU;
                let r = (1.0 - z * z).max(0.0).sqrt();
                Vertex::new(radius * r * theta.cos(), radius * r * theta.sin(), radius * z)
            })
            .collect()
    }

    fn encloses(hull: &Brush, points: &[Vertex]) -> bool {
        hull.polygons()
            .iter()
            .all(|face| points.iter().all(|p| face.plane().signed_distance(p) <= PLANE_THICKNESS))
    }

    #[test]
    fn tetrahedron_hull() {
        let points = [
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
            Vertex::new(0.0, 0.0, 1.0),
        ];
        let result = compute_convex_hull(&points);
        assert!(result.success, "{}", result.error_message);

        let hull = result.hull().unwrap();
        assert_eq!(hull.len(), 4);
        assert!(hull.is_manifold());
        assert_relative_eq!(hull.volume(), 1.0 / 6.0, epsilon = 1e-5);
    }

    #[test]
    fn cube_corners_give_twelve_triangles() {
        let corners = make_cube_corners(32.0);
        let result = compute_convex_hull(&corners);
        assert!(result.success, "{}", result.error_message);

        let hull = result.hull().unwrap();
        assert_eq!(hull.len(), 12);
        assert!(hull.polygons().iter().all(|p| p.len() == 3));
        assert!(hull.is_manifold());
        assert_relative_eq!(hull.volume(), 64.0f32.powi(3), max_relative = 1e-3);
        assert!(encloses(hull, &corners));
    }

    #[test]
    fn interior_points_are_ignored() {
        let mut points = make_cube_corners(1.0);
        points.push(Vertex::origin());
        points.push(Vertex::new(0.5, -0.25, 0.1));
        points.push(Vertex::new(-0.9, 0.9, 0.0));
        // Duplicate corner, welded away.
        points.push(Vertex::new(1.0, 1.0, 1.0));

        let hull = compute_convex_hull(&points).results.remove(0);
        assert_eq!(hull.len(), 12);
        assert_eq!(hull.unique_vertices().len(), 8);
        assert_relative_eq!(hull.volume(), 8.0, max_relative = 1e-3);
    }

    #[test]
    fn too_few_points_fail() {
        let result = compute_convex_hull(&[
            Vertex::origin(),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        ]);
        assert!(!result.success);
        assert!(result.hull().is_none());

        let repeated = [Vertex::origin(); 5];
        let result = compute_convex_hull(&repeated);
        assert!(!result.success);
        assert!(result.error_message.contains("unique"));
    }

    #[test]
    fn collinear_and_coplanar_points_fail() {
        let line: Vec<Vertex> = (0..6).map(|i| Vertex::new(i as f32, 0.0, 0.0)).collect();
        let result = compute_convex_hull(&line);
        assert!(!result.success);
        assert!(result.error_message.contains("collinear"));

        let square: Vec<Vertex> = make_cube_corners(1.0)
            .into_iter()
            .filter(|p| p.z > 0.0)
            .collect();
        let result = compute_convex_hull(&square);
        assert!(!result.success);
        assert!(result.error_message.contains("coplanar"));
    }

    #[test]
    fn hull_of_brushes_encloses_every_vertex() {
        let size = nalgebra::Vector3::new(2.0, 2.0, 2.0);
        let a = Brush::cuboid(Vertex::origin(), size);
        let b = Brush::cuboid(Vertex::new(10.0, 3.0, -1.0), size);
        let result = compute_convex_hull_of_brushes(&[a.clone(), b.clone()]);
        assert!(result.success, "{}", result.error_message);

        let hull = result.hull().unwrap();
        let pooled: Vec<Vertex> = a.vertices().chain(b.vertices()).copied().collect();
        assert!(encloses(hull, &pooled));
        assert!(hull.is_valid());

        let bounds = hull.bounds().unwrap();
        assert_relative_eq!(bounds.min, Vertex::new(-1.0, -1.0, -2.0), epsilon = 1e-4);
        assert_relative_eq!(bounds.max, Vertex::new(11.0, 4.0, 1.0), epsilon = 1e-4);

        assert!(!compute_convex_hull_of_brushes(&[]).success);
    }

    #[test]
    fn dense_sphere_cloud_gives_convex_enclosing_hull() {
        for seed in 1..=12 {
            let points = make_sphere_cloud(seed, 200, 50.0);
            let result = compute_convex_hull(&points);
            assert!(result.success, "seed {seed}: {}", result.error_message);

            let hull = result.hull().unwrap();
            assert!(crate::join::is_convex_brush(hull), "seed {seed}: hull is not convex");
            assert!(encloses(hull, &points), "seed {seed}: a point lies outside the hull");
        }
    }

    #[test]
    fn joining_hulls_of_sphere_halves_stays_convex() {
        let points = make_sphere_cloud(27, 200, 50.0);
        let left = compute_convex_hull(&points[..100]).results.remove(0);
        let right = compute_convex_hull(&points[100..]).results.remove(0);

        let params = crate::params::JoinParams::default();
        let result = crate::join::join_brushes(&[left, right], &params);
        assert!(result.success, "{}", result.error_message);
        assert!(result.is_convex);
    }
}
