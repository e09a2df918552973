//! Polygon triangulation.
//!
//! Convex polygons are fanned from their first vertex. Non-convex polygons
//! are ear-clipped; if no ear can be found (numerically marginal input) the
//! remaining loop is fanned so the routine always terminates.

use nalgebra::Vector3;
use tracing::warn;

use crate::brush::Brush;
use crate::polygon::{Polygon, turn_sine};
use crate::tolerance::EPSILON;
use crate::vertex::{Uv, Vertex};

/// Splits a polygon into triangles that inherit its attributes.
///
/// A triangle is returned unchanged. Degenerate triangles produced along
/// collinear runs are dropped.
pub fn triangulate(polygon: &Polygon) -> Vec<Polygon> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }
    if n == 3 {
        return vec![polygon.clone()];
    }

    let corners = if polygon.is_convex() {
        fan((0..n).collect::<Vec<_>>().as_slice())
    } else {
        ear_clip(polygon.vertices(), &polygon.normal())
    };

    corners
        .into_iter()
        .filter_map(|[a, b, c]| make_triangle(polygon, a, b, c))
        .collect()
}

/// Triangulates every face of a brush.
pub fn triangulate_brush(brush: &Brush) -> Brush {
    brush.polygons().iter().flat_map(triangulate).collect()
}

fn make_triangle(polygon: &Polygon, a: usize, b: usize, c: usize) -> Option<Polygon> {
    let v = polygon.vertices();
    let uvs: Option<Vec<Uv>> = polygon.uvs().map(|uvs| vec![uvs[a], uvs[b], uvs[c]]);
    polygon.with_vertices(vec![v[a], v[b], v[c]], uvs)
}

/// Fan triangulation over a loop of vertex indices.
fn fan(loop_indices: &[usize]) -> Vec<[usize; 3]> {
    (1..loop_indices.len().saturating_sub(1))
        .map(|i| [loop_indices[0], loop_indices[i], loop_indices[i + 1]])
        .collect()
}

/// Ear clipping over the polygon's vertices, bounded by `n²` scans.
fn ear_clip(vertices: &[Vertex], normal: &Vector3<f32>) -> Vec<[usize; 3]> {
    let n = vertices.len();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);
    let mut budget = n * n;

    while remaining.len() > 3 && budget > 0 {
        let count = remaining.len();
        let mut clipped = false;

        for i in 0..count {
            budget = budget.saturating_sub(1);
            let prev = remaining[(i + count - 1) % count];
            let curr = remaining[i];
            let next = remaining[(i + 1) % count];

            if is_ear(vertices, &remaining, prev, curr, next, normal) {
                triangles.push([prev, curr, next]);
                remaining.remove(i);
                clipped = true;
                break;
            }
        }

        if !clipped {
            warn!(remaining = remaining.len(), "No ear found; finishing polygon with a fan");
            break;
        }
    }

    if remaining.len() >= 3 {
        triangles.extend(fan(&remaining));
    }
    triangles
}

fn is_ear(
    vertices: &[Vertex],
    remaining: &[usize],
    prev: usize,
    curr: usize,
    next: usize,
    normal: &Vector3<f32>,
) -> bool {
    let a = vertices[prev];
    let b = vertices[curr];
    let c = vertices[next];

    if turn_sine(&a, &b, &c, normal) <= EPSILON {
        return false;
    }

    remaining
        .iter()
        .filter(|&&idx| idx != prev && idx != curr && idx != next)
        .all(|&idx| !point_in_triangle(&vertices[idx], &a, &b, &c, normal))
}

/// Same-side test: the point is inside (or on the boundary of) the triangle
/// when it sits left of all three edges around `normal`.
fn point_in_triangle(
    p: &Vertex,
    a: &Vertex,
    b: &Vertex,
    c: &Vertex,
    normal: &Vector3<f32>,
) -> bool {
    let side = |from: &Vertex, to: &Vertex| (to - from).cross(&(p - from)).dot(normal);
    side(a, b) >= 0.0 && side(b, c) >= 0.0 && side(c, a) >= 0.0
}
