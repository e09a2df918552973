//! Hollowing a brush into per-face wall slabs.
//!
//! Every selected face becomes its own brush: the face itself, a copy pushed
//! inward along the face normal, and one quad per edge joining the two.

use nalgebra::Vector3;
use tracing::{debug, info, warn};

use crate::brush::Brush;
use crate::error::{CsgError, CsgResult};
use crate::params::HollowParams;
use crate::plane::Plane;
use crate::polygon::Polygon;
use crate::result::HollowResult;
use crate::vertex::{Vertex, try_normalize, welded};

/// Checks that `thickness` leaves room for an interior.
///
/// The thickness must be positive and below half of the brush's smallest
/// bounding-box dimension.
pub fn validate_hollow_thickness(brush: &Brush, thickness: f32) -> CsgResult<()> {
    if !thickness.is_finite() || thickness <= 0.0 {
        return Err(CsgError::degenerate(format!(
            "wall thickness must be positive, got {thickness}"
        )));
    }

    let bounds = brush
        .bounds()
        .ok_or_else(|| CsgError::invalid_input("cannot hollow an empty brush"))?;
    let limit = bounds.min_dimension() / 2.0;
    if thickness >= limit {
        return Err(CsgError::degenerate(format!(
            "wall thickness {thickness} must be less than {limit} (half the smallest dimension)"
        )));
    }
    Ok(())
}

/// Builds the wall slab behind one face.
///
/// Each vertex moves `thickness` along the face's own normal. Returns `None`
/// if any slab face degenerates.
pub fn create_wall_slab(polygon: &Polygon, thickness: f32) -> Option<Brush> {
    let offset = polygon.normal() * thickness;
    let outer = polygon.vertices();
    let inner: Vec<Vertex> = outer.iter().map(|v| v - offset).collect();

    let mut faces = Vec::with_capacity(outer.len() + 2);
    faces.push(polygon.clone());
    faces.push(
        polygon
            .with_vertices(inner.clone(), polygon.uvs().map(<[_]>::to_vec))?
            .flipped(),
    );

    let n = outer.len();
    for i in 0..n {
        let j = (i + 1) % n;
        let side = polygon.with_vertices(vec![outer[i], outer[j], inner[j], inner[i]], None)?;
        // This winding faces into the slab.
        faces.push(side.flipped());
    }

    Some(Brush::from_polygons(faces))
}

/// Turns the selected faces of `brush` into independent wall brushes.
///
/// Faces that degenerate after offsetting are skipped and counted; the
/// operation fails only when nothing is produced.
pub fn hollow_brush(brush: &Brush, params: &HollowParams) -> HollowResult {
    info!(
        faces = brush.len(),
        thickness = params.wall_thickness,
        all_faces = params.hollow_all_faces,
        "Starting hollow"
    );

    if !brush.is_valid() {
        return HollowResult::failure(
            CsgError::invalid_input("brush to hollow is invalid").to_string(),
        );
    }
    if let Err(err) = validate_hollow_thickness(brush, params.wall_thickness) {
        return HollowResult::failure(err.to_string());
    }

    let mut result = HollowResult {
        success: true,
        ..HollowResult::default()
    };

    for (index, polygon) in brush.polygons().iter().enumerate() {
        if !params.is_face_selected(index) {
            continue;
        }
        match create_wall_slab(polygon, params.wall_thickness) {
            Some(slab) => result.results.push(slab),
            None => {
                warn!(face = index, "Face degenerated while building its wall");
                result.skipped_faces += 1;
            }
        }
    }

    if result.results.is_empty() {
        return HollowResult {
            skipped_faces: result.skipped_faces,
            ..HollowResult::failure("Hollow produced no wall brushes")
        };
    }

    info!(
        walls = result.results.len(),
        skipped = result.skipped_faces,
        "Hollow complete"
    );
    result
}

/// Moves a shared corner inward by `thickness` against every adjacent face.
///
/// The adjacent planes are offset inward and intersected three at a time;
/// the first triple that meets in a point wins. With fewer than three planes
/// (or no usable triple) the vertex moves along the averaged normal.
/// Returns `None` if there are no planes or their normals cancel out.
pub fn compute_offset_vertex(vertex: &Vertex, planes: &[Plane], thickness: f32) -> Option<Vertex> {
    if planes.is_empty() {
        return None;
    }

    let offset: Vec<Plane> = planes.iter().map(|p| p.offset(-thickness)).collect();
    for i in 0..offset.len() {
        for j in i + 1..offset.len() {
            for k in j + 1..offset.len() {
                if let Some(point) = Plane::intersect_three(&offset[i], &offset[j], &offset[k]) {
                    return Some(point);
                }
            }
        }
    }

    debug!(planes = planes.len(), "Offsetting vertex along the averaged normal");
    let sum: Vector3<f32> = planes.iter().map(Plane::normal).sum();
    let normal = try_normalize(sum)?;
    Some(vertex - normal * thickness)
}

/// Distinct planes of the faces that touch `vertex`.
pub fn planes_meeting_at(brush: &Brush, vertex: &Vertex) -> Vec<Plane> {
    let mut planes: Vec<Plane> = Vec::new();
    for polygon in brush.polygons() {
        let touches = polygon.vertices().iter().any(|v| welded(v, vertex));
        if touches && !planes.iter().any(|p| p.is_coplanar_with(polygon.plane())) {
            planes.push(*polygon.plane());
        }
    }
    planes
}
