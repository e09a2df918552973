//! Brushes: solids described by their planar faces.

use std::collections::HashMap;

use nalgebra::{Isometry3, Vector3};

use crate::bounds::Aabb;
use crate::polygon::{Polygon, centroid};
use crate::vertex::{Vertex, push_unique, welded};

/// A solid represented as an ordered collection of planar polygons.
///
/// Brushes are plain values: there is no adjacency structure, and every
/// kernel operation returns new brushes rather than editing its inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Brush {
    polygons: Vec<Polygon>,
}

impl Brush {
    /// Creates a brush from its faces.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Creates an axis-aligned box centred on `center` with edge lengths `size`.
    ///
    /// Faces are quads wound counter-clockwise when viewed from outside.
    pub fn cuboid(center: Vertex, size: Vector3<f32>) -> Self {
        let half = size / 2.0;
        let corners = [
            center + Vector3::new(-half.x, -half.y, -half.z),
            center + Vector3::new(half.x, -half.y, -half.z),
            center + Vector3::new(half.x, half.y, -half.z),
            center + Vector3::new(-half.x, half.y, -half.z),
            center + Vector3::new(-half.x, -half.y, half.z),
            center + Vector3::new(half.x, -half.y, half.z),
            center + Vector3::new(half.x, half.y, half.z),
            center + Vector3::new(-half.x, half.y, half.z),
        ];

        let faces: [[usize; 4]; 6] = [
            [4, 5, 6, 7], // +Z
            [1, 0, 3, 2], // -Z
            [0, 4, 7, 3], // -X
            [5, 1, 2, 6], // +X
            [7, 6, 2, 3], // +Y
            [0, 1, 5, 4], // -Y
        ];

        let polygons = faces
            .iter()
            .filter_map(|face| Polygon::new(face.iter().map(|&i| corners[i]).collect()))
            .collect();
        Self { polygons }
    }

    /// Returns the faces of the brush.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    /// Appends a face.
    #[inline]
    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Returns the number of faces.
    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// A brush is valid when it has at least one face and every face is valid.
    pub fn is_valid(&self) -> bool {
        !self.polygons.is_empty() && self.polygons.iter().all(Polygon::is_valid)
    }

    /// Iterates over every polygon vertex (shared corners repeat).
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.polygons.iter().flat_map(|p| p.vertices().iter())
    }

    /// Returns the brush's corners with welded duplicates removed.
    pub fn unique_vertices(&self) -> Vec<Vertex> {
        let mut unique = Vec::new();
        for v in self.vertices() {
            push_unique(&mut unique, *v);
        }
        unique
    }

    /// Vertex average of the brush's unique corners.
    pub fn centroid(&self) -> Vertex {
        centroid(&self.unique_vertices())
    }

    /// Bounding box of all vertices, or `None` for an empty brush.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices())
    }

    /// Returns `true` if the bounding boxes of the two brushes overlap.
    pub fn intersects(&self, other: &Brush) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some(a), Some(b)) => a.intersects(&b),
            _ => false,
        }
    }

    /// Enclosed volume via the divergence theorem.
    ///
    /// Positive for a closed brush with outward-facing polygons; meaningless
    /// for open brushes.
    pub fn volume(&self) -> f32 {
        let mut six_volume = 0.0;
        for polygon in &self.polygons {
            let verts = polygon.vertices();
            let origin = verts[0].coords;
            for i in 1..verts.len() - 1 {
                six_volume += origin.dot(&verts[i].coords.cross(&verts[i + 1].coords));
            }
        }
        six_volume / 6.0
    }

    /// Sum of all face areas.
    pub fn surface_area(&self) -> f32 {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Returns `true` if every edge is shared by exactly two faces that
    /// traverse it in opposite directions (vertices compared with the weld
    /// tolerance).
    pub fn is_manifold(&self) -> bool {
        if self.polygons.is_empty() {
            return false;
        }

        let mut corners: Vec<Vertex> = Vec::new();
        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();

        for polygon in &self.polygons {
            for (start, end) in polygon.edges() {
                let a = corner_index(&mut corners, start);
                let b = corner_index(&mut corners, end);
                if a == b {
                    continue;
                }
                *directed.entry((a, b)).or_insert(0) += 1;
            }
        }

        directed
            .iter()
            .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Returns the brush moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f32>) -> Self {
        Self {
            polygons: self.polygons.iter().map(|p| p.translated(offset)).collect(),
        }
    }

    /// Returns the brush transformed by a rigid motion.
    #[must_use]
    pub fn transformed(&self, isometry: &Isometry3<f32>) -> Self {
        Self {
            polygons: self.polygons.iter().map(|p| p.transformed(isometry)).collect(),
        }
    }
}

impl FromIterator<Polygon> for Brush {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self::from_polygons(iter.into_iter().collect())
    }
}

fn corner_index(corners: &mut Vec<Vertex>, point: &Vertex) -> usize {
    if let Some(index) = corners.iter().position(|c| welded(c, point)) {
        return index;
    }
    corners.push(*point);
    corners.len() - 1
}
