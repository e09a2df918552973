//! Flat triangle-mesh boundary format.
//!
//! Everything outside the kernel (renderer, scene graph, dialogs) exchanges
//! geometry as a flat XYZ vertex array plus a triangle index array.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::brush::Brush;
use crate::error::{CsgError, CsgResult};
use crate::polygon::Polygon;
use crate::triangulate::triangulate;
use crate::vertex::Vertex;

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// XYZ triplets; length is a multiple of 3.
    pub vertices: Vec<f32>,
    /// Triangle corner indices; length is a multiple of 3.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new(vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of vertices (XYZ triplets).
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns vertex `index` as a point, or `None` past the end of the array.
    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        let xyz = self.vertices.get(index * 3..index * 3 + 3)?;
        Some(Vertex::new(xyz[0], xyz[1], xyz[2]))
    }

    /// Iterates over triangles as corner positions.
    ///
    /// Triangles with an out-of-range index are skipped; call
    /// [`validate`](Self::validate) to have them reported instead.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([
                self.vertex(tri[0] as usize)?,
                self.vertex(tri[1] as usize)?,
                self.vertex(tri[2] as usize)?,
            ])
        })
    }

    /// Total area of all triangles.
    pub fn surface_area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// Checks the array shapes and index ranges.
    pub fn validate(&self) -> CsgResult<()> {
        if self.vertices.is_empty() {
            return Err(CsgError::invalid_input("vertex array is empty"));
        }
        if self.vertices.len() % 3 != 0 {
            return Err(CsgError::invalid_input(format!(
                "vertex array length {} is not a multiple of 3",
                self.vertices.len()
            )));
        }
        if self.indices.is_empty() {
            return Err(CsgError::invalid_input("index array is empty"));
        }
        if self.indices.len() % 3 != 0 {
            return Err(CsgError::invalid_input(format!(
                "index array length {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.vertex_count();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(CsgError::invalid_input(format!(
                "index {bad} is out of range for {vertex_count} vertices"
            )));
        }
        Ok(())
    }
}

impl Brush {
    /// Builds a brush from a triangle mesh: one polygon per triangle.
    ///
    /// Coplanar triangles are not merged. Degenerate triangles are skipped;
    /// a mesh without any usable triangle is rejected.
    pub fn from_triangle_mesh(mesh: &TriangleMesh) -> CsgResult<Self> {
        mesh.validate()?;

        let mut polygons = Vec::with_capacity(mesh.triangle_count());
        let mut skipped = 0usize;
        for corners in mesh.triangles() {
            match Polygon::new(corners.to_vec()) {
                Some(polygon) => polygons.push(polygon),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(skipped, "Skipped degenerate triangles during import");
        }
        if polygons.is_empty() {
            return Err(CsgError::degenerate("mesh contains no non-degenerate triangles"));
        }

        info!(
            triangles = mesh.triangle_count(),
            polygons = polygons.len(),
            "Imported brush from triangle mesh"
        );
        Ok(Brush::from_polygons(polygons))
    }

    /// Triangulates every face and flattens the result into a triangle mesh.
    ///
    /// Bitwise-identical positions share one vertex entry.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        let mut lookup: HashMap<[u32; 3], u32> = HashMap::new();

        for polygon in self.polygons() {
            for triangle in triangulate(polygon) {
                for v in triangle.vertices() {
                    let key = [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()];
                    let index = *lookup.entry(key).or_insert_with(|| {
                        mesh.vertices.extend_from_slice(&[v.x, v.y, v.z]);
                        (mesh.vertices.len() / 3 - 1) as u32
                    });
                    mesh.indices.push(index);
                }
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn make_tetra_mesh() -> TriangleMesh {
        TriangleMesh::new(
            vec![
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0,
            ],
            vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3],
        )
    }

    #[test]
    fn import_creates_one_polygon_per_triangle() {
        let brush = Brush::from_triangle_mesh(&make_tetra_mesh()).unwrap();
        assert_eq!(brush.len(), 4);
        assert!(brush.is_valid());
        assert!(brush.is_manifold());
        assert_relative_eq!(brush.volume(), 1.0 / 6.0, epsilon = 1e-6);
    }

    #[test]
    fn invalid_arrays_are_rejected() {
        let empty = TriangleMesh::default();
        assert!(matches!(Brush::from_triangle_mesh(&empty), Err(CsgError::InvalidInput(_))));

        let ragged = TriangleMesh::new(vec![0.0, 0.0], vec![0, 0, 0]);
        assert!(matches!(Brush::from_triangle_mesh(&ragged), Err(CsgError::InvalidInput(_))));

        let mut bad_indices = make_tetra_mesh();
        bad_indices.indices.push(0);
        assert!(matches!(Brush::from_triangle_mesh(&bad_indices), Err(CsgError::InvalidInput(_))));

        let mut out_of_range = make_tetra_mesh();
        out_of_range.indices[0] = 99;
        let err = Brush::from_triangle_mesh(&out_of_range).unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn all_degenerate_triangles_are_rejected() {
        let mesh = TriangleMesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0],
            vec![0, 1, 2],
        );
        assert!(matches!(
            Brush::from_triangle_mesh(&mesh),
            Err(CsgError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn unvalidated_mesh_skips_out_of_range_triangles() {
        let mut mesh = make_tetra_mesh();
        mesh.indices.extend([0, 1, 42]);

        assert_eq!(mesh.vertex(3), Some(Vertex::new(0.0, 0.0, 1.0)));
        assert_eq!(mesh.vertex(42), None);
        assert_eq!(mesh.triangles().count(), 4);
        let expected = make_tetra_mesh().surface_area();
        assert_relative_eq!(mesh.surface_area(), expected, epsilon = 1e-6);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn export_shares_vertices() {
        let cube = Brush::cuboid(Vertex::origin(), Vector3::new(2.0, 2.0, 2.0));
        let mesh = cube.to_triangle_mesh();

        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertex_count(), 8);
        assert!(mesh.validate().is_ok());
        assert_relative_eq!(mesh.surface_area(), cube.surface_area(), epsilon = 1e-4);
    }

    #[test]
    fn export_then_import_keeps_volume() {
        let cube = Brush::cuboid(Vertex::new(1.0, 2.0, 3.0), Vector3::new(4.0, 2.0, 6.0));
        let reimported = Brush::from_triangle_mesh(&cube.to_triangle_mesh()).unwrap();
        assert_eq!(reimported.len(), 12);
        assert_relative_eq!(reimported.volume(), cube.volume(), epsilon = 1e-3);
    }
}
