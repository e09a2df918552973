//! Planar polygon faces.

use nalgebra::{Isometry3, Vector3};

use crate::plane::{Classification, Plane};
use crate::tolerance::{DEGENERATE_AREA, EPSILON, PLANE_THICKNESS};
use crate::vertex::{Uv, Vertex};

/// Per-face data the kernel carries through every operation untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceProperties {
    /// Texture (material asset) name.
    pub texture_name: String,
    /// Editor face flags.
    pub flags: u32,
    /// Alpha-test reference value.
    pub alpha_ref: f32,
}

/// A planar polygon in 3D space, defined by an ordered list of vertices.
///
/// Vertices are coplanar and in counter-clockwise winding order when viewed
/// from the front (the direction the normal points). The supporting plane is
/// cached and recomputed with Newell's method whenever the vertices change.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vertex>,
    plane: Plane,
    material_id: u32,
    uvs: Option<Vec<Uv>>,
    properties: FaceProperties,
}

impl Polygon {
    /// Creates a new polygon from a list of vertices.
    ///
    /// Returns `None` if fewer than 3 vertices are provided or the vertices
    /// do not span a plane (zero Newell normal).
    pub fn new(vertices: Vec<Vertex>) -> Option<Self> {
        let plane = newell_plane(&vertices)?;
        Some(Self {
            vertices,
            plane,
            material_id: 0,
            uvs: None,
            properties: FaceProperties::default(),
        })
    }

    /// Sets the material id.
    #[must_use]
    pub fn with_material(mut self, material_id: u32) -> Self {
        self.material_id = material_id;
        self
    }

    /// Sets the face properties.
    #[must_use]
    pub fn with_properties(mut self, properties: FaceProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Attaches per-vertex texture coordinates.
    ///
    /// Coordinates whose count does not match the vertex count are discarded.
    #[must_use]
    pub fn with_uvs(mut self, uvs: Vec<Uv>) -> Self {
        self.uvs = (uvs.len() == self.vertices.len()).then_some(uvs);
        self
    }

    /// Builds a new polygon from `vertices` that inherits this polygon's
    /// material and face properties.
    pub fn with_vertices(&self, vertices: Vec<Vertex>, uvs: Option<Vec<Uv>>) -> Option<Self> {
        let mut polygon = Self::new(vertices)?
            .with_material(self.material_id)
            .with_properties(self.properties.clone());
        if let Some(uvs) = uvs {
            polygon = polygon.with_uvs(uvs);
        }
        Some(polygon)
    }

    /// Replaces the vertices and recomputes the plane.
    ///
    /// Returns `false` (leaving the polygon unchanged) if the new vertices
    /// are degenerate. Texture coordinates are dropped when the count changes.
    pub fn set_vertices(&mut self, vertices: Vec<Vertex>) -> bool {
        let Some(plane) = newell_plane(&vertices) else {
            return false;
        };
        if self.uvs.as_ref().is_some_and(|uvs| uvs.len() != vertices.len()) {
            self.uvs = None;
        }
        self.vertices = vertices;
        self.plane = plane;
        true
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the cached supporting plane.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the unit normal of the polygon.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.plane.normal()
    }

    #[inline]
    pub fn material_id(&self) -> u32 {
        self.material_id
    }

    #[inline]
    pub fn uvs(&self) -> Option<&[Uv]> {
        self.uvs.as_deref()
    }

    #[inline]
    pub fn properties(&self) -> &FaceProperties {
        &self.properties
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices (always false for constructed polygons).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over the polygon's edges as `(start, end)` pairs, wrapping around.
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Computes the area of the polygon.
    pub fn area(&self) -> f32 {
        newell_normal(&self.vertices).norm() * 0.5
    }

    /// Computes the centroid (vertex average) of the polygon.
    pub fn centroid(&self) -> Vertex {
        centroid(&self.vertices)
    }

    /// A polygon is valid when it has at least three vertices, a non-degenerate
    /// area, and every vertex lies within the plane thickness of its plane.
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3
            && self.area() > DEGENERATE_AREA
            && self
                .vertices
                .iter()
                .all(|v| self.plane.signed_distance(v).abs() <= PLANE_THICKNESS)
    }

    /// Returns the polygon with reversed winding (and UV order), facing the
    /// opposite direction.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        let uvs = self.uvs.as_ref().map(|uvs| uvs.iter().rev().copied().collect());
        Self {
            vertices,
            plane: self.plane.flipped(),
            material_id: self.material_id,
            uvs,
            properties: self.properties.clone(),
        }
    }

    /// Returns the polygon moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f32>) -> Self {
        let vertices = self.vertices.iter().map(|v| v + offset).collect();
        Self {
            vertices,
            plane: Plane::from_unit(
                self.plane.normal(),
                self.plane.distance() + self.plane.normal().dot(offset),
            ),
            material_id: self.material_id,
            uvs: self.uvs.clone(),
            properties: self.properties.clone(),
        }
    }

    /// Returns the polygon transformed by a rigid motion.
    #[must_use]
    pub fn transformed(&self, isometry: &Isometry3<f32>) -> Self {
        let vertices: Vec<Vertex> = self.vertices.iter().map(|v| isometry * v).collect();
        let normal = isometry.rotation * self.plane.normal();
        let distance = normal.dot(&vertices[0].coords);
        Self {
            vertices,
            plane: Plane::from_unit(normal, distance),
            material_id: self.material_id,
            uvs: self.uvs.clone(),
            properties: self.properties.clone(),
        }
    }

    /// Classifies this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        plane.classify_points(&self.vertices)
    }

    /// Returns `true` if the polygon's normal points roughly the same way as
    /// the plane's normal.
    #[inline]
    pub fn faces_same_direction(&self, plane: &Plane) -> bool {
        self.normal().dot(&plane.normal()) > 0.0
    }

    /// Returns `true` if no vertex turns against the polygon's winding.
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n <= 3 {
            return true;
        }
        let normal = self.normal();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            turn_sine(&a, &b, &c, &normal) >= -EPSILON
        })
    }
}

/// Signed sine of the turn at `b` along `a -> b -> c`, measured around `normal`.
///
/// Positive for a counter-clockwise (convex) turn, zero for collinear points.
pub(crate) fn turn_sine(a: &Vertex, b: &Vertex, c: &Vertex, normal: &Vector3<f32>) -> f32 {
    let e0 = b - a;
    let e1 = c - b;
    let scale = e0.norm() * e1.norm();
    if scale <= f32::EPSILON {
        return 0.0;
    }
    e0.cross(&e1).dot(normal) / scale
}

/// Computes the Newell normal of a vertex loop.
///
/// The result is unnormalized; its length is twice the loop's area.
pub fn newell_normal(vertices: &[Vertex]) -> Vector3<f32> {
    let n = vertices.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let current = &vertices[i];
        let next = &vertices[(i + 1) % n];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal
}

/// Computes the plane of a vertex loop with Newell's method.
fn newell_plane(vertices: &[Vertex]) -> Option<Plane> {
    if vertices.len() < 3 {
        return None;
    }
    let normal = newell_normal(vertices);
    if normal.norm() * 0.5 <= DEGENERATE_AREA {
        return None;
    }
    Plane::from_point_and_normal(centroid(vertices), normal)
}

/// Vertex average of a point set.
pub(crate) fn centroid(vertices: &[Vertex]) -> Vertex {
    if vertices.is_empty() {
        return Vertex::origin();
    }
    let sum: Vector3<f32> = vertices.iter().map(|p| p.coords).sum();
    Vertex::from(sum / vertices.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Translation3, UnitQuaternion};

    fn make_square(size: f32, z: f32) -> Polygon {
        Polygon::new(vec![
            Vertex::new(0.0, 0.0, z),
            Vertex::new(size, 0.0, z),
            Vertex::new(size, size, z),
            Vertex::new(0.0, size, z),
        ])
        .unwrap()
    }

    #[test]
    fn newell_plane_matches_winding() {
        let square = make_square(2.0, 3.0);
        assert_relative_eq!(square.normal(), Vector3::z(), epsilon = 1e-6);
        assert_relative_eq!(square.plane().distance(), 3.0, epsilon = 1e-5);
        assert_relative_eq!(square.area(), 4.0, epsilon = 1e-5);
        assert_relative_eq!(square.centroid(), Vertex::new(1.0, 1.0, 3.0));
        assert!(square.is_valid());
    }

    #[test]
    fn too_few_or_collinear_vertices() {
        assert!(Polygon::new(vec![Vertex::origin(), Vertex::new(1.0, 0.0, 0.0)]).is_none());
        let collinear = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(2.0, 0.0, 0.0),
        ];
        assert!(Polygon::new(collinear).is_none());
    }

    #[test]
    fn non_planar_polygon_is_invalid() {
        let warped = Polygon::new(vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(4.0, 0.0, 0.0),
            Vertex::new(4.0, 4.0, 1.0),
            Vertex::new(0.0, 4.0, 0.0),
        ])
        .unwrap();
        assert!(!warped.is_valid());
    }

    #[test]
    fn flip_reverses_winding_and_uvs() {
        let square = make_square(1.0, 0.0).with_uvs(vec![
            Uv::new(0.0, 0.0),
            Uv::new(1.0, 0.0),
            Uv::new(1.0, 1.0),
            Uv::new(0.0, 1.0),
        ]);
        let flipped = square.flipped();

        assert_relative_eq!(flipped.normal(), -Vector3::z(), epsilon = 1e-6);
        assert_eq!(flipped.vertices()[0], square.vertices()[3]);
        assert_eq!(flipped.uvs().unwrap()[0], Uv::new(0.0, 1.0));
        assert_relative_eq!(flipped.area(), square.area());
    }

    #[test]
    fn mismatched_uvs_are_dropped() {
        let square = make_square(1.0, 0.0).with_uvs(vec![Uv::new(0.0, 0.0)]);
        assert!(square.uvs().is_none());
    }

    #[test]
    fn with_vertices_inherits_attributes() {
        let properties = FaceProperties {
            texture_name: "brick".to_string(),
            flags: 4,
            alpha_ref: 0.5,
        };
        let square = make_square(1.0, 0.0)
            .with_material(7)
            .with_properties(properties.clone());

        let child = square
            .with_vertices(square.vertices()[..3].to_vec(), None)
            .unwrap();
        assert_eq!(child.material_id(), 7);
        assert_eq!(child.properties(), &properties);
    }

    #[test]
    fn set_vertices_recomputes_plane() {
        let mut square = make_square(1.0, 0.0);
        let lift = Vector3::new(0.0, 0.0, 5.0);
        let moved: Vec<Vertex> = square.vertices().iter().map(|v| v + lift).collect();
        assert!(square.set_vertices(moved));
        assert_relative_eq!(square.plane().distance(), 5.0, epsilon = 1e-5);

        assert!(!square.set_vertices(vec![Vertex::origin(), Vertex::origin(), Vertex::origin()]));
        assert_eq!(square.len(), 4);
    }

    #[test]
    fn translate_and_transform_keep_plane_in_sync() {
        let square = make_square(2.0, 0.0);
        let moved = square.translated(&Vector3::new(0.0, 0.0, 3.0));
        assert_relative_eq!(moved.plane().distance(), 3.0, epsilon = 1e-5);

        let iso = Isometry3::from_parts(
            Translation3::new(1.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::FRAC_PI_2),
        );
        let rotated = square.transformed(&iso);
        assert_relative_eq!(rotated.normal(), -Vector3::y(), epsilon = 1e-5);
        assert!(rotated.is_valid());
    }

    #[test]
    fn classify_against_plane() {
        let square = make_square(1.0, 0.0);
        let above = Plane::new(Vector3::z(), -1.0).unwrap();
        let through = Plane::new(Vector3::x(), 0.5).unwrap();
        assert_eq!(square.classify(&above), Classification::Front);
        assert_eq!(square.classify(&through), Classification::Spanning);
        assert_eq!(square.classify(square.plane()), Classification::On);
        assert!(square.faces_same_direction(square.plane()));
    }

    #[test]
    fn convexity() {
        assert!(make_square(1.0, 0.0).is_convex());

        let l_shape = Polygon::new(vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(2.0, 0.0, 0.0),
            Vertex::new(2.0, 1.0, 0.0),
            Vertex::new(1.0, 1.0, 0.0),
            Vertex::new(1.0, 2.0, 0.0),
            Vertex::new(0.0, 2.0, 0.0),
        ])
        .unwrap();
        assert!(!l_shape.is_convex());
    }

    #[test]
    fn edges_wrap_around() {
        let square = make_square(1.0, 0.0);
        let edges: Vec<_> = square.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].1, &square.vertices()[0]);
    }
}
