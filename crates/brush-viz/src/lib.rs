//! Drawing helpers and camera for the brush CSG viewer.

use std::hash::{Hash, Hasher};

use brush_csg::{Aabb, Brush, Polygon, TriangleMesh, triangulate};
use macroquad::models::{Mesh, Vertex, draw_mesh};
use macroquad::prelude::*;

pub mod showcase;
pub use showcase::{Scene, Showcase};

/// Converts a kernel vertex into macroquad's vector type.
#[inline]
pub fn to_vec3(v: &brush_csg::Vertex) -> Vec3 {
    vec3(v.x, v.y, v.z)
}

/// Deterministic colour for a polygon, hashed from its plane and material.
///
/// Fragments of the same face keep the same colour after a cut.
pub fn polygon_color(polygon: &Polygon) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    let plane = polygon.plane();
    let normal = plane.normal();
    for component in [normal.x, normal.y, normal.z, plane.distance()] {
        // Quantised so that float noise from splitting does not change the colour.
        ((component * 100.0).round() as i32).hash(&mut hasher);
    }
    polygon.material_id().hash(&mut hasher);
    let hash = hasher.finish();

    let r = (((hash >> 16) & 0xFF) as u8).max(40);
    let g = (((hash >> 8) & 0xFF) as u8).max(40);
    let b = ((hash & 0xFF) as u8).max(40);
    Color::from_rgba(r, g, b, 255)
}

/// Draws one polygon as filled triangles from the kernel's triangulator.
pub fn draw_polygon(polygon: &Polygon) {
    let color = polygon_color(polygon);
    let mut vertices = Vec::new();
    let mut indices: Vec<u16> = Vec::new();

    for triangle in triangulate(polygon) {
        for p in triangle.vertices() {
            indices.push(vertices.len() as u16);
            vertices.push(Vertex::new2(to_vec3(p), vec2(0.0, 0.0), color));
        }
    }
    if indices.is_empty() {
        return;
    }

    draw_mesh(&Mesh {
        vertices,
        indices,
        texture: None,
    });
}

/// Draws every face of a brush.
pub fn draw_brush(brush: &Brush) {
    for polygon in brush.polygons() {
        draw_polygon(polygon);
    }
}

/// Draws the triangle edges of a boundary mesh.
pub fn draw_mesh_wireframe(mesh: &TriangleMesh, color: Color) {
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (to_vec3(&a), to_vec3(&b), to_vec3(&c));
        draw_line_3d(a, b, color);
        draw_line_3d(b, c, color);
        draw_line_3d(c, a, color);
    }
}

/// Draws the world axes at the origin.
pub fn draw_axes(length: f32) {
    draw_line_3d(Vec3::ZERO, vec3(length, 0.0, 0.0), RED);
    draw_line_3d(Vec3::ZERO, vec3(0.0, length, 0.0), GREEN);
    draw_line_3d(Vec3::ZERO, vec3(0.0, 0.0, length), BLUE);
}

/// Orbit camera circling a target point.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Distance change per scroll step.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: Vec3::ZERO,
            zoom_speed: 5.0,
            min_distance: 10.0,
            max_distance: 200.0,
        }
    }

    /// Sets the zoom speed and distance limits.
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Aims the camera at the centre of `bounds` from a distance that fits it.
    pub fn frame(&mut self, bounds: &Aabb) {
        self.target = to_vec3(&bounds.center());
        let radius = bounds.size().norm() * 0.5;
        self.distance = (radius * 2.5).clamp(self.min_distance, self.max_distance);
    }

    /// Mouse drag and arrow keys rotate, the wheel zooms.
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        let step = 0.02;
        if is_key_down(KeyCode::Left) {
            self.yaw += step;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= step;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += step;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= step;
        }
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        self.distance = (self.distance - mouse_wheel().1 * self.zoom_speed)
            .clamp(self.min_distance, self.max_distance);
    }

    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }
}
