//! Keyboard-driven demo scenes, one per kernel operation.

use brush_csg::{
    Aabb, Brush, BrushSplitResult, CarveParams, HollowParams, JoinParams, OperationResult, Plane,
    TriangleMesh, Vertex, carve_brushes, hollow_brush, join_brushes, split_brush,
};
use macroquad::prelude::*;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use tracing::info;

use crate::{draw_brush, draw_mesh_wireframe};

/// Gap between the two halves of the split scene.
const SPLIT_GAP: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    Split,
    Carve,
    Hollow,
    Join,
}

impl Scene {
    pub const ALL: [Scene; 4] = [Scene::Split, Scene::Carve, Scene::Hollow, Scene::Join];

    pub fn title(self) -> &'static str {
        match self {
            Scene::Split => "Split by plane",
            Scene::Carve => "Carve",
            Scene::Hollow => "Hollow",
            Scene::Join => "Join (convex hull)",
        }
    }

    fn key(self) -> KeyCode {
        match self {
            Scene::Split => KeyCode::Key1,
            Scene::Carve => KeyCode::Key2,
            Scene::Hollow => KeyCode::Key3,
            Scene::Join => KeyCode::Key4,
        }
    }

    /// Builds the scene's input brushes and runs the operation on them.
    pub fn run(self) -> SceneOutput {
        let (inputs, result) = match self {
            Scene::Split => {
                let cube = box_brush([0.0, 0.0, 0.0], [16.0, 16.0, 16.0]);
                let normal = Vector3::new(0.3, 1.0, 0.2);
                let mut split = match Plane::new(normal, 0.0) {
                    Some(plane) => split_brush(&cube, &plane),
                    None => BrushSplitResult::failure("invalid plane"),
                };
                let push = normal.normalize() * SPLIT_GAP;
                split.front = split.front.translated(&push);
                split.back = split.back.translated(&-push);
                (vec![cube], OperationResult::from(split))
            }
            Scene::Carve => {
                let slab = box_brush([0.0, 0.0, 0.0], [24.0, 4.0, 24.0]);
                let placement = Isometry3::from_parts(
                    Translation3::new(4.0, 0.0, 4.0),
                    UnitQuaternion::from_euler_angles(0.0, 0.6, 0.0),
                );
                let cutter = box_brush([0.0, 0.0, 0.0], [8.0, 8.0, 8.0]).transformed(&placement);
                let result = carve_brushes(
                    std::slice::from_ref(&slab),
                    &cutter,
                    &CarveParams::default(),
                );
                (vec![slab, cutter], OperationResult::from(result))
            }
            Scene::Hollow => {
                let room = box_brush([0.0, 0.0, 0.0], [20.0, 12.0, 16.0]);
                // Every face except the ceiling (+Y, face 4).
                let params = HollowParams::with_thickness(1.5).face_mask(0b10_1111);
                let result = hollow_brush(&room, &params);
                (vec![room], OperationResult::from(result))
            }
            Scene::Join => {
                let left = box_brush([-8.0, 0.0, 0.0], [6.0, 6.0, 6.0]);
                let placement = Isometry3::from_parts(
                    Translation3::new(8.0, 4.0, 2.0),
                    UnitQuaternion::from_euler_angles(0.4, 0.7, 0.1),
                );
                let right = box_brush([0.0, 0.0, 0.0], [4.0, 4.0, 4.0]).transformed(&placement);
                let result = join_brushes(&[left.clone(), right.clone()], &JoinParams::default());
                (vec![left, right], OperationResult::from(result))
            }
        };

        info!(
            scene = self.title(),
            success = result.success,
            brushes = result.results.len(),
            "Scene computed"
        );
        SceneOutput {
            input_meshes: inputs.iter().map(Brush::to_triangle_mesh).collect(),
            inputs,
            result,
        }
    }
}

/// Inputs and outcome of one scene.
#[derive(Debug, Clone)]
pub struct SceneOutput {
    pub inputs: Vec<Brush>,
    /// Inputs exported through the triangle-mesh boundary, for wireframes.
    pub input_meshes: Vec<TriangleMesh>,
    pub result: OperationResult,
}

impl SceneOutput {
    pub fn polygon_count(&self) -> usize {
        self.result.results.iter().map(Brush::len).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.result
            .results
            .iter()
            .map(|b| b.to_triangle_mesh().triangle_count())
            .sum()
    }

    /// Bounds of everything the scene draws.
    pub fn bounds(&self) -> Option<Aabb> {
        self.inputs
            .iter()
            .chain(&self.result.results)
            .filter_map(Brush::bounds)
            .reduce(|a, b| a.merged(&b))
    }
}

/// Interactive scene switcher.
pub struct Showcase {
    scene: Scene,
    output: SceneOutput,
    show_inputs: bool,
}

impl Default for Showcase {
    fn default() -> Self {
        Self::new(Scene::Split)
    }
}

impl Showcase {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            output: scene.run(),
            show_inputs: true,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn output(&self) -> &SceneOutput {
        &self.output
    }

    /// Handles scene keys (1-4) and the input toggle (I).
    /// Returns true if a new scene was computed.
    pub fn update(&mut self) -> bool {
        if is_key_pressed(KeyCode::I) {
            self.show_inputs = !self.show_inputs;
        }

        let Some(next) = Scene::ALL.into_iter().find(|s| is_key_pressed(s.key())) else {
            return false;
        };
        if next == self.scene {
            return false;
        }
        self.scene = next;
        self.output = next.run();
        true
    }

    pub fn render(&self) {
        for brush in &self.output.result.results {
            draw_brush(brush);
        }
        if self.show_inputs {
            for mesh in &self.output.input_meshes {
                draw_mesh_wireframe(mesh, Color::from_rgba(200, 200, 200, 120));
            }
        }
    }

    /// Draws the result summary overlay.
    pub fn draw_ui(&self, y_offset: f32) {
        let result = &self.output.result;
        draw_text(self.scene.title(), 10.0, y_offset, 24.0, WHITE);
        draw_text(
            &format!(
                "{} | {} brushes, {} polygons, {} triangles",
                if result.success { "success" } else { "failed" },
                result.results.len(),
                self.output.polygon_count(),
                self.output.triangle_count()
            ),
            10.0,
            y_offset + 22.0,
            18.0,
            if result.success { GREEN } else { ORANGE },
        );
        if !result.error_message.is_empty() {
            draw_text(&result.error_message, 10.0, y_offset + 42.0, 18.0, YELLOW);
        }
        draw_text(
            "[1] Split | [2] Carve | [3] Hollow | [4] Join | [I]nputs",
            10.0,
            y_offset + 62.0,
            16.0,
            DARKGRAY,
        );
    }
}

fn box_brush(center: [f32; 3], size: [f32; 3]) -> Brush {
    Brush::cuboid(
        Vertex::new(center[0], center[1], center[2]),
        Vector3::new(size[0], size[1], size[2]),
    )
}
