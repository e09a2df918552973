use brush_csg::{Brush, Vertex, carve_brush_by_cutters};
use brush_viz::{OrbitCamera, draw_axes, draw_brush, draw_mesh_wireframe};
use macroquad::prelude::*;
use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};
use tracing::info;

const NUM_CUTTERS: usize = 8;
const RING_RADIUS: f32 = 12.0;
const SLAB_SIZE: [f32; 3] = [36.0, 4.0, 36.0];
const MIN_CUTTER_SIZE: f32 = 3.0;
const MAX_CUTTER_SIZE: f32 = 6.0;

/// Simple seeded random number generator (LCG).
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.state >> 40) as f32) / ((1u64 << 24) as f32)
    }

    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Cubes spaced around a ring in the slab's plane, each randomly tilted.
fn ring_of_cutters(seed: u64) -> Vec<Brush> {
    let mut rng = Rng::new(seed);
    (0..NUM_CUTTERS)
        .map(|i| {
            let angle = i as f32 / NUM_CUTTERS as f32 * std::f32::consts::TAU;
            let size = rng.range(MIN_CUTTER_SIZE, MAX_CUTTER_SIZE);
            let axis = Vector3::new(
                rng.next_f32() - 0.5,
                rng.next_f32() - 0.5,
                rng.next_f32() - 0.5,
            );
            let axis = Unit::try_new(axis, 0.01).unwrap_or(Vector3::y_axis());
            let tilt = rng.next_f32() * std::f32::consts::TAU;

            let placement = Isometry3::from_parts(
                Translation3::new(RING_RADIUS * angle.cos(), 0.0, RING_RADIUS * angle.sin()),
                UnitQuaternion::from_axis_angle(&axis, tilt),
            );
            Brush::cuboid(Vertex::origin(), Vector3::new(size, size * 3.0, size))
                .transformed(&placement)
        })
        .collect()
}

#[macroquad::main("Brush CSG Carve Ring")]
async fn main() {
    tracing_subscriber::fmt::init();

    let slab = Brush::cuboid(Vertex::origin(), Vector3::from(SLAB_SIZE));
    let cutters = ring_of_cutters(42);
    let fragments = carve_brush_by_cutters(&slab, &cutters);
    let polygon_count: usize = fragments.iter().map(Brush::len).sum();
    info!(
        cutters = cutters.len(),
        fragments = fragments.len(),
        polygons = polygon_count,
        "Carved ring"
    );

    let cutter_meshes: Vec<_> = cutters.iter().map(Brush::to_triangle_mesh).collect();
    let mut camera = OrbitCamera::new(55.0, 0.0, 0.6).with_zoom(3.0, 10.0, 150.0);
    let mut show_cutters = true;

    loop {
        camera.update();
        if is_key_pressed(KeyCode::C) {
            show_cutters = !show_cutters;
        }

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera.to_camera3d());

        for fragment in &fragments {
            draw_brush(fragment);
        }
        if show_cutters {
            for mesh in &cutter_meshes {
                draw_mesh_wireframe(mesh, Color::from_rgba(255, 120, 80, 160));
            }
        }
        draw_axes(8.0);

        set_default_camera();

        draw_text(
            &format!("Carve ring - {} cutters", cutters.len()),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!("Fragments: {} | Polygons: {}", fragments.len(), polygon_count),
            10.0,
            45.0,
            18.0,
            GRAY,
        );
        draw_text("[C]utters | drag mouse to rotate, scroll to zoom", 10.0, 70.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 90.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
