use brush_viz::{OrbitCamera, Showcase, draw_axes};
use macroquad::prelude::*;

#[macroquad::main("Brush CSG Showcase")]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut showcase = Showcase::default();
    let mut camera = OrbitCamera::new(45.0, 0.6, 0.4).with_zoom(3.0, 10.0, 150.0);
    if let Some(bounds) = showcase.output().bounds() {
        camera.frame(&bounds);
    }

    loop {
        camera.update();
        if showcase.update() {
            if let Some(bounds) = showcase.output().bounds() {
                camera.frame(&bounds);
            }
        }

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera.to_camera3d());

        showcase.render();
        draw_axes(8.0);

        set_default_camera();

        showcase.draw_ui(25.0);
        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 115.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 135.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
