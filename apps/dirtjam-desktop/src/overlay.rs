use dirtjam_common::{DrawMode, ShadingMode, ShadingParams};
use dirtjam_render::Scene;
use egui::Context as EguiContext;

/// Upper end of the smoothness slider, per second. Kept below `1 / MAX_FRAME_DT`
/// so a capped frame never reaches a smoothing step of 1, which would snap the
/// eye onto its target.
pub const MAX_SMOOTHNESS: f32 = 9.5;

/// Tuning overlay: shading parameters, draw mode and camera feel.
pub fn draw(ctx: &EguiContext, scene: &mut Scene) {
    if !scene.show_overlay {
        return;
    }

    egui::Window::new("Dirt Jam")
        .default_pos([10.0, 10.0])
        .default_width(400.0)
        .resizable(false)
        .show(ctx, |ui| {
            let mut wireframe = scene.draw_mode.is_wireframe();
            if ui.checkbox(&mut wireframe, "Wireframe").changed() {
                scene.draw_mode = DrawMode::from_wireframe(wireframe);
                tracing::debug!(mode = scene.draw_mode.label(), "draw mode changed");
            }

            ui.separator();
            ui.heading("Terrain");
            ui.horizontal(|ui| {
                ui.label("Low color");
                ui.color_edit_button_rgba_unmultiplied(&mut scene.shading.low_color);
                ui.label("High color");
                ui.color_edit_button_rgba_unmultiplied(&mut scene.shading.high_color);
            });
            ui.add(egui::Slider::new(&mut scene.shading.amplitude, 0.0..=3.0).text("Amplitude"));
            ui.add(
                egui::Slider::new(&mut scene.shading.frequency, 0.01..=2.0)
                    .logarithmic(true)
                    .text("Frequency"),
            );
            ui.add(
                egui::Slider::new(&mut scene.shading.octaves, 1..=ShadingParams::MAX_OCTAVES)
                    .text("Octaves"),
            );
            egui::ComboBox::from_label("Shading")
                .selected_text(scene.shading.mode.label())
                .show_ui(ui, |ui| {
                    for mode in ShadingMode::ALL {
                        ui.selectable_value(&mut scene.shading.mode, mode, mode.label());
                    }
                });

            ui.separator();
            ui.heading("Camera");
            ui.add(egui::Slider::new(&mut scene.camera.speed, 0.5..=20.0).text("Speed"));
            ui.add(
                egui::Slider::new(&mut scene.camera.smoothness, 1.0..=MAX_SMOOTHNESS)
                    .text("Smoothness"),
            );
            let p = scene.camera.position();
            ui.label(format!(
                "Position: ({:.2}, {:.2}, {:.2})  yaw {:.1}  pitch {:.1}",
                p.x,
                p.y,
                p.z,
                scene.camera.yaw(),
                scene.camera.pitch()
            ));
            ui.label(format!(
                "Vertices: {}  Indices: {}  Mouse look: {}",
                scene.vertex_count(),
                scene.index_count(),
                if scene.camera.is_pointer_locked() { "on" } else { "off" }
            ));

            ui.separator();
            ui.small("Space: toggle mouse look | WASD: move | F1: overlay | Esc: quit");
        });
}
