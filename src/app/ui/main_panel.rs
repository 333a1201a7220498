use eframe::egui;

use crate::app::app_core::TiltApp;

pub fn render_main_panel(app: &mut TiltApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // 快捷键说明
        ui.horizontal(|ui| {
            ui.label("Hotkey:");
            ui.colored_label(egui::Color32::from_rgb(0, 150, 0), "ESC / Q");
            ui.label("Quit");

            ui.separator();
            ui.label(format!("Config: {}", app.config.config_path().display()));
            ui.label(format!("Samples: {}", app.state.channels.samples_ingested));
        });

        ui.separator();

        app.state.scene.ui(ui);
    });
}
