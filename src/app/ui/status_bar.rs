use eframe::egui;

use crate::app::app_core::TiltApp;
use crate::utils::format_uptime;

pub fn render_status_bar(app: &mut TiltApp, ctx: &egui::Context) {
    let link = app.state.link.stats.snapshot();

    egui::TopBottomPanel::top("status_bar")
        .min_height(40.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Status:");

                let (status_text, status_color) = if link.connected {
                    ("Connected", egui::Color32::from_rgb(0, 150, 0)) // 绿色
                } else {
                    ("Disconnected", egui::Color32::from_rgb(150, 0, 0)) // 红色
                };
                ui.colored_label(status_color, status_text);

                ui.separator();
                ui.label(format!("{} @ {} baud", app.state.link.port_name, app.state.link.baud_rate));

                ui.separator();
                ui.label(format!("Scene: {}", app.state.scene_kind));

                ui.separator();
                ui.label(format!("Lines: {}", link.lines_read));

                // 只有出现异常时才显示告警计数
                if link.malformed_lines > 0 {
                    ui.colored_label(
                        egui::Color32::from_rgb(255, 165, 0), // 橙色
                        format!("Malformed: {}", link.malformed_lines),
                    );
                }
                if link.dropped_samples > 0 {
                    ui.colored_label(
                        egui::Color32::from_rgb(255, 165, 0),
                        format!("Dropped: {}", link.dropped_samples),
                    );
                }

                ui.separator();
                ui.label(app.state.scene.summary());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Uptime {}", format_uptime(app.state.uptime())));
                });
            });
            ui.add_space(5.0);
        });
}
