use eframe::egui;
use log::info;

use super::app_core::TiltApp;

impl TiltApp {
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        // Esc 或 Q 键关闭窗口
        let quit = ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Q));
        if quit {
            info!("Quit requested from keyboard after {} ticks", self.state.frame_clock.ticks());
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
