use egui::Color32;
use std::time::Duration;

/// 配置中的 `[r, g, b]` 转为 egui 颜色
pub fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// 将时长格式化为 HH:MM:SS
pub fn format_uptime(duration: Duration) -> String {
    let secs = duration.as_secs();
    let hours = secs / 3600;
    let minutes = (secs / 60) % 60;
    let secs = secs % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
