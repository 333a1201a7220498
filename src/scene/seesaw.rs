use std::time::Instant;

use eframe::egui::{self, pos2, Color32, Sense, Shape, Stroke};

use super::chart::{channels_for, chart_title, describe_latest};
use super::{Scene, SceneKind};
use crate::config::PlotConfig;
use crate::plotter::AngleChart;
use crate::types::Sample;
use crate::utils::rgb;

const BAR_HALF_LENGTH: f32 = 1.5;
const BAR_HALF_HEIGHT: f32 = 0.1;
// 绘图区域的世界坐标范围
const VIEW_HALF_WIDTH: f32 = 2.0;
const VIEW_HALF_HEIGHT: f32 = 1.2;

/// 跷跷板绕中心逆时针旋转 `angle_deg` 度后的四个角（世界坐标，y 向上）
pub fn bar_corners(angle_deg: f64) -> [[f32; 2]; 4] {
    let (s, c) = (angle_deg as f32).to_radians().sin_cos();
    [
        [-BAR_HALF_LENGTH, -BAR_HALF_HEIGHT],
        [BAR_HALF_LENGTH, -BAR_HALF_HEIGHT],
        [BAR_HALF_LENGTH, BAR_HALF_HEIGHT],
        [-BAR_HALF_LENGTH, BAR_HALF_HEIGHT],
    ]
    .map(|[x, y]| [x * c - y * s, x * s + y * c])
}

/// pitch/roll 曲线加上随最新 pitch 倾斜的跷跷板
pub struct SeesawScene {
    chart: AngleChart,
    color: Color32,
    angle: f64,
}

impl SeesawScene {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            chart: AngleChart::new(channels_for(SceneKind::Seesaw), config),
            color: rgb(config.colors.seesaw),
            angle: 0.0,
        }
    }
}

impl Scene for SeesawScene {
    fn ingest(&mut self, sample: &Sample) {
        if let Some(angles) = sample.as_angles() {
            self.chart.add_sample(*angles);
        }
    }

    fn tick(&mut self, _now: Instant) {
        if let Some(latest) = self.chart.latest() {
            self.angle = latest.pitch;
        }
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        self.chart.ui(ui, chart_title(SceneKind::Seesaw));
        ui.separator();
        ui.heading("Pitch-driven Tilt");

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let rect = response.rect;
        // 等比例缩放
        let scale = (rect.width() / (2.0 * VIEW_HALF_WIDTH)).min(rect.height() / (2.0 * VIEW_HALF_HEIGHT));
        let center = rect.center();

        let points = bar_corners(self.angle)
            .iter()
            .map(|[x, y]| pos2(center.x + x * scale, center.y - y * scale))
            .collect();
        painter.add(Shape::convex_polygon(points, self.color, Stroke::new(1.0, Color32::BLACK)));
        painter.circle_filled(center, 3.0, Color32::BLACK);
    }

    fn summary(&self) -> String {
        describe_latest(SceneKind::Seesaw, self.chart.latest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;

    fn close(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-5 && (a[1] - b[1]).abs() < 1e-5
    }

    #[test]
    fn level_bar_is_unrotated() {
        let corners = bar_corners(0.0);
        assert_eq!(corners[1], [1.5, -0.1]);
        assert_eq!(corners[3], [-1.5, 0.1]);
    }

    #[test]
    fn positive_pitch_raises_the_right_end() {
        let corners = bar_corners(90.0);
        assert!(close(corners[1], [0.1, 1.5]));
        assert!(close(corners[3], [-0.1, -1.5]));
    }

    #[test]
    fn tick_follows_latest_pitch() {
        let mut scene = SeesawScene::new(&PlotConfig::default());
        scene.ingest(&Sample::Angles(Orientation::new(10.0, 5.0, 0.0)));
        scene.ingest(&Sample::Angles(Orientation::new(-20.0, 5.0, 0.0)));
        scene.tick(Instant::now());
        assert_eq!(scene.angle, -20.0);
    }
}
