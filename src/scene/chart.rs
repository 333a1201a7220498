use std::time::Instant;

use eframe::egui;

use super::{Scene, SceneKind};
use crate::config::PlotConfig;
use crate::plotter::{AngleChart, Channel};
use crate::types::{Orientation, Sample};

/// 各场景显示的曲线通道
pub fn channels_for(kind: SceneKind) -> &'static [Channel] {
    match kind {
        SceneKind::Game => &[],
        SceneKind::Pitch => &[Channel::Pitch],
        SceneKind::Seesaw | SceneKind::Table => &[Channel::Pitch, Channel::Roll],
        SceneKind::TableYaw => &[Channel::Pitch, Channel::Roll, Channel::Yaw],
    }
}

pub fn chart_title(kind: SceneKind) -> &'static str {
    match kind {
        SceneKind::Pitch => "MPU6050 Pitch Visualization (2D)",
        SceneKind::TableYaw => "MPU6050 Pitch (Y), Roll (X), Yaw (Z)",
        _ => "MPU6050 Pitch (Y) & Roll (X)",
    }
}

/// 最新姿态的简短文本
pub fn describe_latest(kind: SceneKind, latest: Option<&Orientation>) -> String {
    let Some(o) = latest else {
        return "No samples yet".to_string();
    };
    match kind {
        SceneKind::Pitch => format!("Pitch {:.1}°", o.pitch),
        SceneKind::TableYaw => format!("Pitch {:.1}°  Roll {:.1}°  Yaw {:.1}°", o.pitch, o.roll, o.yaw),
        _ => format!("Pitch {:.1}°  Roll {:.1}°", o.pitch, o.roll),
    }
}

/// 纯角度曲线场景
pub struct ChartScene {
    kind: SceneKind,
    chart: AngleChart,
}

impl ChartScene {
    pub fn new(kind: SceneKind, config: &PlotConfig) -> Self {
        Self {
            kind,
            chart: AngleChart::new(channels_for(kind), config),
        }
    }
}

impl Scene for ChartScene {
    fn ingest(&mut self, sample: &Sample) {
        if let Some(angles) = sample.as_angles() {
            self.chart.add_sample(*angles);
        }
    }

    fn tick(&mut self, _now: Instant) {}

    fn ui(&mut self, ui: &mut egui::Ui) {
        self.chart.ui(ui, chart_title(self.kind));
    }

    fn summary(&self) -> String {
        describe_latest(self.kind, self.chart.latest())
    }
}
