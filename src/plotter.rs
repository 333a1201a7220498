use egui::Color32;
use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::config::PlotConfig;
use crate::history::History;
use crate::types::Orientation;
use crate::utils::rgb;

/// 格式化 y 轴角度标签，固定宽度避免坐标轴抖动
fn format_angle_label(value: f64) -> String {
    format!("{:>4.0}°", value)
}

/// 曲线通道
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Pitch,
    Roll,
    Yaw,
}

impl Channel {
    fn label(self) -> &'static str {
        match self {
            Channel::Pitch => "Pitch (°)",
            Channel::Roll => "Roll (°)",
            Channel::Yaw => "Yaw (°)",
        }
    }

    fn value(self, o: &Orientation) -> f64 {
        match self {
            Channel::Pitch => o.pitch,
            Channel::Roll => o.roll,
            Channel::Yaw => o.yaw,
        }
    }

    fn color(self, config: &PlotConfig) -> Color32 {
        match self {
            Channel::Pitch => rgb(config.colors.pitch),
            Channel::Roll => rgb(config.colors.roll),
            Channel::Yaw => rgb(config.colors.yaw),
        }
    }
}

/// 最近姿态样本的滚动折线图
#[derive(Debug)]
pub struct AngleChart {
    history: History<Orientation>,
    channels: Vec<(Channel, Color32)>,
    y_limit: f64,
    height: f32,
    allow_drag: bool,
    allow_zoom: bool,
}

impl AngleChart {
    pub fn new(channels: &[Channel], config: &PlotConfig) -> Self {
        // 带 yaw 时范围放宽到 ±180°
        let y_limit = if channels.contains(&Channel::Yaw) { 180.0 } else { 90.0 };

        Self {
            history: History::new(config.history_capacity),
            channels: channels.iter().map(|&c| (c, c.color(config))).collect(),
            y_limit,
            height: config.chart_height,
            allow_drag: config.allow_drag,
            allow_zoom: config.allow_zoom,
        }
    }

    pub fn add_sample(&mut self, sample: Orientation) {
        self.history.push(sample);
    }

    pub fn latest(&self) -> Option<&Orientation> {
        self.history.latest()
    }

    pub fn ui(&self, ui: &mut egui::Ui, title: &str) {
        ui.heading(title);

        let (x_min, x_max) = self.history.x_range();
        let y_limit = self.y_limit;

        Plot::new(title)
            .height(self.height)
            .legend(Legend::default().position(Corner::RightTop))
            .x_axis_label("Samples")
            .y_axis_label("Angle (°)")
            .y_axis_formatter(|v, _| format_angle_label(v.value))
            .allow_drag(self.allow_drag)
            .allow_zoom(self.allow_zoom)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, -y_limit], [x_max, y_limit]));

                if self.history.is_empty() {
                    return;
                }

                for &(channel, color) in &self.channels {
                    let points = self.history.series(|o| channel.value(o));
                    plot_ui.line(
                        Line::new(channel.label(), PlotPoints::from(points))
                            .color(color)
                            .width(1.5),
                    );
                }
            });
    }
}
