use std::time::Instant;

use eframe::egui::{self, Sense};
use glam::Mat3;

use super::chart::{channels_for, chart_title, describe_latest};
use super::geometry::{attitude_rotation, TableMesh};
use super::{Scene, SceneKind};
use crate::config::PlotConfig;
use crate::plotter::AngleChart;
use crate::render3d::{paint_faces, project_mesh, Camera};
use crate::types::{Orientation, Sample};

// 视图需容纳的世界坐标半宽
const VIEW_EXTENT: f32 = 2.5;

/// 角度曲线加上跟随最新姿态旋转的 3D 桌子
pub struct TableScene {
    kind: SceneKind,
    chart: AngleChart,
    camera: Camera,
    mesh: TableMesh,
    rotated: TableMesh,
}

impl TableScene {
    pub fn new(kind: SceneKind, config: &PlotConfig) -> Self {
        let mesh = TableMesh::default();
        Self {
            kind,
            chart: AngleChart::new(channels_for(kind), config),
            camera: Camera::default(),
            rotated: mesh.clone(),
            mesh,
        }
    }

    fn rotation(&self, latest: &Orientation) -> Mat3 {
        let yaw = if self.kind == SceneKind::TableYaw { latest.yaw } else { 0.0 };
        attitude_rotation(latest.pitch, latest.roll, yaw)
    }

    fn heading(&self) -> &'static str {
        if self.kind == SceneKind::TableYaw {
            "3D Pitch, Roll & Yaw-driven Table"
        } else {
            "3D Pitch & Roll-driven Table"
        }
    }
}

impl Scene for TableScene {
    fn ingest(&mut self, sample: &Sample) {
        if let Some(angles) = sample.as_angles() {
            self.chart.add_sample(*angles);
        }
    }

    fn tick(&mut self, _now: Instant) {
        let rotation = match self.chart.latest() {
            Some(latest) => self.rotation(latest),
            None => Mat3::IDENTITY,
        };
        self.rotated = self.mesh.rotated(&rotation);
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        self.chart.ui(ui, chart_title(self.kind));
        ui.separator();
        ui.heading(self.heading());

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let faces = project_mesh(&self.rotated, &self.camera, response.rect, VIEW_EXTENT);
        paint_faces(&painter, faces);
    }

    fn summary(&self) -> String {
        describe_latest(self.kind, self.chart.latest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_without_samples_stays_level() {
        let mut scene = TableScene::new(SceneKind::Table, &PlotConfig::default());
        scene.tick(Instant::now());
        assert_eq!(scene.rotated, scene.mesh);
    }

    #[test]
    fn table_ignores_yaw_unless_requested() {
        let sample = Sample::Angles(Orientation::new(10.0, -20.0, 45.0));

        let mut level = TableScene::new(SceneKind::Table, &PlotConfig::default());
        level.ingest(&sample);
        level.tick(Instant::now());
        let expected = TableMesh::default().rotated(&attitude_rotation(10.0, -20.0, 0.0));
        assert_eq!(level.rotated, expected);

        let mut yawed = TableScene::new(SceneKind::TableYaw, &PlotConfig::default());
        yawed.ingest(&sample);
        yawed.tick(Instant::now());
        let expected = TableMesh::default().rotated(&attitude_rotation(10.0, -20.0, 45.0));
        assert_eq!(yawed.rotated, expected);
    }

    #[test]
    fn rotation_does_not_accumulate() {
        let mut scene = TableScene::new(SceneKind::Table, &PlotConfig::default());
        let sample = Sample::Angles(Orientation::new(30.0, 0.0, 0.0));
        for _ in 0..5 {
            scene.ingest(&sample);
            scene.tick(Instant::now());
        }
        let expected = TableMesh::default().rotated(&attitude_rotation(30.0, 0.0, 0.0));
        assert_eq!(scene.rotated, expected);
        assert_eq!(scene.summary(), "Pitch 30.0°  Roll 0.0°");
    }
}
