use egui::{pos2, Color32, Painter, Pos2, Rect, Shape, Stroke};
use glam::Vec3;

use crate::scene::geometry::{Part, TableMesh, BOX_FACES, FACE_BOTTOM, FACE_TOP};

// 面的透明度，与 alpha=0.9 对应
const FACE_ALPHA: u8 = 230;

/// 看向原点的固定正交相机
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// 指向观察者的单位向量
    toward_eye: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// `elevation` 为相对 XY 平面的仰角，`azimuth` 为绕 Z 轴的方位角，单位为度
    pub fn new(elevation_deg: f32, azimuth_deg: f32) -> Self {
        let (se, ce) = elevation_deg.to_radians().sin_cos();
        let (sa, ca) = azimuth_deg.to_radians().sin_cos();
        Self {
            toward_eye: Vec3::new(ce * ca, ce * sa, se),
            right: Vec3::new(-sa, ca, 0.),
            up: Vec3::new(-se * ca, -se * sa, ce),
        }
    }

    fn screen(&self, v: Vec3) -> (f32, f32) {
        (v.dot(self.right), v.dot(self.up))
    }

    /// 越大离观察者越近
    fn depth(&self, v: Vec3) -> f32 {
        v.dot(self.toward_eye)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(30., -60.)
    }
}

#[derive(Debug, Clone)]
pub struct ProjectedFace {
    pub points: Vec<Pos2>,
    pub depth: f32,
    pub fill: Color32,
}

fn face_color(part: Part, face: usize) -> Color32 {
    let [r, g, b] = match (part, face) {
        (Part::Tabletop, FACE_BOTTOM) => [255, 0, 0],
        (Part::Tabletop, FACE_TOP) => [173, 216, 230],
        (Part::Tabletop, _) => [128, 128, 128],
        (Part::Leg, _) => [105, 105, 105],
    };
    Color32::from_rgba_unmultiplied(r, g, b, FACE_ALPHA)
}

/// 将所有面投影到 `rect` 中并按由远到近排序（画家算法）
///
/// `extent` 为需要完整显示的世界坐标半宽
pub fn project_mesh(mesh: &TableMesh, camera: &Camera, rect: Rect, extent: f32) -> Vec<ProjectedFace> {
    let scale = rect.width().min(rect.height()) / (2.0 * extent);
    let center = rect.center();

    let mut faces: Vec<ProjectedFace> = mesh
        .parts
        .iter()
        .flat_map(|cuboid| {
            (0..BOX_FACES.len()).map(move |face| {
                let corners = cuboid.face(face);
                let centroid = (corners[0] + corners[1] + corners[2] + corners[3]) * 0.25;
                let points = corners
                    .iter()
                    .map(|&v| {
                        let (x, y) = camera.screen(v);
                        // 屏幕坐标 y 轴向下
                        pos2(center.x + x * scale, center.y - y * scale)
                    })
                    .collect();
                ProjectedFace {
                    points,
                    depth: camera.depth(centroid),
                    fill: face_color(cuboid.part, face),
                }
            })
        })
        .collect();

    faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    faces
}

pub fn paint_faces(painter: &Painter, faces: Vec<ProjectedFace>) {
    let stroke = Stroke::new(1.0, Color32::BLACK);
    for face in faces {
        painter.add(Shape::convex_polygon(face.points, face.fill, stroke));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::geometry::attitude_rotation;
    use egui::vec2;

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(400., 300.))
    }

    #[test]
    fn every_face_is_projected_back_to_front() {
        let faces = project_mesh(&TableMesh::default(), &Camera::default(), rect(), 2.5);
        assert_eq!(faces.len(), 5 * 6);
        assert!(faces.windows(2).all(|w| w[0].depth <= w[1].depth));
        assert!(faces.iter().all(|f| f.points.len() == 4));
    }

    #[test]
    fn top_view_draws_tabletop_top_last() {
        let camera = Camera::new(90., -60.);
        let faces = project_mesh(&TableMesh::default(), &camera, rect(), 2.5);
        let top = face_color(Part::Tabletop, FACE_TOP);
        assert_eq!(faces.last().map(|f| f.fill), Some(top));
    }

    #[test]
    fn flipped_table_shows_its_bottom() {
        let mesh = TableMesh::default().rotated(&attitude_rotation(180., 0., 0.));
        let camera = Camera::new(90., -60.);
        let faces = project_mesh(&mesh, &camera, rect(), 2.5);
        // 翻转后桌腿朝上，最靠近观察者的是桌腿底面
        assert_eq!(faces.last().map(|f| f.fill), Some(face_color(Part::Leg, FACE_BOTTOM)));
    }

    #[test]
    fn projected_points_stay_inside_rect() {
        let r = rect();
        let faces = project_mesh(&TableMesh::default(), &Camera::default(), r, 2.5);
        for face in &faces {
            assert!(face.points.iter().all(|p| r.contains(*p)), "{:?}", face.points);
        }
    }
}
