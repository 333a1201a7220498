use glam::{Mat3, Vec3};

/// 由姿态角（度）构造旋转矩阵：pitch 绕 X，roll 绕 Y，yaw 绕 Z
///
/// 顶点依次经过 pitch、roll、yaw 旋转，即 `Rz(yaw) * Ry(roll) * Rx(pitch)`
pub fn attitude_rotation(pitch: f64, roll: f64, yaw: f64) -> Mat3 {
    let p = (pitch as f32).to_radians();
    let r = (roll as f32).to_radians();
    let y = (yaw as f32).to_radians();
    Mat3::from_rotation_z(y) * Mat3::from_rotation_y(r) * Mat3::from_rotation_x(p)
}

/// 长方体 8 个顶点到 6 个四边形面的索引：底、顶、四个侧面
pub const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [1, 2, 6, 5],
    [0, 3, 7, 4],
];

pub const FACE_BOTTOM: usize = 0;
pub const FACE_TOP: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Tabletop,
    Leg,
}

/// 由 8 个顶点表示的长方体，先底面四点再顶面四点
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    pub part: Part,
    pub vertices: [Vec3; 8],
}

impl Cuboid {
    fn from_bounds(part: Part, min: Vec3, max: Vec3) -> Self {
        let ring = |z: f32| {
            [
                Vec3::new(min.x, min.y, z),
                Vec3::new(max.x, min.y, z),
                Vec3::new(max.x, max.y, z),
                Vec3::new(min.x, max.y, z),
            ]
        };
        let [b0, b1, b2, b3] = ring(min.z);
        let [t0, t1, t2, t3] = ring(max.z);
        Self {
            part,
            vertices: [b0, b1, b2, b3, t0, t1, t2, t3],
        }
    }

    pub fn face(&self, face: usize) -> [Vec3; 4] {
        BOX_FACES[face].map(|i| self.vertices[i])
    }

    pub fn rotated(&self, rotation: &Mat3) -> Self {
        Self {
            part: self.part,
            vertices: self.vertices.map(|v| *rotation * v),
        }
    }
}

/// 桌子尺寸
#[derive(Debug, Clone, Copy)]
pub struct TableDims {
    pub width: f32,
    pub depth: f32,
    pub thickness: f32,
    pub leg_height: f32,
    pub leg_width: f32,
}

impl Default for TableDims {
    fn default() -> Self {
        Self {
            width: 4.0,
            depth: 2.0,
            thickness: 0.2,
            leg_height: 0.8,
            leg_width: 0.15,
        }
    }
}

/// 以原点为中心的桌面和四角的四条桌腿
///
/// 只构建一次，每帧通过 [`TableMesh::rotated`] 生成旋转后的副本
#[derive(Debug, Clone, PartialEq)]
pub struct TableMesh {
    pub parts: Vec<Cuboid>,
}

impl TableMesh {
    pub fn new(dims: TableDims) -> Self {
        let TableDims {
            width: w,
            depth: d,
            thickness: h,
            leg_height,
            leg_width,
        } = dims;

        let mut parts = vec![Cuboid::from_bounds(
            Part::Tabletop,
            Vec3::new(-w / 2., -d / 2., -h / 2.),
            Vec3::new(w / 2., d / 2., h / 2.),
        )];

        let half = leg_width / 2.;
        for x in [-w / 2. + half, w / 2. - half] {
            for y in [-d / 2. + half, d / 2. - half] {
                parts.push(Cuboid::from_bounds(
                    Part::Leg,
                    Vec3::new(x - half, y - half, -h / 2. - leg_height),
                    Vec3::new(x + half, y + half, -h / 2.),
                ));
            }
        }

        Self { parts }
    }

    pub fn rotated(&self, rotation: &Mat3) -> Self {
        Self {
            parts: self.parts.iter().map(|p| p.rotated(rotation)).collect(),
        }
    }
}

impl Default for TableMesh {
    fn default() -> Self {
        Self::new(TableDims::default())
    }
}
