/// 原始加速度计读数（传感器原生整数单位，未校准）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RawAccel {
    pub ax: i32,
    pub ay: i32,
    pub az: i32,
}

impl RawAccel {
    pub fn new(ax: i32, ay: i32, az: i32) -> Self {
        Self { ax, ay, az }
    }
}

/// 姿态角（单位：度）
///
/// 线路格式中缺失的字段按 0 处理，例如只发送 pitch 的固件
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Orientation {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

impl Orientation {
    pub fn new(pitch: f64, roll: f64, yaw: f64) -> Self {
        Self { pitch, roll, yaw }
    }
}

/// 解析后的一行串口数据
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    Raw(RawAccel),
    Angles(Orientation),
}

impl Sample {
    pub fn as_raw(&self) -> Option<&RawAccel> {
        match self {
            Sample::Raw(raw) => Some(raw),
            Sample::Angles(_) => None,
        }
    }

    pub fn as_angles(&self) -> Option<&Orientation> {
        match self {
            Sample::Angles(angles) => Some(angles),
            Sample::Raw(_) => None,
        }
    }
}
