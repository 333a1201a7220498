use serde::{Deserialize, Serialize};

use crate::types::{Orientation, RawAccel, Sample};

/// 串口每行的数据格式
///
/// 固件端直接 `Serial.println` 逗号分隔的十进制数，没有帧头和校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFormat {
    /// `ax,ay,az` 原始加速度计读数
    RawAccel,
    /// 仅 `pitch`
    Pitch,
    /// `pitch,roll`
    PitchRoll,
    /// `pitch,roll,yaw`
    PitchRollYaw,
}

impl SampleFormat {
    /// 每行期望的字段数
    pub fn arity(self) -> usize {
        match self {
            SampleFormat::RawAccel => 3,
            SampleFormat::Pitch => 1,
            SampleFormat::PitchRoll => 2,
            SampleFormat::PitchRollYaw => 3,
        }
    }
}

/// 按指定格式解析一行
///
/// 任何格式错误都返回 `None`，调用方视为本次没有数据
pub fn parse_line(format: SampleFormat, line: &str) -> Option<Sample> {
    match format {
        SampleFormat::RawAccel => parse_raw_accel(line).map(Sample::Raw),
        _ => parse_angles(line, format.arity()).map(Sample::Angles),
    }
}

pub fn parse_raw_accel(line: &str) -> Option<RawAccel> {
    let mut fields = [0i32; 3];
    if !fill_fields(line, &mut fields, parse_int_field) {
        return None;
    }
    Some(RawAccel::new(fields[0], fields[1], fields[2]))
}

/// 解析 1~3 个角度字段，依次为 pitch、roll、yaw
pub fn parse_angles(line: &str, arity: usize) -> Option<Orientation> {
    if !(1..=3).contains(&arity) {
        return None;
    }

    let mut fields = [0f64; 3];
    if !fill_fields(line, &mut fields[..arity], parse_float_field) {
        return None;
    }
    Some(Orientation::new(fields[0], fields[1], fields[2]))
}

fn fill_fields<T>(line: &str, out: &mut [T], parse: fn(&str) -> Option<T>) -> bool {
    let mut count = 0;
    for part in line.trim().split(',') {
        if count == out.len() {
            return false;
        }
        match parse(part.trim()) {
            Some(value) => out[count] = value,
            None => return false,
        }
        count += 1;
    }
    count == out.len()
}

// 只接受可选负号 + 十进制数字，与固件输出一致
fn parse_int_field(field: &str) -> Option<i32> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_float_field(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}
