use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::parser::SampleFormat;
use crate::types::Sample;

pub mod chart;
pub mod game;
pub mod geometry;
pub mod seesaw;
pub mod table;

pub use chart::ChartScene;
pub use game::GameScene;
pub use seesaw::SeesawScene;
pub use table::TableScene;

/// 可选的显示场景，每种场景对应一种串口数据格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// 倾斜控制小球吃金币
    Game,
    /// 单条 pitch 曲线
    Pitch,
    /// pitch/roll 曲线 + 跷跷板
    Seesaw,
    /// pitch/roll 曲线 + 3D 桌子
    Table,
    /// pitch/roll/yaw 曲线 + 3D 桌子
    TableYaw,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::Game,
        SceneKind::Pitch,
        SceneKind::Seesaw,
        SceneKind::Table,
        SceneKind::TableYaw,
    ];

    pub fn sample_format(self) -> SampleFormat {
        match self {
            SceneKind::Game => SampleFormat::RawAccel,
            SceneKind::Pitch => SampleFormat::Pitch,
            SceneKind::Seesaw | SceneKind::Table => SampleFormat::PitchRoll,
            SceneKind::TableYaw => SampleFormat::PitchRollYaw,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Game => "game",
            SceneKind::Pitch => "pitch",
            SceneKind::Seesaw => "seesaw",
            SceneKind::Table => "table",
            SceneKind::TableYaw => "table_yaw",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SceneKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = SceneKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown scene '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// 样本流的一种显示方式
///
/// 帧循环对本 tick 取出的每个样本调用 `ingest`，随后调用一次 `tick`，每次重绘调用 `ui`
pub trait Scene {
    fn ingest(&mut self, sample: &Sample);

    fn tick(&mut self, now: Instant);

    fn ui(&mut self, ui: &mut egui::Ui);

    /// 状态栏上显示的简短摘要
    fn summary(&self) -> String;
}

pub fn build_scene(config: &AppConfig, started: Instant) -> Box<dyn Scene> {
    match config.scene.kind {
        SceneKind::Game => Box::new(GameScene::new(&config.game, started)),
        SceneKind::Pitch => Box::new(ChartScene::new(config.scene.kind, &config.plot)),
        SceneKind::Seesaw => Box::new(SeesawScene::new(&config.plot)),
        SceneKind::Table | SceneKind::TableYaw => Box::new(TableScene::new(config.scene.kind, &config.plot)),
    }
}
