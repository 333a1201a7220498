use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scene::SceneKind;

/// 应用配置管理模块
/// 集中管理所有配置项，提供默认值、环境变量覆盖和配置验证

pub const ENV_CONFIG_PATH: &str = "TILTHUB_CONFIG";
pub const ENV_PORT: &str = "TILTHUB_PORT";
pub const ENV_BAUD: &str = "TILTHUB_BAUD";
pub const ENV_SCENE: &str = "TILTHUB_SCENE";
pub const DEFAULT_CONFIG_PATH: &str = "tilthub.toml";

/// 主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub serial: SerialConfig,
    pub scene: SceneConfig,
    pub plot: PlotConfig,
    pub game: GameConfig,
    pub channels: ChannelConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
    pub hardware_acceleration: bool,
    /// 固定刷新间隔，状态每个间隔最多推进一次
    pub frame_interval_ms: u64,
}

/// 串口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,
    /// 打开串口后等待开发板复位完成
    pub settle_delay_ms: u64,
}

/// 场景选择
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub kind: SceneKind,
}

/// 绘图配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub history_capacity: usize,
    pub samples_per_tick: usize,
    pub chart_height: f32,
    pub allow_drag: bool,
    pub allow_zoom: bool,
    pub colors: PlotColors,
}

/// 绘图颜色配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotColors {
    pub pitch: [u8; 3],
    pub roll: [u8; 3],
    pub yaw: [u8; 3],
    pub seesaw: [u8; 3],
}

/// 小球吃金币游戏配置
///
/// `winning_score = 0` 表示不设目标分数，`time_limit_secs = 0` 表示不限时
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ball_radius: f32,
    pub coin_radius: f32,
    pub step: f32,
    pub dead_zone: i32,
    pub winning_score: u32,
    pub time_limit_secs: f64,
    pub samples_per_tick: usize,
    pub colors: GameColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameColors {
    pub background: [u8; 3],
    pub ball: [u8; 3],
    pub coin: [u8; 3],
    pub text: [u8; 3],
    pub win: [u8; 3],
    pub lose: [u8; 3],
}

/// 通道配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub sample_channel_capacity: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 720.0,
            title: "TiltHub - MPU6050 Viewer".to_string(),
            resizable: true,
            vsync: true,
            hardware_acceleration: true,
            frame_interval_ms: 30,
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port().to_string(),
            baud_rate: 115200,
            timeout_ms: 1000,
            settle_delay_ms: 2000,
        }
    }
}

fn default_port() -> &'static str {
    if cfg!(windows) {
        "COM10"
    } else {
        "/dev/ttyUSB0"
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            kind: SceneKind::Table,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            history_capacity: 200,
            samples_per_tick: 5,
            chart_height: 260.0,
            allow_drag: false,
            allow_zoom: false,
            colors: PlotColors::default(),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            pitch: [31, 119, 180],  // 蓝色
            roll: [255, 127, 14],   // 橙色
            yaw: [44, 160, 44],     // 绿色
            seesaw: [31, 119, 180],
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            ball_radius: 25.0,
            coin_radius: 15.0,
            step: 5.0,
            dead_zone: 2000,
            winning_score: 10,
            time_limit_secs: 60.0,
            samples_per_tick: 1,
            colors: GameColors::default(),
        }
    }
}

impl Default for GameColors {
    fn default() -> Self {
        Self {
            background: [30, 30, 30],
            ball: [0, 255, 0],
            coin: [255, 255, 0],
            text: [255, 255, 255],
            win: [0, 255, 0],
            lose: [255, 0, 0],
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            sample_channel_capacity: 256,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// 用环境变量覆盖串口和场景设置
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.serial.port = port;
        }
        if let Some(baud) = lookup(ENV_BAUD) {
            self.serial.baud_rate = baud.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("{} is not a valid baud rate: {}", ENV_BAUD, baud))
            })?;
        }
        if let Some(scene) = lookup(ENV_SCENE) {
            self.scene.kind = scene.parse().map_err(ConfigError::ValidationError)?;
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN 与任何数比较都为 false，必须先检查有限性
        let floats = [
            ("window.width", self.window.width),
            ("window.height", self.window.height),
            ("plot.chart_height", self.plot.chart_height),
            ("game.canvas_width", self.game.canvas_width),
            ("game.canvas_height", self.game.canvas_height),
            ("game.ball_radius", self.game.ball_radius),
            ("game.coin_radius", self.game.coin_radius),
            ("game.step", self.game.step),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::ValidationError(format!("{} must be a finite number", name)));
        }

        if self.plot.chart_height <= 0.0 {
            return Err(ConfigError::ValidationError("Chart height must be positive".to_string()));
        }

        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError("Window dimensions must be positive".to_string()));
        }

        if self.window.frame_interval_ms == 0 {
            return Err(ConfigError::ValidationError("Frame interval must be positive".to_string()));
        }

        if self.serial.port.trim().is_empty() {
            return Err(ConfigError::ValidationError("Serial port must not be empty".to_string()));
        }

        if self.serial.baud_rate == 0 {
            return Err(ConfigError::ValidationError("Baud rate must be positive".to_string()));
        }

        let game = &self.game;
        if game.canvas_width <= 0.0 || game.canvas_height <= 0.0 {
            return Err(ConfigError::ValidationError("Canvas dimensions must be positive".to_string()));
        }

        let half_min = game.canvas_width.min(game.canvas_height) / 2.0;
        for (name, radius) in [("Ball", game.ball_radius), ("Coin", game.coin_radius)] {
            if radius <= 0.0 || radius >= half_min {
                return Err(ConfigError::ValidationError(format!(
                    "{} radius must be positive and smaller than half the canvas",
                    name
                )));
            }
        }

        if game.step <= 0.0 {
            return Err(ConfigError::ValidationError("Ball step must be positive".to_string()));
        }

        if game.dead_zone < 0 {
            return Err(ConfigError::ValidationError("Dead zone must not be negative".to_string()));
        }

        if game.time_limit_secs < 0.0 || !game.time_limit_secs.is_finite() {
            return Err(ConfigError::ValidationError("Time limit must be a non-negative number".to_string()));
        }

        if self.plot.samples_per_tick == 0 {
            return Err(ConfigError::ValidationError("Samples per tick must be positive".to_string()));
        }

        // 游戏每帧只消费一个读数
        if game.samples_per_tick != 1 {
            return Err(ConfigError::ValidationError("Game samples per tick must be 1".to_string()));
        }

        if self.plot.history_capacity == 0 {
            return Err(ConfigError::ValidationError("History capacity must be positive".to_string()));
        }

        if self.channels.sample_channel_capacity == 0 {
            return Err(ConfigError::ValidationError("Sample channel capacity must be positive".to_string()));
        }

        Ok(())
    }

    /// 当前场景每个 tick 最多消费的样本数
    pub fn samples_per_tick(&self) -> usize {
        match self.scene.kind {
            SceneKind::Game => self.game.samples_per_tick,
            _ => self.plot.samples_per_tick,
        }
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 配置管理器
pub struct ConfigManager {
    config: AppConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    /// 按 `TILTHUB_CONFIG` 定位配置文件，文件不存在时写出一份默认配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut manager = Self::load_or_default(path)?;
        manager.config.apply_env_overrides()?;
        manager.config.validate()?;
        Ok(manager)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("Loading config from {}", path.display());
            return Ok(Self {
                config: AppConfig::load_from_file(path)?,
                config_path: path.to_path_buf(),
            });
        }

        let config = AppConfig::default();
        match config.save_to_file(path) {
            Ok(()) => log::info!("配置文件不存在，已写出默认配置: {}", path.display()),
            Err(e) => log::warn!("Failed to write default config to {}: {}", path.display(), e),
        }
        Ok(Self {
            config,
            config_path: path.to_path_buf(),
        })
    }

    /// 获取当前配置
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
