use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::config::AppConfig;
use crate::scene::{build_scene, Scene, SceneKind};
use crate::types::{LinkStats, Sample};

/// 应用状态管理模块
/// 帧循环拥有的全部可变状态

/// 固定频率的 tick 门控，重绘可以更频繁，但状态只按间隔推进
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last_tick: Option<Instant>,
    ticks: u64,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// 到达下一个 tick 时返回 true 并记录时间
    pub fn should_tick(&mut self, now: Instant) -> bool {
        let due = match self.last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_tick = Some(now);
            self.ticks += 1;
        }
        due
    }

    /// 距离下一个 tick 的时间
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
        }
    }
}

/// 串口链路状态
#[derive(Debug)]
pub struct LinkState {
    pub port_name: String,
    pub baud_rate: u32,
    pub stats: Arc<LinkStats>,
}

/// 数据通道状态
#[derive(Debug)]
pub struct DataChannels {
    pub sample_receiver: Receiver<Sample>,
    pub samples_per_tick: usize,
    pub samples_ingested: u64,
    // 读取线程退出后只提示一次
    pub disconnect_reported: bool,
}

/// 统一的应用状态管理
pub struct AppState {
    pub scene_kind: SceneKind,
    pub scene: Box<dyn Scene>,
    pub channels: DataChannels,
    pub link: LinkState,
    pub frame_clock: FrameClock,
    pub started: Instant,
}

impl AppState {
    pub fn new(config: &AppConfig, sample_receiver: Receiver<Sample>, stats: Arc<LinkStats>) -> Self {
        let started = Instant::now();
        Self::with_scene(config, build_scene(config, started), sample_receiver, stats, started)
    }

    pub fn with_scene(
        config: &AppConfig,
        scene: Box<dyn Scene>,
        sample_receiver: Receiver<Sample>,
        stats: Arc<LinkStats>,
        started: Instant,
    ) -> Self {
        Self {
            scene_kind: config.scene.kind,
            scene,
            channels: DataChannels {
                sample_receiver,
                samples_per_tick: config.samples_per_tick(),
                samples_ingested: 0,
                disconnect_reported: false,
            },
            link: LinkState {
                port_name: config.serial.port.clone(),
                baud_rate: config.serial.baud_rate,
                stats,
            },
            frame_clock: FrameClock::new(Duration::from_millis(config.window.frame_interval_ms)),
            started,
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}
