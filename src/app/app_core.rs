use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Receiver;
use eframe::{egui, Frame};
use log::info;

use super::handlers::IngestHandler;
use super::state::AppState;
use crate::config::ConfigManager;
use crate::types::{LinkStats, Sample};

pub struct TiltApp {
    // 统一的状态管理
    pub state: AppState,

    // 配置管理
    pub config: ConfigManager,
}

impl TiltApp {
    pub fn new(config: ConfigManager, sample_receiver: Receiver<Sample>, stats: Arc<LinkStats>) -> Self {
        let state = AppState::new(config.get_config(), sample_receiver, stats);

        info!(
            "Scene '{}' ready, stepping every {:?} with up to {} samples per tick",
            state.scene_kind,
            state.frame_clock.interval(),
            state.channels.samples_per_tick
        );

        TiltApp { state, config }
    }

    /// 推进一次帧循环：按固定间隔消费样本并更新场景
    pub fn step(&mut self, now: Instant) {
        if self.state.frame_clock.should_tick(now) {
            IngestHandler::handle_ingest(self, now);
        }
    }
}

impl eframe::App for TiltApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 设置明亮模式主题
        ctx.set_visuals(egui::Visuals::light());

        // 处理键盘输入
        self.handle_keyboard_input(ctx);

        // 消费样本并推进场景
        let now = Instant::now();
        self.step(now);

        // 渲染UI组件
        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);

        ctx.request_repaint_after(self.state.frame_clock.until_next(Instant::now()));
    }
}
