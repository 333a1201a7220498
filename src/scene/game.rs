use std::time::{Duration, Instant};

use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Rect, Sense};
use log::info;

use super::Scene;
use crate::config::{GameColors, GameConfig};
use crate::game::{GameRules, GameState, Phase};
use crate::types::{RawAccel, Sample};
use crate::utils::rgb;

struct Palette {
    background: Color32,
    ball: Color32,
    coin: Color32,
    text: Color32,
    win: Color32,
    lose: Color32,
}

impl From<&GameColors> for Palette {
    fn from(colors: &GameColors) -> Self {
        Self {
            background: rgb(colors.background),
            ball: rgb(colors.ball),
            coin: rgb(colors.coin),
            text: rgb(colors.text),
            win: rgb(colors.win),
            lose: rgb(colors.lose),
        }
    }
}

/// 倾斜控制小球吃金币
pub struct GameScene {
    state: GameState,
    palette: Palette,
    started: Instant,
    elapsed: Duration,
    pending: Option<RawAccel>,
}

impl GameScene {
    pub fn new(config: &GameConfig, started: Instant) -> Self {
        Self::with_state(GameState::new(GameRules::from(config)), config, started)
    }

    fn with_state(state: GameState, config: &GameConfig, started: Instant) -> Self {
        Self {
            state,
            palette: Palette::from(&config.colors),
            started,
            elapsed: Duration::ZERO,
            pending: None,
        }
    }

    fn status_line(&self) -> String {
        match self.state.remaining_secs(self.elapsed) {
            Some(secs) => format!("Time: {}s", secs),
            None => "Time: --".to_string(),
        }
    }
}

impl Scene for GameScene {
    fn ingest(&mut self, sample: &Sample) {
        // 配置校验保证每个 tick 最多送入一个读数
        if let Some(raw) = sample.as_raw() {
            self.pending = Some(*raw);
        }
    }

    fn tick(&mut self, now: Instant) {
        if self.state.phase() != Phase::Playing {
            self.pending = None;
            return;
        }

        self.elapsed = now.saturating_duration_since(self.started);
        let before = self.state.score();
        self.state.tick(self.pending.take().as_ref(), self.elapsed);

        if self.state.score() > before {
            info!("Coin collected, score {}", self.state.score());
        }
        if let Phase::GameOver { win } = self.state.phase() {
            if win {
                info!("Game won with score {} after {:.1}s", self.state.score(), self.elapsed.as_secs_f64());
            } else {
                info!("Time is up, final score {}", self.state.score());
            }
        }
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        let rules = self.state.rules();
        let canvas = vec2(rules.width, rules.height);
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());

        // 等比例缩放画布并居中
        let scale = (response.rect.width() / canvas.x).min(response.rect.height() / canvas.y);
        let rect = Rect::from_center_size(response.rect.center(), canvas * scale);
        let to_screen = |p: egui::Pos2| rect.min + p.to_vec2() * scale;

        painter.rect_filled(rect, 0.0, self.palette.background);
        painter.circle_filled(to_screen(self.state.coin()), rules.coin_radius * scale, self.palette.coin);
        painter.circle_filled(to_screen(self.state.ball()), rules.ball_radius * scale, self.palette.ball);

        let font = FontId::proportional(24.0 * scale.max(0.5));
        painter.text(
            to_screen(pos2(20.0, 20.0)),
            Align2::LEFT_TOP,
            format!("Score: {}", self.state.score()),
            font.clone(),
            self.palette.text,
        );
        painter.text(
            to_screen(pos2(20.0, 60.0)),
            Align2::LEFT_TOP,
            self.status_line(),
            font,
            self.palette.text,
        );

        if let Phase::GameOver { win } = self.state.phase() {
            let (message, color) = if win {
                ("You Win!", self.palette.win)
            } else {
                ("Time's Up! You Lose!", self.palette.lose)
            };
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                message,
                FontId::proportional(48.0 * scale.max(0.5)),
                color,
            );
        }
    }

    fn summary(&self) -> String {
        let score = match self.state.rules().winning_score {
            Some(target) => format!("Score {}/{}", self.state.score(), target),
            None => format!("Score {}", self.state.score()),
        };
        match self.state.phase() {
            Phase::Playing => format!("{}  {}", score, self.status_line()),
            Phase::GameOver { win: true } => format!("{}  won", score),
            Phase::GameOver { win: false } => format!("{}  lost", score),
        }
    }
}
