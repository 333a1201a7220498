use std::time::Duration;

use eframe::egui::{pos2, Pos2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::types::RawAccel;

/// 游戏规则参数，由 [`GameConfig`] 转换而来
#[derive(Debug, Clone)]
pub struct GameRules {
    pub width: f32,
    pub height: f32,
    pub ball_radius: f32,
    pub coin_radius: f32,
    pub step: f32,
    pub dead_zone: i32,
    pub winning_score: Option<u32>,
    pub time_limit: Option<Duration>,
}

impl From<&GameConfig> for GameRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            width: config.canvas_width,
            height: config.canvas_height,
            ball_radius: config.ball_radius,
            coin_radius: config.coin_radius,
            step: config.step,
            dead_zone: config.dead_zone,
            winning_score: (config.winning_score > 0).then_some(config.winning_score),
            time_limit: (config.time_limit_secs > 0.0).then(|| Duration::from_secs_f64(config.time_limit_secs)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver { win: bool },
}

/// 小球吃金币的游戏状态，只由帧循环修改
#[derive(Debug)]
pub struct GameState {
    rules: GameRules,
    ball: Pos2,
    coin: Pos2,
    score: u32,
    phase: Phase,
    rng: StdRng,
}

impl GameState {
    pub fn new(rules: GameRules) -> Self {
        Self::with_rng(rules, StdRng::from_os_rng())
    }

    pub fn with_rng(rules: GameRules, mut rng: StdRng) -> Self {
        let ball = pos2(rules.width / 2.0, rules.height / 2.0);
        let coin = random_coin(&rules, &mut rng);
        Self {
            rules,
            ball,
            coin,
            score: 0,
            phase: Phase::Playing,
            rng,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn ball(&self) -> Pos2 {
        self.ball
    }

    pub fn coin(&self) -> Pos2 {
        self.coin
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub(crate) fn set_coin(&mut self, coin: Pos2) {
        self.coin = coin;
    }

    /// 剩余整秒数（向上取整），不限时返回 `None`
    pub fn remaining_secs(&self, elapsed: Duration) -> Option<u64> {
        self.rules
            .time_limit
            .map(|limit| limit.saturating_sub(elapsed).as_secs_f64().ceil() as u64)
    }

    /// 推进一帧，`sample` 为本 tick 消费的读数；游戏结束后不再改变状态
    pub fn tick(&mut self, sample: Option<&RawAccel>, elapsed: Duration) {
        if self.phase != Phase::Playing {
            return;
        }

        if let Some(raw) = sample {
            self.nudge(raw);
        }
        self.clamp_ball();

        if self.ball.distance(self.coin) < self.rules.ball_radius + self.rules.coin_radius {
            self.score += 1;
            self.coin = random_coin(&self.rules, &mut self.rng);
        }

        // 同一帧内达到目标分数且时间耗尽时，以超时判负为准
        if self.rules.winning_score.is_some_and(|target| self.score >= target) {
            self.phase = Phase::GameOver { win: true };
        }
        if self.rules.time_limit.is_some_and(|limit| elapsed >= limit) {
            self.phase = Phase::GameOver { win: false };
        }
    }

    fn nudge(&mut self, raw: &RawAccel) {
        let dz = self.rules.dead_zone;
        let step = self.rules.step;

        if raw.ax > dz {
            self.ball.x += step;
        } else if raw.ax < -dz {
            self.ball.x -= step;
        }

        // 向前倾斜时小球向上移动
        if raw.ay > dz {
            self.ball.y -= step;
        } else if raw.ay < -dz {
            self.ball.y += step;
        }
    }

    fn clamp_ball(&mut self) {
        let r = self.rules.ball_radius;
        self.ball.x = self.ball.x.clamp(r, self.rules.width - r);
        self.ball.y = self.ball.y.clamp(r, self.rules.height - r);
    }
}

fn random_coin(rules: &GameRules, rng: &mut StdRng) -> Pos2 {
    let r = rules.coin_radius;
    pos2(
        rng.random_range(r..=rules.width - r),
        rng.random_range(r..=rules.height - r),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_raw_accel;

    fn rules() -> GameRules {
        GameRules::from(&GameConfig::default())
    }

    fn seeded(rules: GameRules) -> GameState {
        GameState::with_rng(rules, StdRng::seed_from_u64(7))
    }

    fn in_bounds(p: Pos2, r: f32, rules: &GameRules) -> bool {
        p.x >= r && p.x <= rules.width - r && p.y >= r && p.y <= rules.height - r
    }

    /// 把金币挪到远离小球的位置，避免测试中意外得分
    fn park_coin(game: &mut GameState) {
        game.coin = pos2(game.rules.coin_radius, game.rules.coin_radius);
        game.ball = pos2(game.rules.width / 2.0, game.rules.height / 2.0);
    }

    #[test]
    fn samples_inside_dead_zone_do_not_move_ball() {
        let mut game = seeded(rules());
        park_coin(&mut game);
        let start = game.ball();

        for line in ["0,0,0", "2000,-2000,0", "-1999,1999,16000"] {
            let raw = parse_raw_accel(line).unwrap();
            game.tick(Some(&raw), Duration::ZERO);
        }
        assert_eq!(game.ball(), start);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn tilt_moves_ball_by_one_step() {
        let mut game = seeded(rules());
        park_coin(&mut game);
        let start = game.ball();

        game.tick(Some(&RawAccel::new(2500, 2500, 0)), Duration::ZERO);
        assert_eq!(game.ball(), pos2(start.x + 5.0, start.y - 5.0));

        game.tick(Some(&RawAccel::new(-2500, -2500, 0)), Duration::ZERO);
        assert_eq!(game.ball(), start);
    }

    #[test]
    fn ball_stops_at_right_boundary() {
        let mut game = seeded(rules());
        park_coin(&mut game);
        let start_x = game.ball().x;
        let raw = parse_raw_accel("2500,0,0").unwrap();

        let mut expected = start_x;
        for _ in 0..200 {
            game.tick(Some(&raw), Duration::ZERO);
            expected = (expected + 5.0).min(800.0 - 25.0);
            assert_eq!(game.ball().x, expected);
            assert!(in_bounds(game.ball(), 25.0, game.rules()));
        }
        assert_eq!(game.ball().x, 775.0);
    }

    #[test]
    fn ball_is_clamped_in_every_direction() {
        let mut game = seeded(rules());
        park_coin(&mut game);
        for raw in [
            RawAccel::new(-5000, 5000, 0),
            RawAccel::new(5000, -5000, 0),
        ] {
            for _ in 0..300 {
                game.tick(Some(&raw), Duration::ZERO);
                assert!(in_bounds(game.ball(), 25.0, game.rules()));
            }
        }
    }

    #[test]
    fn overlap_scores_once_and_relocates_coin() {
        let mut game = seeded(rules());
        game.coin = pos2(game.ball.x + 39.0, game.ball.y);

        game.tick(None, Duration::ZERO);

        assert_eq!(game.score(), 1);
        assert!(in_bounds(game.coin(), 15.0, game.rules()));
    }

    #[test]
    fn touching_circles_do_not_score() {
        let mut game = seeded(rules());
        game.coin = pos2(game.ball.x + 40.0, game.ball.y);

        game.tick(None, Duration::ZERO);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn new_coins_are_always_in_bounds() {
        let mut game = seeded(rules());
        for _ in 0..500 {
            game.coin = game.ball;
            game.tick(None, Duration::ZERO);
            assert!(in_bounds(game.coin(), 15.0, game.rules()));
            if game.phase() != Phase::Playing {
                break;
            }
        }
    }

    #[test]
    fn reaching_target_wins_and_freezes_state() {
        let mut game = seeded(rules());
        for _ in 0..10 {
            game.coin = game.ball;
            game.tick(None, Duration::from_secs(1));
        }
        assert_eq!(game.score(), 10);
        assert_eq!(game.phase(), Phase::GameOver { win: true });

        let ball = game.ball();
        game.coin = game.ball;
        game.tick(Some(&RawAccel::new(9000, 9000, 0)), Duration::from_secs(2));
        assert_eq!(game.score(), 10);
        assert_eq!(game.ball(), ball);
    }

    #[test]
    fn running_out_of_time_loses() {
        let mut game = seeded(rules());
        park_coin(&mut game);

        game.tick(None, Duration::from_millis(59_999));
        assert_eq!(game.phase(), Phase::Playing);

        game.tick(None, Duration::from_secs(60));
        assert_eq!(game.phase(), Phase::GameOver { win: false });
    }

    #[test]
    fn timeout_on_the_winning_tick_is_a_loss() {
        let config = GameConfig {
            winning_score: 1,
            ..GameConfig::default()
        };
        let mut game = seeded(GameRules::from(&config));
        game.coin = game.ball;

        game.tick(None, Duration::from_secs(60));
        assert_eq!(game.score(), 1);
        assert_eq!(game.phase(), Phase::GameOver { win: false });
    }

    #[test]
    fn last_coin_before_timeout_still_wins() {
        let config = GameConfig {
            winning_score: 1,
            ..GameConfig::default()
        };
        let mut game = seeded(GameRules::from(&config));
        game.coin = game.ball;

        game.tick(None, Duration::from_millis(59_999));
        assert_eq!(game.phase(), Phase::GameOver { win: true });
    }

    #[test]
    fn remaining_time_rounds_up_and_saturates() {
        let game = seeded(rules());
        assert_eq!(game.remaining_secs(Duration::ZERO), Some(60));
        assert_eq!(game.remaining_secs(Duration::from_millis(59_500)), Some(1));
        assert_eq!(game.remaining_secs(Duration::from_secs(90)), Some(0));
    }

    #[test]
    fn endless_mode_never_ends() {
        let config = GameConfig {
            winning_score: 0,
            time_limit_secs: 0.0,
            ..GameConfig::default()
        };
        let mut game = seeded(GameRules::from(&config));
        for _ in 0..50 {
            game.coin = game.ball;
            game.tick(None, Duration::from_secs(3600));
        }
        assert_eq!(game.score(), 50);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.remaining_secs(Duration::ZERO), None);
    }
}
