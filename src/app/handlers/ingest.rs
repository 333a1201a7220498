use std::time::Instant;

use crossbeam_channel::TryRecvError;
use log::{debug, warn};

use crate::app::app_core::TiltApp;
use crate::app::state::AppState;

pub struct IngestHandler;

impl IngestHandler {
    pub fn handle_ingest(app: &mut TiltApp, now: Instant) {
        Self::ingest(&mut app.state, now);
    }

    /// 每个 tick 最多取出 `samples_per_tick` 个样本，其余留在队列中等待下一帧
    pub(crate) fn ingest(state: &mut AppState, now: Instant) -> usize {
        let mut consumed = 0;
        while consumed < state.channels.samples_per_tick {
            match state.channels.sample_receiver.try_recv() {
                Ok(sample) => {
                    state.scene.ingest(&sample);
                    consumed += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !state.channels.disconnect_reported {
                        warn!("Sample channel disconnected, serial reader has stopped");
                        state.channels.disconnect_reported = true;
                    }
                    break;
                }
            }
        }

        state.channels.samples_ingested += consumed as u64;
        state.scene.tick(now);

        if consumed > 0 {
            debug!(
                "Tick {}: ingested {} samples ({} queued)",
                state.frame_clock.ticks(),
                consumed,
                state.channels.sample_receiver.len()
            );
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use crossbeam_channel::bounded;
    use eframe::egui;

    use crate::config::AppConfig;
    use crate::scene::{Scene, SceneKind};
    use crate::types::{LinkStats, Orientation, Sample};

    #[derive(Default)]
    struct Recorded {
        samples: Vec<Sample>,
        ticks: usize,
    }

    struct RecordingScene(Rc<RefCell<Recorded>>);

    impl Scene for RecordingScene {
        fn ingest(&mut self, sample: &Sample) {
            self.0.borrow_mut().samples.push(*sample);
        }

        fn tick(&mut self, _now: Instant) {
            self.0.borrow_mut().ticks += 1;
        }

        fn ui(&mut self, _ui: &mut egui::Ui) {}

        fn summary(&self) -> String {
            String::new()
        }
    }

    fn pitch(p: f64) -> Sample {
        Sample::Angles(Orientation::new(p, 0.0, 0.0))
    }

    #[test]
    fn ingest_is_capped_per_tick_and_keeps_order() {
        let mut config = AppConfig::default();
        config.scene.kind = SceneKind::Pitch;
        config.plot.samples_per_tick = 2;

        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let (tx, rx) = bounded(16);
        let mut state = AppState::with_scene(
            &config,
            Box::new(RecordingScene(Rc::clone(&recorded))),
            rx,
            Arc::new(LinkStats::new()),
            Instant::now(),
        );

        for p in 0..5 {
            tx.send(pitch(p as f64)).unwrap();
        }

        assert_eq!(IngestHandler::ingest(&mut state, Instant::now()), 2);
        assert_eq!(IngestHandler::ingest(&mut state, Instant::now()), 2);
        assert_eq!(IngestHandler::ingest(&mut state, Instant::now()), 1);
        assert_eq!(IngestHandler::ingest(&mut state, Instant::now()), 0);

        let recorded = recorded.borrow();
        let pitches: Vec<f64> = recorded
            .samples
            .iter()
            .filter_map(|s| s.as_angles().map(|o| o.pitch))
            .collect();
        assert_eq!(pitches, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(recorded.ticks, 4);
        assert_eq!(state.channels.samples_ingested, 5);
    }

    #[test]
    fn disconnected_channel_still_ticks_the_scene() {
        let config = AppConfig::default();
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let (tx, rx) = bounded::<Sample>(4);
        drop(tx);

        let mut state = AppState::with_scene(
            &config,
            Box::new(RecordingScene(Rc::clone(&recorded))),
            rx,
            Arc::new(LinkStats::new()),
            Instant::now(),
        );

        assert!(!state.channels.disconnect_reported);
        assert_eq!(IngestHandler::ingest(&mut state, Instant::now()), 0);
        assert_eq!(recorded.borrow().ticks, 1);
        assert!(state.channels.disconnect_reported);

        assert_eq!(IngestHandler::ingest(&mut state, Instant::now()), 0);
        assert_eq!(recorded.borrow().ticks, 2);
        assert!(state.channels.disconnect_reported);
    }

    #[test]
    fn queued_samples_are_drained_before_disconnect_is_reported() {
        let mut config = AppConfig::default();
        config.scene.kind = SceneKind::Pitch;
        config.plot.samples_per_tick = 5;

        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let (tx, rx) = bounded(4);
        tx.send(pitch(1.0)).unwrap();
        tx.send(pitch(2.0)).unwrap();
        drop(tx);

        let stats = Arc::new(LinkStats::new());
        stats.set_connected(false);
        let mut state = AppState::with_scene(
            &config,
            Box::new(RecordingScene(Rc::clone(&recorded))),
            rx,
            stats,
            Instant::now(),
        );

        assert_eq!(IngestHandler::ingest(&mut state, Instant::now()), 2);
        assert!(state.channels.disconnect_reported);
        assert_eq!(recorded.borrow().samples.len(), 2);
    }
}
