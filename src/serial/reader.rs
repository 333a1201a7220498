use crossbeam_channel::{Sender, TrySendError};
use log::{error, info, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::line::{LineRead, LineSource};
use crate::parser::{parse_line, SampleFormat};
use crate::types::{LinkStats, Sample};

pub fn spawn_reader<S>(
    source: S,
    format: SampleFormat,
    sender: Sender<Sample>,
    stats: Arc<LinkStats>,
    shutdown: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<()>>
where
    S: LineSource + 'static,
{
    thread::Builder::new()
        .name("serial-reader".into())
        .spawn(move || reader_loop(source, format, &sender, &stats, &shutdown))
}

/// 读取循环，直到收到关闭信号、数据流结束、读取出错或接收端断开
///
/// 样本通过有界通道交给 UI 线程，队列满时丢弃最新样本
pub fn reader_loop<S: LineSource>(
    mut source: S,
    format: SampleFormat,
    sender: &Sender<Sample>,
    stats: &LinkStats,
    shutdown: &AtomicBool,
) {
    stats.set_connected(true);
    let mut dropped: u64 = 0;

    while !shutdown.load(Ordering::Relaxed) {
        let line = match source.next_line() {
            Ok(LineRead::Line(line)) => line,
            Ok(LineRead::Idle) => continue,
            Ok(LineRead::Closed) => {
                info!("Serial stream closed, reader exiting");
                break;
            }
            Err(e) => {
                // 不做重连，断开后由状态栏提示
                error!("Serial read failed: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        stats.record_line();

        let Some(sample) = parse_line(format, &line) else {
            stats.record_malformed();
            trace!("Dropping malformed line: {:?}", line);
            continue;
        };

        match sender.try_send(sample) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                stats.record_dropped();
                dropped += 1;
                if dropped % 100 == 1 {
                    warn!("Sample queue full, {} samples dropped so far", dropped);
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                // 通道断开表示GUI已关闭，优雅退出
                info!("Sample channel disconnected, reader exiting");
                break;
            }
        }
    }

    stats.set_connected(false);
}
