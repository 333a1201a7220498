use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// 串口链路统计，读取线程写入，UI 线程只读
#[derive(Debug, Default)]
pub struct LinkStats {
    lines_read: AtomicU64,
    malformed_lines: AtomicU64,
    dropped_samples: AtomicU64,
    connected: AtomicBool,
}

/// [`LinkStats`] 的快照，供界面渲染
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSnapshot {
    pub lines_read: u64,
    pub malformed_lines: u64,
    pub dropped_samples: u64,
    pub connected: bool,
}

impl LinkStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_line(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_malformed(&self) {
        self.malformed_lines.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.dropped_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> LinkSnapshot {
        LinkSnapshot {
            lines_read: self.lines_read.load(Ordering::Relaxed),
            malformed_lines: self.malformed_lines.load(Ordering::Relaxed),
            dropped_samples: self.dropped_samples.load(Ordering::Relaxed),
            connected: self.connected.load(Ordering::Relaxed),
        }
    }
}
