use std::collections::VecDeque;

/// 固定容量的滚动窗口，超出容量时先淘汰最旧的样本
#[derive(Debug, Clone)]
pub struct History<T> {
    capacity: usize,
    samples: VecDeque<T>,
    // 累计写入的样本数，用于图表 x 轴的滑动索引
    total_pushed: u64,
}

impl<T> History<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
            total_pushed: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn push(&mut self, sample: T) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.total_pushed += 1;
    }

    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    /// 窗口内第一个样本的全局索引
    pub fn first_index(&self) -> u64 {
        self.total_pushed - self.samples.len() as u64
    }

    /// 图表可见的 x 轴范围，样本数超过容量后窗口开始滑动
    pub fn x_range(&self) -> (f64, f64) {
        let total = self.total_pushed as f64;
        let window = self.capacity as f64;
        ((total - window).max(0.0), total.max(window))
    }

    /// 某一通道的 `(全局索引, 数值)` 点列
    pub fn series<F>(&self, value: F) -> Vec<[f64; 2]>
    where
        F: Fn(&T) -> f64,
    {
        let first = self.first_index();
        self.samples
            .iter()
            .enumerate()
            .map(|(i, sample)| [(first + i as u64) as f64, value(sample)])
            .collect()
    }
}
