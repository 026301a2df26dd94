use std::{collections::VecDeque, time::Instant};

#[macro_export]
macro_rules! log_err {
    ($expr:expr, $($arg:tt)+) => {
        if let Err(err) = $expr {
            log::error!($($arg)+, err = err);
        }
    };
}

/// Mean of the last `period` samples. Samples keep the unit they were added in.
pub struct SimpleMovingAverage {
    window: VecDeque<f32>,
    period: usize,
    sum: f32,
}

impl SimpleMovingAverage {
    pub fn new(period: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(period),
            period,
            sum: 0.0,
        }
    }

    /// Tracks microseconds elapsed since `start_time`, so `get` reports µs
    pub fn add_elapsed(&mut self, start_time: Instant) -> f32 {
        self.add(start_time.elapsed().as_secs_f32() * 1e6)
    }

    pub fn add(&mut self, value: f32) -> f32 {
        self.window.push_back(value);
        self.sum += value;

        if self.window.len() > self.period {
            if let Some(removed) = self.window.pop_front() {
                self.sum -= removed;
            }
        }

        self.get()
    }

    /// 0 before the first sample
    pub fn get(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.sum / self.window.len() as f32
    }
}
