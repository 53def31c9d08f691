/// Temporal smoothing
///
/// Fixed-window moving average and exponential moving average over scalar
/// per-frame metrics.

use std::collections::VecDeque;

/// Moving average over the last `size` values
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    window: VecDeque<f32>,
    size: usize,
}

impl MovingAverage {
    /// Create a new average over `size` values (at least 1)
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            window: VecDeque::with_capacity(size + 1),
            size,
        }
    }

    /// Push a value and return the mean of the current window
    pub fn update(&mut self, value: f32) -> f32 {
        self.window.push_back(value);
        while self.window.len() > self.size {
            self.window.pop_front();
        }
        self.average()
    }

    /// Mean of the current window, 0 when empty
    pub fn average(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.window.iter().sum::<f32>() / self.window.len() as f32
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}

/// Exponential moving average with `α = 2 / (window + 1)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialMovingAverage {
    alpha: f32,
    value: Option<f32>,
}

impl ExponentialMovingAverage {
    pub fn new(window: usize) -> Self {
        Self {
            alpha: 2.0 / (window as f32 + 1.0),
            value: None,
        }
    }

    /// Blend in a value; the first value is taken as-is
    pub fn update(&mut self, value: f32) -> f32 {
        let next = match self.value {
            None => value,
            Some(prev) => prev * (1.0 - self.alpha) + value * self.alpha,
        };
        self.value = Some(next);
        next
    }

    /// Current value, None until the first update
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn reset(&mut self) {
        self.value = None;
    }
}
