//! Sampled signal generation.

use std::f64::consts::PI;

/// Number of samples the analysis generates.
pub const SAMPLE_COUNT: usize = 1000;

/// Paired time/value samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Sample times, ascending.
    pub time: Vec<f64>,
    /// Signal strength at each time.
    pub values: Vec<f64>,
}

impl Signal {
    /// A sine wave sampled at `points` evenly spaced times over `[0, 2π]`,
    /// both endpoints included.
    pub fn sine(points: usize) -> Self {
        let time = linspace(0.0, 2.0 * PI, points);
        let values = time.iter().map(|t| t.sin()).collect();
        Self { time, values }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// `(min, max)` of the values, or `None` when empty.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}
