//! Bounded breadcrumb trail of past planar positions.

#[cfg(test)]
#[path = "trail_test.rs"]
mod trail_test;

use std::collections::VecDeque;

use crate::consts::{TRAIL_MAX_SAMPLES, TRAIL_MIN_STEP};
use crate::pose::Pose;

/// One recorded `(x, z)` position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub x: f64,
    pub z: f64,
}

/// Ring buffer of samples, oldest first.
///
/// A sample is appended only when the pose has moved more than `min_step`
/// from the newest sample; beyond `capacity` the oldest sample is evicted.
#[derive(Debug, Clone)]
pub struct Trail {
    samples: VecDeque<TrailSample>,
    capacity: usize,
    min_step: f64,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TRAIL_MAX_SAMPLES, TRAIL_MIN_STEP)
    }
}

impl Trail {
    #[must_use]
    pub fn new(capacity: usize, min_step: f64) -> Self {
        Self { samples: VecDeque::with_capacity(capacity.min(TRAIL_MAX_SAMPLES)), capacity: capacity.max(1), min_step }
    }

    /// Record the pose if it moved far enough. Returns whether a sample was added.
    pub fn record(&mut self, pose: &Pose) -> bool {
        if !pose.x.is_finite() || !pose.z.is_finite() {
            return false;
        }
        if let Some(last) = self.samples.back() {
            if (pose.x - last.x).hypot(pose.z - last.z) <= self.min_step {
                return false;
            }
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(TrailSample { x: pose.x, z: pose.z });
        true
    }

    /// Drop every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TrailSample> {
        self.samples.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
