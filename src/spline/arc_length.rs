//! Arc length parameterization for splines.
//!
//! The table samples the curve at uniform t intervals and stores both the
//! sampled positions and the cumulative distance between them. Positions
//! double as a cheap polyline approximation of the curve for spatial queries.

use bevy::prelude::*;

use super::types::{CurveEvaluator, Knot};

/// Default number of intervals for arc length tables.
pub const DEFAULT_ARC_LENGTH_SAMPLES: usize = 128;

/// Baked arc length lookup table.
///
/// Holds `resolution + 1` samples at `t = i / resolution`. Cumulative
/// distances are non-decreasing, start at zero and end at the total length.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    resolution: usize,
    positions: Vec<Vec2>,
    distances: Vec<f32>,
    /// Position reported when the curve has no segments.
    fallback: Vec2,
}

impl Default for ArcLengthTable {
    fn default() -> Self {
        Self::with_resolution(DEFAULT_ARC_LENGTH_SAMPLES)
    }
}

impl ArcLengthTable {
    /// Create an empty table that will bake `resolution` intervals.
    pub fn with_resolution(resolution: usize) -> Self {
        Self {
            resolution: resolution.max(1),
            positions: Vec::new(),
            distances: Vec::new(),
            fallback: Vec2::ZERO,
        }
    }

    /// Compute a table for a knot sequence.
    pub fn compute(knots: &[Knot], resolution: usize) -> Self {
        let mut table = Self::with_resolution(resolution);
        table.rebuild(knots);
        table
    }

    /// Resample the curve into this table.
    ///
    /// Buffers keep their allocation when the resolution is unchanged.
    pub fn rebuild(&mut self, knots: &[Knot]) {
        self.fallback = knots.evaluate_position(0.0);

        if knots.len() < 2 {
            self.positions.clear();
            self.distances.clear();
            return;
        }

        let count = self.resolution + 1;
        if self.positions.len() != count {
            self.positions.resize(count, Vec2::ZERO);
            self.distances.resize(count, 0.0);
        }

        let mut cumulative_length = 0.0;
        let mut prev_point = knots.evaluate_position(0.0);
        self.positions[0] = prev_point;
        self.distances[0] = 0.0;

        for i in 1..count {
            let t = i as f32 / self.resolution as f32;
            let point = knots.evaluate_position(t);
            cumulative_length += (point - prev_point).length();
            self.positions[i] = point;
            self.distances[i] = cumulative_length;
            prev_point = point;
        }

        debug!(
            "baked arc length table: {} samples, length {:.4}",
            count, cumulative_length
        );
    }

    /// Change the number of intervals.
    ///
    /// Samples baked at another resolution are dropped, so the table reads as
    /// empty until the next [`rebuild`](Self::rebuild).
    pub fn set_resolution(&mut self, resolution: usize) {
        let resolution = resolution.max(1);
        if resolution != self.resolution {
            self.resolution = resolution;
            self.positions.clear();
            self.distances.clear();
        }
    }

    /// Configured number of intervals for the next rebuild.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of intervals actually baked, zero when empty.
    pub(crate) fn baked_intervals(&self) -> usize {
        self.distances.len().saturating_sub(1)
    }

    /// Whether the table holds no samples (fewer than two knots).
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Sampled positions, `resolution + 1` of them unless empty.
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// Cumulative distances matching [`positions`](Self::positions).
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Get the total arc length of the curve.
    pub fn total_length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Find the t parameter at a given distance from the start.
    ///
    /// The distance is clamped to `[0, total_length]`. Zero maps to t = 0
    /// even when the curve starts with a zero-length stretch; any other
    /// distance falling on such a stretch maps to its far end.
    pub fn distance_to_parameter(&self, distance: f32) -> f32 {
        let total_length = self.total_length();
        if total_length <= 0.0 {
            return 0.0;
        }

        let target = distance.clamp(0.0, total_length);
        if target <= 0.0 {
            return 0.0;
        }
        let intervals = self.baked_intervals();

        // Last sample whose cumulative distance does not exceed the target
        let lo = self
            .distances
            .partition_point(|&d| d <= target)
            .saturating_sub(1);
        if lo >= intervals {
            return 1.0;
        }

        let l0 = self.distances[lo];
        let l1 = self.distances[lo + 1];
        let span = l1 - l0;
        let alpha = if span > 0.0 { (target - l0) / span } else { 0.0 };

        (lo as f32 + alpha) / intervals as f32
    }

    /// Fraction of the total length covered at parameter t.
    pub fn parameter_to_distance_fraction(&self, t: f32) -> f32 {
        let total_length = self.total_length();
        if total_length <= 0.0 {
            return 0.0;
        }

        let (idx, alpha) = self.bracket(t);
        let l0 = self.distances[idx];
        let l1 = self.distances[idx + 1];
        (l0 + alpha * (l1 - l0)) / total_length
    }

    /// Find the t parameter at a fraction of the total length.
    pub fn distance_fraction_to_parameter(&self, fraction: f32) -> f32 {
        self.distance_to_parameter(fraction * self.total_length())
    }

    /// Approximate position at t, interpolated between baked samples.
    pub fn baked_position_at(&self, t: f32) -> Vec2 {
        if self.is_empty() {
            return self.fallback;
        }

        let (idx, alpha) = self.bracket(t);
        self.positions[idx].lerp(self.positions[idx + 1], alpha)
    }

    /// Compute t values for uniform spacing along the arc length.
    ///
    /// Returns `count` t values at equal distances from start to end.
    pub fn uniform_parameters(&self, count: usize) -> Vec<f32> {
        if count == 0 {
            return Vec::new();
        }
        if count == 1 {
            return vec![0.5];
        }

        let total = self.total_length();
        if total <= 0.0 {
            // Fall back to uniform t distribution
            return (0..count).map(|i| i as f32 / (count - 1) as f32).collect();
        }

        (0..count)
            .map(|i| self.distance_to_parameter(total * i as f32 / (count - 1) as f32))
            .collect()
    }

    /// Sample index and blend factor bracketing a clamped t.
    /// Only valid on a non-empty table.
    fn bracket(&self, t: f32) -> (usize, f32) {
        let intervals = self.baked_intervals();
        let float_idx = t.clamp(0.0, 1.0) * intervals as f32;
        let idx = (float_idx as usize).min(intervals - 1);
        (idx, float_idx - idx as f32)
    }
}
