//! Nearest-point projection against a baked arc length table.
//!
//! Projection never re-evaluates the Bézier curve. A linear scan over the
//! baked samples finds the closest one, then the query point is projected
//! onto the chord between its two neighbours. Error is bounded by the
//! spacing of the table samples.

use bevy::prelude::*;

use super::arc_length::ArcLengthTable;

/// Result of projecting a point onto a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Curve parameter of the closest point found.
    pub t: f32,
    /// Distance from the query point to the curve at `t`.
    pub distance: f32,
}

impl Projection {
    /// Result reported when there is no geometry to project onto.
    pub const NONE: Self = Self {
        t: 0.0,
        distance: f32::INFINITY,
    };

    /// Whether the projection found any geometry.
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite()
    }
}

impl ArcLengthTable {
    /// Find the closest point on the curve to `point`, restricted to
    /// parameters in `[min_t, max_t]`.
    pub fn project(&self, point: Vec2, min_t: f32, max_t: f32) -> Projection {
        self.project_mapped(point, min_t, max_t, |p| p)
    }

    /// Like [`project`](Self::project), with every baked sample passed
    /// through `map` first. `point` and the returned distance are in the
    /// mapped space.
    pub fn project_mapped(
        &self,
        point: Vec2,
        min_t: f32,
        max_t: f32,
        map: impl Fn(Vec2) -> Vec2,
    ) -> Projection {
        let positions = self.positions();
        if positions.is_empty() {
            return Projection::NONE;
        }

        let min_t = min_t.clamp(0.0, 1.0);
        let max_t = max_t.clamp(0.0, 1.0);
        let (min_t, max_t) = if min_t <= max_t {
            (min_t, max_t)
        } else {
            (max_t, min_t)
        };

        let resolution = self.baked_intervals();
        let scale = resolution as f32;
        let first = ((min_t * scale).floor() as usize).min(resolution);
        let last = ((max_t * scale).ceil() as usize).min(resolution);

        // Coarse: closest baked sample in range
        let mut best = first;
        let mut best_sq = f32::INFINITY;
        for (i, &sample) in positions.iter().enumerate().take(last + 1).skip(first) {
            let sq = map(sample).distance_squared(point);
            if sq < best_sq {
                best = i;
                best_sq = sq;
            }
        }

        // Refine: project onto the chord between the neighbouring samples
        let lo = best.saturating_sub(1).max(first);
        let hi = (best + 1).min(last);
        let p0 = map(positions[lo]);
        let p1 = map(positions[hi]);
        let chord = p1 - p0;
        let chord_sq = chord.length_squared();

        let (t, distance) = if chord_sq == 0.0 {
            (best as f32 / scale, best_sq.sqrt())
        } else {
            let u = ((point - p0).dot(chord) / chord_sq).clamp(0.0, 1.0);
            let refined_sq = point.distance_squared(p0 + chord * u);
            if best_sq < refined_sq {
                // The chord skips over the best sample on curved stretches
                (best as f32 / scale, best_sq.sqrt())
            } else {
                let lo_t = lo as f32 / scale;
                let hi_t = hi as f32 / scale;
                (lo_t + (hi_t - lo_t) * u, refined_sq.sqrt())
            }
        };

        Projection {
            t: t.clamp(min_t, max_t),
            distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::{Knot, DEFAULT_ARC_LENGTH_SAMPLES};

    fn straight_line() -> ArcLengthTable {
        ArcLengthTable::compute(
            &[
                Knot::corner(Vec2::new(0.0, 0.0)),
                Knot::corner(Vec2::new(10.0, 0.0)),
            ],
            DEFAULT_ARC_LENGTH_SAMPLES,
        )
    }

    fn arch() -> ArcLengthTable {
        ArcLengthTable::compute(
            &[
                Knot::new(Vec2::ZERO, Vec2::ZERO, Vec2::new(0.0, 6.0)),
                Knot::new(Vec2::new(8.0, 0.0), Vec2::new(0.0, 6.0), Vec2::ZERO),
            ],
            64,
        )
    }

    #[test]
    fn test_project_onto_line() {
        let table = straight_line();
        let hit = table.project(Vec2::new(5.0, 1.0), 0.0, 1.0);
        assert!((hit.t - 0.5).abs() < 1e-3);
        assert!((hit.distance - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_project_on_baked_sample_is_exact() {
        let table = arch();
        for i in [0, 7, 20, 32, 51, 64] {
            let sample = table.positions()[i];
            let hit = table.project(sample, 0.0, 1.0);
            assert_eq!(hit.distance, 0.0, "sample {i}");
            assert!((table.baked_position_at(hit.t) - sample).length() < 1e-4);
        }
    }

    #[test]
    fn test_project_respects_range() {
        let table = straight_line();
        // Nearest point on the full curve is near t = 0.2
        let hit = table.project(Vec2::new(2.0, 0.5), 0.6, 1.0);
        assert!(hit.t >= 0.6);
        assert!(hit.distance > 1.0);

        let hit = table.project(Vec2::new(9.0, 0.0), 0.0, 0.3);
        assert!(hit.t <= 0.3);
    }

    #[test]
    fn test_project_swapped_range() {
        let table = straight_line();
        let a = table.project(Vec2::new(7.0, 2.0), 0.2, 0.9);
        let b = table.project(Vec2::new(7.0, 2.0), 0.9, 0.2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_project_beyond_ends() {
        let table = straight_line();
        let before = table.project(Vec2::new(-4.0, 0.0), 0.0, 1.0);
        assert_eq!(before.t, 0.0);
        assert!((before.distance - 4.0).abs() < 1e-4);

        let after = table.project(Vec2::new(13.0, 4.0), 0.0, 1.0);
        assert_eq!(after.t, 1.0);
        assert!((after.distance - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_project_degenerate_chord() {
        // Every sample sits on the same spot
        let table = ArcLengthTable::compute(
            &[Knot::corner(Vec2::ONE), Knot::corner(Vec2::ONE)],
            16,
        );
        let hit = table.project(Vec2::new(4.0, 5.0), 0.0, 1.0);
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!(hit.t >= 0.0 && hit.t <= 1.0);
    }

    #[test]
    fn test_project_without_geometry() {
        let table = ArcLengthTable::compute(&[Knot::corner(Vec2::ONE)], 16);
        let hit = table.project(Vec2::ZERO, 0.0, 1.0);
        assert_eq!(hit, Projection::NONE);
        assert!(!hit.is_hit());
    }

    #[test]
    fn test_project_mapped_scales_distance() {
        let table = straight_line();
        let hit = table.project_mapped(Vec2::new(10.0, 3.0), 0.0, 1.0, |p| p * 2.0);
        assert!((hit.t - 0.5).abs() < 1e-3);
        assert!((hit.distance - 3.0).abs() < 1e-3);
    }
}
