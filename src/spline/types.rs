use bevy::prelude::*;

/// Tangent returned when a curve has fewer than two knots.
pub const DEFAULT_TANGENT: Vec2 = Vec2::X;

/// A control point on a piecewise cubic Bézier curve.
///
/// Tangent handles are offsets relative to `position`. `tangent_in` shapes the
/// segment arriving at this knot, `tangent_out` the segment leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Default)]
pub struct Knot {
    /// Position of the knot, on the curve.
    pub position: Vec2,
    /// Incoming handle, relative to `position`.
    pub tangent_in: Vec2,
    /// Outgoing handle, relative to `position`.
    pub tangent_out: Vec2,
}

impl Knot {
    /// Create a knot with explicit handles.
    pub fn new(position: Vec2, tangent_in: Vec2, tangent_out: Vec2) -> Self {
        Self {
            position,
            tangent_in,
            tangent_out,
        }
    }

    /// Create a knot with zero-length handles.
    pub fn corner(position: Vec2) -> Self {
        Self::new(position, Vec2::ZERO, Vec2::ZERO)
    }

    /// Create a knot with mirrored handles, so the curve passes through smoothly.
    pub fn smooth(position: Vec2, tangent_out: Vec2) -> Self {
        Self::new(position, -tangent_out, tangent_out)
    }

    /// Absolute position of the incoming handle.
    pub fn in_handle(&self) -> Vec2 {
        self.position + self.tangent_in
    }

    /// Absolute position of the outgoing handle.
    pub fn out_handle(&self) -> Vec2 {
        self.position + self.tangent_out
    }
}

/// Trait for evaluating a curve at a normalized parameter.
///
/// `t` spans `0.0..=1.0` across the whole curve. Values outside that range
/// extrapolate along the first or last segment.
pub trait CurveEvaluator {
    /// Evaluate the position at parameter t.
    fn evaluate_position(&self, t: f32) -> Vec2;

    /// Evaluate the raw (unnormalized) derivative at parameter t.
    fn evaluate_tangent(&self, t: f32) -> Vec2;

    /// Get the number of cubic segments in the curve.
    fn segment_count(&self) -> usize;
}

impl CurveEvaluator for [Knot] {
    fn evaluate_position(&self, t: f32) -> Vec2 {
        match self {
            [] => Vec2::ZERO,
            [knot] => knot.position,
            _ => {
                let (segment, local_t) = locate_segment(self.len(), t);
                let [p0, p1, p2, p3] = segment_points(&self[segment], &self[segment + 1]);
                cubic_bezier(p0, p1, p2, p3, local_t)
            }
        }
    }

    fn evaluate_tangent(&self, t: f32) -> Vec2 {
        if self.len() < 2 {
            return DEFAULT_TANGENT;
        }
        let (segment, local_t) = locate_segment(self.len(), t);
        let [p0, p1, p2, p3] = segment_points(&self[segment], &self[segment + 1]);
        cubic_bezier_derivative(p0, p1, p2, p3, local_t)
    }

    fn segment_count(&self) -> usize {
        self.len().saturating_sub(1)
    }
}

/// Map a global parameter to `(segment index, local parameter)`.
///
/// The index is clamped to the valid segment range but the local parameter
/// is not, so out-of-range `t` extrapolates the boundary segment.
/// Requires `knot_count >= 2`.
pub fn locate_segment(knot_count: usize, t: f32) -> (usize, f32) {
    let last_segment = knot_count.saturating_sub(2);
    let t_scaled = t * (knot_count - 1) as f32;
    let segment = t_scaled.floor().clamp(0.0, last_segment as f32) as usize;
    (segment, t_scaled - segment as f32)
}

/// The four Bézier control points of the segment spanning `from` to `to`.
pub fn segment_points(from: &Knot, to: &Knot) -> [Vec2; 4] {
    [from.position, from.out_handle(), to.in_handle(), to.position]
}

pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    p0 * mt3 + p1 * 3.0 * mt2 * t + p2 * 3.0 * mt * t2 + p3 * t3
}

pub fn cubic_bezier_derivative(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    (p1 - p0) * 3.0 * mt2 + (p2 - p1) * 6.0 * mt * t + (p3 - p2) * 3.0 * t2
}
