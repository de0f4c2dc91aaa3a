//! Conversion between a spline's normalized unit square and a host rectangle.
//!
//! The rectangle is always passed explicitly. Positions and tangents scale
//! per axis; scalar lengths use the smaller side so round things stay round.

use bevy::prelude::*;

/// Host rectangle for a spline whose host is not a UI node.
///
/// UI hosts derive their rectangle from the node layout each frame instead.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component, Default)]
pub struct SplineRect(pub Rect);

impl Default for SplineRect {
    fn default() -> Self {
        Self(Rect::new(0.0, 0.0, 1.0, 1.0))
    }
}

impl SplineRect {
    /// Rectangle of the given size with its origin at zero.
    pub fn from_size(size: Vec2) -> Self {
        Self(Rect::from_corners(Vec2::ZERO, size))
    }

    /// Rectangle of the given size centered on zero.
    pub fn centered(size: Vec2) -> Self {
        Self(Rect::from_center_size(Vec2::ZERO, size))
    }
}

/// Stateless mapping functions between normalized and local space.
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Map a normalized position into the rectangle.
    pub fn to_local(normalized: Vec2, rect: Rect) -> Vec2 {
        rect.min + normalized * rect.size()
    }

    /// Map a local position back into normalized space.
    ///
    /// Axes with zero extent map to zero.
    pub fn to_normalized(local: Vec2, rect: Rect) -> Vec2 {
        let size = rect.size();
        let offset = local - rect.min;
        Vec2::new(
            if size.x != 0.0 { offset.x / size.x } else { 0.0 },
            if size.y != 0.0 { offset.y / size.y } else { 0.0 },
        )
    }

    /// Map a normalized length using the smaller side of the rectangle.
    pub fn to_local_scalar(normalized_length: f32, rect: Rect) -> f32 {
        normalized_length * rect.width().min(rect.height())
    }

    /// Map a tangent, scaling each axis independently.
    ///
    /// Matches position mapping, so directions stay consistent with mapped
    /// positions. Angles are not preserved on non-square rectangles.
    pub fn to_local_tangent(tangent: Vec2, rect: Rect) -> Vec2 {
        tangent * rect.size()
    }
}
