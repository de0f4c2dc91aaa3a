//! Placement math for decoration tracks, independent of the ECS.

use bevy::prelude::*;

use crate::mapping::CoordinateMapper;
use crate::spline::Spline;

use super::{DecorationEventKind, DecorationOrientation, LoopMode, SplineDecorations};

/// Where one decoration element goes, in the host rectangle's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationPlacement {
    /// Element center.
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Element diameter.
    pub diameter: f32,
    /// Curve parameter of the element.
    pub t: f32,
    /// False when the slot has slid past the end of the interval.
    pub visible: bool,
}

/// Number of element slots for a decorated span of arc length.
///
/// One more than fits end to end, so a slot is always entering while the
/// offset animates.
pub fn slot_count(span: f32, spacing: f32) -> usize {
    if span <= 0.0 || spacing <= 0.0 {
        return 0;
    }
    (span / spacing + SLOT_TOLERANCE).floor() as usize + 1
}

/// Fraction of a spacing forgiven when fitting slots into a span, so
/// baked lengths a hair short of an exact multiple keep their last slot.
const SLOT_TOLERANCE: f32 = 1e-4;

/// Compute element placements for a track, reusing `out`.
///
/// Element `i` sits at arc length `start + offset + i * spacing` from the
/// start of the curve. Slots beyond the end of the interval are kept but
/// marked invisible so the element count stays stable while animating.
pub fn layout_decorations(
    spline: &mut Spline,
    rect: Rect,
    decorations: &SplineDecorations,
    out: &mut Vec<DecorationPlacement>,
) {
    out.clear();

    let total = spline.total_length();
    let spacing = decorations.effective_spacing();
    let (start, end) = decorations.effective_interval();
    let start_distance = start * total;
    let end_distance = end * total;
    let slots = slot_count(end_distance - start_distance, spacing);

    let diameter = CoordinateMapper::to_local_scalar(decorations.effective_size(), rect);
    let offset = decorations.offset.clamp(0.0, spacing);

    for i in 0..slots {
        let distance = start_distance + offset + i as f32 * spacing;
        let visible = distance <= end_distance + spacing * SLOT_TOLERANCE;
        let t = spline.distance_to_parameter(distance);

        let position = CoordinateMapper::to_local(spline.evaluate_position(t), rect);
        let rotation = match decorations.orientation {
            DecorationOrientation::PositionOnly => 0.0,
            DecorationOrientation::AlignToTangent => {
                let tangent = CoordinateMapper::to_local_tangent(spline.evaluate_tangent(t), rect);
                if tangent.length_squared() > 1e-12 {
                    tangent.to_angle()
                } else {
                    0.0
                }
            }
        };

        out.push(DecorationPlacement {
            position,
            rotation,
            diameter,
            t,
            visible,
        });
    }
}

/// Handle offset bounds based on loop mode.
/// Returns (new_offset, new_direction, optional_event).
pub fn handle_bounds(
    offset: f32,
    direction: f32,
    bound: f32,
    loop_mode: LoopMode,
) -> (f32, f32, Option<DecorationEventKind>) {
    if bound <= 0.0 {
        return (0.0, direction, None);
    }

    match loop_mode {
        LoopMode::Once => {
            if offset >= bound {
                (bound, direction, Some(DecorationEventKind::Finished))
            } else if offset <= 0.0 {
                (0.0, direction, Some(DecorationEventKind::Finished))
            } else {
                (offset, direction, None)
            }
        }
        LoopMode::Loop => {
            if offset >= bound || offset < 0.0 {
                (
                    offset.rem_euclid(bound),
                    direction,
                    Some(DecorationEventKind::Wrapped),
                )
            } else {
                (offset, direction, None)
            }
        }
        LoopMode::PingPong => {
            if offset >= bound {
                // Bounce back
                let overshoot = offset - bound;
                (
                    (bound - overshoot).max(0.0),
                    -direction,
                    Some(DecorationEventKind::ReachedEnd),
                )
            } else if offset <= 0.0 {
                // Bounce forward
                let overshoot = -offset;
                (
                    overshoot.min(bound),
                    -direction,
                    Some(DecorationEventKind::ReachedStart),
                )
            } else {
                (offset, direction, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::Knot;

    fn horizontal() -> Spline {
        Spline::from_points([Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5)])
    }

    #[test]
    fn test_slot_count() {
        assert_eq!(slot_count(1.0, 0.25), 5);
        assert_eq!(slot_count(1.0, 0.3), 4);
        assert_eq!(slot_count(0.0, 0.1), 0);
        assert_eq!(slot_count(1.0, 0.0), 0);
    }

    #[test]
    fn test_even_spacing_in_rect() {
        let mut spline = horizontal();
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let deco = SplineDecorations::new(0.25, 0.1);
        let mut out = Vec::new();
        layout_decorations(&mut spline, rect, &deco, &mut out);

        assert_eq!(out.len(), 5);
        for (i, placement) in out.iter().enumerate() {
            assert!((placement.position.x - 50.0 * i as f32).abs() < 0.5);
            assert!((placement.position.y - 50.0).abs() < 1e-3);
            // Smaller side of the rect scales the size
            assert!((placement.diameter - 10.0).abs() < 1e-4);
            assert!(placement.rotation.abs() < 1e-3);
            assert!(placement.visible);
        }
    }

    #[test]
    fn test_interval_and_offset() {
        let mut spline = horizontal();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut deco = SplineDecorations::new(0.2, 0.05).with_interval(0.5, 1.0);
        deco.offset = 0.1;
        let mut out = Vec::new();
        layout_decorations(&mut spline, rect, &deco, &mut out);

        // Span 0.5 gives 3 slots at 0.6, 0.8 and 1.0
        assert_eq!(out.len(), 3);
        assert!((out[0].position.x - 60.0).abs() < 0.3);
        assert!((out[1].position.x - 80.0).abs() < 0.3);
        assert!((out[2].position.x - 100.0).abs() < 1e-3);
        assert!(out.iter().all(|p| p.t >= 0.5 && p.visible));
    }

    #[test]
    fn test_slot_past_end_is_hidden() {
        let mut spline = horizontal();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut deco = SplineDecorations::new(0.3, 0.05);
        deco.offset = 0.2;
        let mut out = Vec::new();
        layout_decorations(&mut spline, rect, &deco, &mut out);

        // Slots at 0.2, 0.5, 0.8, 1.1
        assert_eq!(out.len(), 4);
        assert!(out[..3].iter().all(|p| p.visible));
        assert!(!out[3].visible);
        assert_eq!(out[3].t, 1.0);
    }

    #[test]
    fn test_rotation_follows_mapped_tangent() {
        let mut spline = Spline::new(vec![
            Knot::new(Vec2::ZERO, Vec2::ZERO, Vec2::new(0.25, 0.25)),
            Knot::new(Vec2::ONE, Vec2::new(-0.25, -0.25), Vec2::ZERO),
        ]);
        let mut out = Vec::new();
        let deco = SplineDecorations::new(0.5, 0.1);

        layout_decorations(&mut spline, Rect::new(0.0, 0.0, 10.0, 10.0), &deco, &mut out);
        assert!((out[1].rotation - std::f32::consts::FRAC_PI_4).abs() < 1e-3);

        // Wide rect flattens the angle
        layout_decorations(&mut spline, Rect::new(0.0, 0.0, 40.0, 10.0), &deco, &mut out);
        assert!((out[1].rotation - (0.25f32).atan()).abs() < 1e-3);

        let deco = deco.with_orientation(DecorationOrientation::PositionOnly);
        layout_decorations(&mut spline, Rect::new(0.0, 0.0, 40.0, 10.0), &deco, &mut out);
        assert!(out.iter().all(|p| p.rotation == 0.0));
    }

    #[test]
    fn test_degenerate_spline_has_no_slots() {
        let mut spline = Spline::from_points([Vec2::ONE]);
        let mut out = vec![DecorationPlacement {
            position: Vec2::ZERO,
            rotation: 0.0,
            diameter: 1.0,
            t: 0.0,
            visible: true,
        }];
        layout_decorations(
            &mut spline,
            Rect::new(0.0, 0.0, 1.0, 1.0),
            &SplineDecorations::default(),
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_handle_bounds_loop() {
        let (offset, dir, event) = handle_bounds(0.25, 1.0, 0.1, LoopMode::Loop);
        assert!((offset - 0.05).abs() < 1e-6);
        assert_eq!(dir, 1.0);
        assert_eq!(event, Some(DecorationEventKind::Wrapped));

        let (offset, _, event) = handle_bounds(-0.02, 1.0, 0.1, LoopMode::Loop);
        assert!((offset - 0.08).abs() < 1e-6);
        assert_eq!(event, Some(DecorationEventKind::Wrapped));

        assert_eq!(handle_bounds(0.05, 1.0, 0.1, LoopMode::Loop), (0.05, 1.0, None));
    }

    #[test]
    fn test_handle_bounds_ping_pong() {
        let (offset, dir, event) = handle_bounds(0.12, 1.0, 0.1, LoopMode::PingPong);
        assert!((offset - 0.08).abs() < 1e-6);
        assert_eq!(dir, -1.0);
        assert_eq!(event, Some(DecorationEventKind::ReachedEnd));

        let (offset, dir, event) = handle_bounds(-0.03, -1.0, 0.1, LoopMode::PingPong);
        assert!((offset - 0.03).abs() < 1e-6);
        assert_eq!(dir, 1.0);
        assert_eq!(event, Some(DecorationEventKind::ReachedStart));
    }

    #[test]
    fn test_handle_bounds_once() {
        assert_eq!(
            handle_bounds(0.2, 1.0, 0.1, LoopMode::Once),
            (0.1, 1.0, Some(DecorationEventKind::Finished))
        );
        assert_eq!(handle_bounds(0.04, 1.0, 0.1, LoopMode::Once), (0.04, 1.0, None));
    }
}
