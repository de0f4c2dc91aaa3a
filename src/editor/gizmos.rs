//! Spline gizmo rendering.

use bevy::prelude::*;

use crate::mapping::{CoordinateMapper, SplineRect};
use crate::spline::Spline;

use super::DebugDrawSettings;

/// System to render baked spline curves using Bevy gizmos.
///
/// Draws the arc length table's samples rather than resampling the curve,
/// so what is shown is exactly what projection and length queries see.
pub fn render_spline_curves(
    settings: Res<DebugDrawSettings>,
    mut splines: Query<(&mut Spline, &SplineRect, &GlobalTransform)>,
    mut gizmos: Gizmos,
) {
    if !settings.show_gizmos {
        return;
    }

    for (mut spline, rect, global_transform) in &mut splines {
        let rect = rect.0;
        let to_world =
            |p: Vec2| global_transform.transform_point(CoordinateMapper::to_local(p, rect).extend(0.0));

        // Host rectangle outline
        let corners = [
            Vec2::ZERO,
            Vec2::X,
            Vec2::ONE,
            Vec2::Y,
            Vec2::ZERO,
        ];
        gizmos.linestrip(corners.map(to_world), settings.rect_color);

        if !spline.is_valid() {
            continue;
        }

        // Baking is a cache refresh, not an edit
        let table = spline.bypass_change_detection().arc_length_table();
        gizmos.linestrip(
            table.positions().iter().map(|&p| to_world(p)),
            settings.curve_color,
        );

        if settings.show_samples {
            let half_tick = settings.sample_tick * 0.5;
            for &p in table.positions() {
                let local = CoordinateMapper::to_local(p, rect);
                let a = global_transform.transform_point((local - Vec2::Y * half_tick).extend(0.0));
                let b = global_transform.transform_point((local + Vec2::Y * half_tick).extend(0.0));
                gizmos.line(a, b, settings.sample_color);
            }
        }
    }
}

/// System to render knots and their tangent handles.
pub fn render_knots(
    settings: Res<DebugDrawSettings>,
    splines: Query<(&Spline, &SplineRect, &GlobalTransform)>,
    mut gizmos: Gizmos,
) {
    if !settings.show_gizmos {
        return;
    }

    for (spline, rect, global_transform) in &splines {
        let rect = rect.0;
        let (scale, rotation, _) = global_transform.to_scale_rotation_translation();
        let to_world =
            |p: Vec2| global_transform.transform_point(CoordinateMapper::to_local(p, rect).extend(0.0));
        let knot_count = spline.knots().len();

        for (i, knot) in spline.knots().iter().enumerate() {
            let center = to_world(knot.position);

            if settings.show_handles {
                // Tangent handles only shape a segment on that side of the knot
                if i > 0 {
                    let handle = to_world(knot.in_handle());
                    gizmos.line(center, handle, settings.handle_color);
                    gizmos.circle(
                        Isometry3d::new(handle, rotation),
                        settings.knot_radius * 0.5 * scale.x,
                        settings.handle_color,
                    );
                }
                if i + 1 < knot_count {
                    let handle = to_world(knot.out_handle());
                    gizmos.line(center, handle, settings.handle_color);
                    gizmos.circle(
                        Isometry3d::new(handle, rotation),
                        settings.knot_radius * 0.5 * scale.x,
                        settings.handle_color,
                    );
                }
            }

            gizmos.circle(
                Isometry3d::new(center, rotation),
                settings.knot_radius * scale.x,
                settings.knot_color,
            );
        }
    }
}
