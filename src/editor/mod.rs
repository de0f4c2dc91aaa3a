mod gizmos;

use bevy::{gizmos::config::GizmoConfigStore, prelude::*};

/// Settings for spline debug drawing.
#[derive(Resource, Debug, Clone)]
pub struct DebugDrawSettings {
    /// Whether to draw anything at all.
    pub show_gizmos: bool,
    /// Whether to draw knot tangent handles.
    pub show_handles: bool,
    /// Whether to draw a tick at every baked arc length sample.
    pub show_samples: bool,
    /// Radius of knot circles, in local units.
    pub knot_radius: f32,
    /// Length of sample ticks, in local units.
    pub sample_tick: f32,
    /// Line width for curves and handles.
    pub line_width: f32,
    /// Color of the baked curve.
    pub curve_color: Color,
    /// Color of knots.
    pub knot_color: Color,
    /// Color of handle lines and handle ends.
    pub handle_color: Color,
    /// Color of sample ticks.
    pub sample_color: Color,
    /// Color of the host rectangle outline.
    pub rect_color: Color,
}

impl Default for DebugDrawSettings {
    fn default() -> Self {
        Self {
            show_gizmos: true,
            show_handles: true,
            show_samples: false,
            knot_radius: 4.0,
            sample_tick: 3.0,
            line_width: 2.0,
            curve_color: Color::srgb(1.0, 0.8, 0.2),
            knot_color: Color::srgb(0.3, 0.3, 0.8),
            handle_color: Color::srgba(0.6, 0.6, 0.6, 0.5),
            sample_color: Color::srgb(0.4, 0.8, 0.4),
            rect_color: Color::srgba(1.0, 1.0, 1.0, 0.15),
        }
    }
}

impl DebugDrawSettings {
    /// Toggle gizmo visibility.
    pub fn toggle_gizmos(&mut self) {
        self.show_gizmos = !self.show_gizmos;
    }
}

/// System to sync debug settings to gizmo config.
fn sync_gizmo_config(
    settings: Res<DebugDrawSettings>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = settings.line_width;
}

/// Plugin that draws splines with `SplineRect` hosts using gizmos.
///
/// Draws the baked curve (the same polyline projection queries use), knots,
/// tangent handles and optionally every arc length sample. Only entities
/// with a [`GlobalTransform`] are drawn; the rectangle is interpreted in the
/// entity's local XY plane.
///
/// ```ignore
/// fn toggle_debug(mut settings: ResMut<DebugDrawSettings>) {
///     settings.toggle_gizmos();
/// }
/// ```
pub struct SplineDebugPlugin;

impl Plugin for SplineDebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugDrawSettings>().add_systems(
            Update,
            (
                sync_gizmo_config.run_if(resource_changed::<DebugDrawSettings>),
                gizmos::render_spline_curves,
                gizmos::render_knots,
            ),
        );
    }
}
