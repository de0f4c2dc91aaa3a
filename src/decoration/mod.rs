mod components;
mod layout;
mod systems;

pub use components::*;
pub use layout::{handle_bounds, layout_decorations, slot_count, DecorationPlacement};

use bevy::prelude::*;

use crate::spline::SplinePlugin;

/// Plugin for animated decorations laid out along splines inside UI nodes.
///
/// # Usage
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_rect_spline::prelude::*;
///
/// fn setup(mut commands: Commands) {
///     commands.spawn(Camera2d);
///
///     commands.spawn((
///         Node {
///             width: Val::Px(400.0),
///             height: Val::Px(200.0),
///             ..default()
///         },
///         Spline::from_points([Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5)]),
///         SplineDecorations::new(0.1, 0.05)
///             .with_speed(0.05)
///             .with_color(Color::srgb(1.0, 0.8, 0.2)),
///     ));
/// }
/// ```
///
/// # Animation
///
/// The offset moves by `speed` units per second and is bounded by one
/// spacing. `LoopMode::Loop` wraps it, so elements stream along the curve
/// without a visible seam.
///
/// # Change tracking
///
/// The element count is recomputed when the spline's
/// [`generation`](crate::spline::Spline::generation) or the track's spacing,
/// interval or resolution changes. Positions refresh every frame.
pub struct SplineDecorationPlugin;

impl Plugin for SplineDecorationPlugin {
    fn build(&self, app: &mut App) {
        // Ensure SplinePlugin is added
        if !app.is_plugin_added::<SplinePlugin>() {
            app.add_plugins(SplinePlugin);
        }

        app.register_type::<SplineDecorations>()
            .register_type::<LoopMode>()
            .register_type::<DecorationState>()
            .register_type::<DecorationOrientation>()
            .register_type::<DecorationElement>()
            .init_resource::<systems::ReportedConfigErrors>()
            .add_message::<DecorationEvent>()
            .add_systems(
                Update,
                (
                    systems::validate_decorations,
                    systems::animate_decorations,
                    systems::update_decorations,
                    systems::cleanup_decorations,
                )
                    .chain(),
            );
    }
}
