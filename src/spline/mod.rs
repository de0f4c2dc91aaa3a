mod arc_length;
mod cache;
mod components;
mod projection;
mod types;

pub use arc_length::*;
pub use cache::CachedDerived;
pub use components::*;
pub use projection::Projection;
pub use types::*;

use bevy::prelude::*;

use crate::mapping::SplineRect;

/// Plugin that registers spline types for reflection/serialization.
/// Decorations and debug drawing live in their own plugins.
pub struct SplinePlugin;

impl Plugin for SplinePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Knot>()
            .register_type::<Spline>()
            .register_type::<SplineRect>()
            .add_systems(PreUpdate, sync_spline_knots);
    }
}

/// Bump the generation of splines whose knots were replaced through
/// reflection (scene spawns, inspectors) since the last frame.
fn sync_spline_knots(mut splines: Query<&mut Spline, Changed<Spline>>) {
    for mut spline in &mut splines {
        // Compare without flagging the component; only real edits are reported
        if spline.bypass_change_detection().sync_knots() {
            debug!("spline knots changed outside the editing API");
        }
    }
}
