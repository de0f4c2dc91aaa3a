//! # bevy_rect_spline
//!
//! A Bevy plugin for 2D cubic Bézier splines that live in a normalized unit
//! square and are mapped into a host rectangle, typically a UI node.
//!
//! ## Features
//!
//! - Piecewise cubic Bézier evaluation from knots with tangent handles
//! - Lazily baked arc length tables for uniform-speed traversal
//! - Nearest-point projection against the baked curve
//! - Normalized ↔ local rectangle mapping
//! - Animated decorations spaced evenly along a curve inside a UI node
//! - Debug gizmos (behind the default `editor` feature)
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_rect_spline::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SplinePlugin)
//!         .add_plugins(SplineDecorationPlugin) // Optional: animated decorations
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn(Camera2d);
//!
//!     commands.spawn((
//!         Node {
//!             width: Val::Px(600.0),
//!             height: Val::Px(300.0),
//!             ..default()
//!         },
//!         Spline::new(vec![
//!             Knot::new(Vec2::new(0.0, 0.8), Vec2::ZERO, Vec2::new(0.2, -0.6)),
//!             Knot::smooth(Vec2::new(0.5, 0.5), Vec2::new(0.2, 0.0)),
//!             Knot::new(Vec2::new(1.0, 0.2), Vec2::new(-0.2, 0.6), Vec2::ZERO),
//!         ]),
//!         SplineDecorations::new(0.08, 0.04).with_speed(0.05),
//!     ));
//! }
//! ```
//!
//! ## Queries
//!
//! Length and projection queries take `&mut Spline` because they rebuild
//! the arc length table on demand after the knots change. Inside systems,
//! use `bypass_change_detection()` for these reads so they do not look like
//! edits:
//!
//! ```ignore
//! fn report(mut splines: Query<&mut Spline>) {
//!     for mut spline in &mut splines {
//!         let spline = spline.bypass_change_detection();
//!         let t = spline.distance_fraction_to_parameter(0.5);
//!         info!("halfway at t = {t}, length {}", spline.total_length());
//!     }
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`SplinePlugin`]: Core types and reflection registration (required)
//! - [`SplineDecorationPlugin`]: Animated decorations along splines (optional)
//! - [`SplineDebugPlugin`]: Gizmo drawing for `SplineRect` hosts (optional)

pub mod decoration;
pub mod error;
pub mod mapping;
pub mod spline;

#[cfg(feature = "editor")]
pub mod editor;

pub use decoration::SplineDecorationPlugin;
pub use spline::SplinePlugin;

#[cfg(feature = "editor")]
pub use editor::SplineDebugPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::decoration::{
        DecorationElement, DecorationEvent, DecorationEventKind, DecorationOrientation,
        DecorationState, LoopMode, SplineDecorationPlugin, SplineDecorations,
    };
    pub use crate::error::ConfigError;
    pub use crate::mapping::{CoordinateMapper, SplineRect};
    pub use crate::spline::{
        ArcLengthTable, CurveEvaluator, Knot, Projection, Spline, SplinePlugin,
        DEFAULT_ARC_LENGTH_SAMPLES,
    };

    #[cfg(feature = "editor")]
    pub use crate::editor::{DebugDrawSettings, SplineDebugPlugin};
}
