use bevy::prelude::*;

use crate::error::{ConfigError, Result};

/// Smallest spacing used when a configured spacing is not positive.
pub const MIN_SPACING: f32 = 1e-3;

/// Smallest element size used when a configured size is not positive.
pub const MIN_SIZE: f32 = 1e-3;

/// How the animated offset behaves when it reaches one spacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum LoopMode {
    /// Stop after advancing one spacing.
    Once,
    /// Wrap back to zero, so elements stream along the curve seamlessly.
    #[default]
    Loop,
    /// Reverse direction at each end (ping-pong).
    PingPong,
}

/// Current animation state of a decoration track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum DecorationState {
    /// Offset advances every frame.
    #[default]
    Playing,
    /// Offset is frozen.
    Paused,
    /// Offset reached its end (only for LoopMode::Once).
    Finished,
}

/// How to orient decoration elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum DecorationOrientation {
    /// Only set position, keep default rotation.
    PositionOnly,
    /// Rotate elements so their +X axis follows the mapped tangent.
    #[default]
    AlignToTangent,
}

/// Decorative elements laid out along a spline inside a UI node.
///
/// Add this next to a [`Spline`](crate::spline::Spline) on an entity with a
/// [`Node`]. Elements are spawned as absolute-positioned children, spaced
/// evenly by arc length over the fractional interval `[start, end]` and
/// shifted by an animated `offset`.
///
/// Lengths (`spacing`, `size`, `offset`, `speed`) are in the spline's
/// normalized units. `size` is mapped with the smaller side of the node.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component, Default)]
pub struct SplineDecorations {
    /// Arc length between neighbouring elements.
    pub spacing: f32,

    /// Element diameter.
    pub size: f32,

    /// Start of the decorated interval, as a fraction of the total length.
    pub start: f32,

    /// End of the decorated interval, as a fraction of the total length.
    pub end: f32,

    /// Offset advance in normalized units per second. Negative runs backwards.
    pub speed: f32,

    /// Current offset along the interval, in `[0, spacing]`.
    pub offset: f32,

    /// How to handle the offset reaching one spacing.
    pub loop_mode: LoopMode,

    /// Current playback state.
    pub state: DecorationState,

    /// How to orient elements.
    pub orientation: DecorationOrientation,

    /// Fill color of the elements.
    pub color: Color,

    /// Direction of travel: 1.0 forward, -1.0 backward.
    /// Used internally for ping-pong mode.
    pub direction: f32,
}

impl Default for SplineDecorations {
    fn default() -> Self {
        Self {
            spacing: 0.1,
            size: 0.03,
            start: 0.0,
            end: 1.0,
            speed: 0.0,
            offset: 0.0,
            loop_mode: LoopMode::Loop,
            state: DecorationState::Playing,
            orientation: DecorationOrientation::AlignToTangent,
            color: Color::WHITE,
            direction: 1.0,
        }
    }
}

impl SplineDecorations {
    /// Create a track with the given spacing and element size.
    pub fn new(spacing: f32, size: f32) -> Self {
        Self {
            spacing,
            size,
            ..default()
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Restrict elements to a fraction of the curve length.
    pub fn with_interval(mut self, start: f32, end: f32) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_loop_mode(mut self, mode: LoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn with_orientation(mut self, orientation: DecorationOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Start or resume the animation.
    pub fn play(&mut self) {
        self.state = DecorationState::Playing;
    }

    /// Pause the animation.
    pub fn pause(&mut self) {
        self.state = DecorationState::Paused;
    }

    /// Reset the offset and resume.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.direction = 1.0;
        self.state = DecorationState::Playing;
    }

    pub fn is_finished(&self) -> bool {
        self.state == DecorationState::Finished
    }

    /// Check the configuration for values the layout cannot use as-is.
    pub fn validate(&self) -> Result<()> {
        if self.spacing.is_nan() || self.spacing <= 0.0 {
            return Err(ConfigError::NonPositiveSpacing(self.spacing));
        }
        if self.size.is_nan() || self.size <= 0.0 {
            return Err(ConfigError::NonPositiveSize(self.size));
        }
        let (start, end) = (self.start.clamp(0.0, 1.0), self.end.clamp(0.0, 1.0));
        if start.is_nan() || end.is_nan() || end <= start {
            return Err(ConfigError::EmptyInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Spacing clamped to a safe minimum.
    pub fn effective_spacing(&self) -> f32 {
        if self.spacing > MIN_SPACING {
            self.spacing
        } else {
            MIN_SPACING
        }
    }

    /// Size clamped to a safe minimum.
    pub fn effective_size(&self) -> f32 {
        if self.size > MIN_SIZE {
            self.size
        } else {
            MIN_SIZE
        }
    }

    /// Interval clamped to `[0, 1]`. An inverted interval is empty.
    pub fn effective_interval(&self) -> (f32, f32) {
        let start = self.start.clamp(0.0, 1.0);
        let end = self.end.clamp(0.0, 1.0).max(start);
        (start, end)
    }
}

/// Marker component added to spawned decoration elements.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DecorationElement {
    /// The entity holding the [`SplineDecorations`].
    pub track: Entity,
    /// Slot index along the interval.
    pub index: usize,
}

/// Message emitted when a decoration track's offset hits a bound.
#[derive(Message, Debug, Clone)]
pub struct DecorationEvent {
    /// The entity with the SplineDecorations component.
    pub entity: Entity,
    /// The type of event.
    pub kind: DecorationEventKind,
}

/// Types of decoration events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationEventKind {
    /// Offset wrapped around (Loop mode).
    Wrapped,
    /// Offset bounced off the far bound (ping-pong mode).
    ReachedEnd,
    /// Offset bounced off zero (ping-pong mode).
    ReachedStart,
    /// Offset stopped (LoopMode::Once).
    Finished,
}

/// Internal bookkeeping for spawned elements.
#[derive(Component, Debug, Clone, Default)]
pub(crate) struct DecorationTrackState {
    /// Currently spawned element entities, one per slot.
    pub elements: Vec<Entity>,
    /// Spline generation the slot count was computed for.
    pub generation: u64,
    /// Slot count inputs, to detect configuration changes.
    pub spacing: f32,
    pub interval: (f32, f32),
    pub resolution: usize,
    /// Reused layout buffer.
    pub placements: Vec<super::DecorationPlacement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(SplineDecorations::default().validate().is_ok());
        assert_eq!(
            SplineDecorations::new(0.0, 0.1).validate(),
            Err(ConfigError::NonPositiveSpacing(0.0))
        );
        assert_eq!(
            SplineDecorations::new(0.1, -1.0).validate(),
            Err(ConfigError::NonPositiveSize(-1.0))
        );
        assert!(matches!(
            SplineDecorations::default()
                .with_interval(0.7, 0.2)
                .validate(),
            Err(ConfigError::EmptyInterval { .. })
        ));
        assert!(SplineDecorations::new(f32::NAN, 0.1).validate().is_err());
    }

    #[test]
    fn test_effective_values_are_clamped() {
        let deco = SplineDecorations::new(-2.0, 0.0).with_interval(0.8, 0.3);
        assert_eq!(deco.effective_spacing(), MIN_SPACING);
        assert_eq!(deco.effective_size(), MIN_SIZE);
        assert_eq!(deco.effective_interval(), (0.8, 0.8));

        let deco = SplineDecorations::default().with_interval(-1.0, 2.0);
        assert_eq!(deco.effective_interval(), (0.0, 1.0));
    }

    #[test]
    fn test_playback_controls() {
        let mut deco = SplineDecorations::default();
        deco.offset = 0.05;
        deco.direction = -1.0;
        deco.pause();
        assert_eq!(deco.state, DecorationState::Paused);
        deco.state = DecorationState::Finished;
        assert!(deco.is_finished());
        deco.reset();
        assert_eq!(deco.offset, 0.0);
        assert_eq!(deco.direction, 1.0);
        assert_eq!(deco.state, DecorationState::Playing);
    }
}
