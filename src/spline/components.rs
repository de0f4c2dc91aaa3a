use bevy::prelude::*;

use crate::mapping::CoordinateMapper;

use super::arc_length::ArcLengthTable;
use super::cache::CachedDerived;
use super::projection::Projection;
use super::types::{CurveEvaluator, Knot};

/// A 2D piecewise cubic Bézier spline in normalized (unit square) space.
///
/// The arc length table is derived state. Editing knots only marks it
/// stale; it is rebuilt by the next query that needs it. Every edit also
/// bumps [`generation`](Self::generation), which consumers compare against
/// a stored value to notice that their own derived data is out of date.
///
/// Only the knot list is reflected, so scenes store nothing else. Knots
/// written through reflection bypass the editing methods; they are picked
/// up by [`sync_knots`](Self::sync_knots), which length queries and
/// [`SplinePlugin`](super::SplinePlugin) both run.
#[derive(Component, Debug, Clone, Reflect, Default)]
#[reflect(Component, Default)]
pub struct Spline {
    knots: Vec<Knot>,
    #[reflect(ignore)]
    generation: u64,
    /// Knots as of the last recorded edit.
    #[reflect(ignore)]
    synced_knots: Vec<Knot>,
    #[reflect(ignore)]
    lut: CachedDerived<ArcLengthTable>,
}

impl Spline {
    /// Create a new spline from knots.
    pub fn new(knots: Vec<Knot>) -> Self {
        Self {
            synced_knots: knots.clone(),
            knots,
            ..default()
        }
    }

    /// Create a spline through the given points with zero-length handles.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self::new(points.into_iter().map(Knot::corner).collect())
    }

    /// Set the number of arc length table intervals.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.set_resolution(resolution);
        self
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Counter incremented on every knot edit.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Check if the spline has at least one segment.
    pub fn is_valid(&self) -> bool {
        self.knots.len() >= 2
    }

    pub fn segment_count(&self) -> usize {
        self.knots.segment_count()
    }

    /// Evaluate the spline at parameter t.
    pub fn evaluate_position(&self, t: f32) -> Vec2 {
        self.knots.evaluate_position(t)
    }

    /// Evaluate the raw tangent at parameter t.
    pub fn evaluate_tangent(&self, t: f32) -> Vec2 {
        self.knots.evaluate_tangent(t)
    }

    /// Sample `intervals + 1` exact positions at uniform t.
    pub fn sample(&self, intervals: usize) -> Vec<Vec2> {
        if !self.is_valid() || intervals == 0 {
            return Vec::new();
        }

        (0..=intervals)
            .map(|i| self.evaluate_position(i as f32 / intervals as f32))
            .collect()
    }

    // Knot editing

    /// Replace all knots.
    pub fn set_knots(&mut self, knots: Vec<Knot>) {
        self.knots = knots;
        self.mark_changed();
    }

    /// Mutable access to the knot list. Counts as an edit.
    pub fn knots_mut(&mut self) -> &mut Vec<Knot> {
        self.mark_changed();
        &mut self.knots
    }

    /// Append a knot.
    pub fn push_knot(&mut self, knot: Knot) {
        self.knots.push(knot);
        self.mark_changed();
    }

    /// Insert a knot at the given index.
    pub fn insert_knot(&mut self, index: usize, knot: Knot) {
        if index <= self.knots.len() {
            self.knots.insert(index, knot);
            self.mark_changed();
        }
    }

    /// Remove the knot at the given index.
    pub fn remove_knot(&mut self, index: usize) -> Option<Knot> {
        if index < self.knots.len() {
            let knot = self.knots.remove(index);
            self.mark_changed();
            Some(knot)
        } else {
            None
        }
    }

    /// Overwrite the knot at the given index. Returns false if out of range.
    pub fn set_knot(&mut self, index: usize, knot: Knot) -> bool {
        let Some(slot) = self.knots.get_mut(index) else {
            return false;
        };
        *slot = knot;
        self.mark_changed();
        true
    }

    /// Record knots changed without the editing methods, e.g. by a
    /// reflection `apply` or a scene load. Returns true if they changed.
    pub fn sync_knots(&mut self) -> bool {
        if self.knots == self.synced_knots {
            return false;
        }
        self.mark_changed();
        true
    }

    fn mark_changed(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.synced_knots.clone_from(&self.knots);
        self.lut.invalidate();
    }

    // Arc length queries

    /// Number of arc length table intervals.
    pub fn resolution(&self) -> usize {
        self.lut.peek().resolution()
    }

    /// Change the arc length table resolution. The table is rebuilt lazily.
    pub fn set_resolution(&mut self, resolution: usize) {
        if resolution != self.resolution() {
            self.lut.value_mut().set_resolution(resolution);
        }
    }

    /// The arc length table, rebuilt first if the knots changed.
    pub fn arc_length_table(&mut self) -> &ArcLengthTable {
        self.sync_knots();
        let knots = &self.knots;
        self.lut.get_or_rebuild(|table| table.rebuild(knots))
    }

    /// The arc length table if it is up to date.
    pub fn baked(&self) -> Option<&ArcLengthTable> {
        self.lut.get().filter(|_| self.knots == self.synced_knots)
    }

    /// Whether the next length query will rebuild the table.
    pub fn needs_rebuild(&self) -> bool {
        !self.lut.is_valid() || self.knots != self.synced_knots
    }

    pub fn total_length(&mut self) -> f32 {
        self.arc_length_table().total_length()
    }

    pub fn distance_to_parameter(&mut self, distance: f32) -> f32 {
        self.arc_length_table().distance_to_parameter(distance)
    }

    pub fn distance_fraction_to_parameter(&mut self, fraction: f32) -> f32 {
        self.arc_length_table()
            .distance_fraction_to_parameter(fraction)
    }

    pub fn parameter_to_distance_fraction(&mut self, t: f32) -> f32 {
        self.arc_length_table().parameter_to_distance_fraction(t)
    }

    /// Approximate position at t from the baked samples.
    pub fn baked_position_at(&mut self, t: f32) -> Vec2 {
        self.arc_length_table().baked_position_at(t)
    }

    /// Closest point on the curve to `point` within `[min_t, max_t]`.
    pub fn project(&mut self, point: Vec2, min_t: f32, max_t: f32) -> Projection {
        self.arc_length_table().project(point, min_t, max_t)
    }

    /// Like [`project`](Self::project) for a point in a host rectangle's
    /// local space. The distance is in local units.
    pub fn project_in_rect(
        &mut self,
        local: Vec2,
        rect: Rect,
        min_t: f32,
        max_t: f32,
    ) -> Projection {
        self.arc_length_table()
            .project_mapped(local, min_t, max_t, |p| CoordinateMapper::to_local(p, rect))
    }
}

impl From<Vec<Knot>> for Spline {
    fn from(knots: Vec<Knot>) -> Self {
        Self::new(knots)
    }
}

#[cfg(test)]
mod tests {
    use bevy::reflect::PartialReflect;

    use super::*;

    fn line() -> Spline {
        Spline::from_points([Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)])
    }

    #[test]
    fn test_line_scenario() {
        let mut spline = line();
        assert!((spline.evaluate_position(0.5) - Vec2::new(5.0, 0.0)).length() < 1e-5);
        assert!((spline.total_length() - 10.0).abs() < 1e-3);
        assert!((spline.distance_to_parameter(5.0) - 0.5).abs() < 1e-3);

        let hit = spline.project(Vec2::new(5.0, 1.0), 0.0, 1.0);
        assert!((hit.t - 0.5).abs() < 1e-3);
        assert!((hit.distance - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_spline() {
        let mut spline = Spline::default();
        assert_eq!(spline.evaluate_position(0.5), Vec2::ZERO);
        assert_eq!(spline.total_length(), 0.0);
        assert_eq!(spline.distance_to_parameter(1.0), 0.0);
        assert!(!spline.project(Vec2::ONE, 0.0, 1.0).is_hit());
        assert!(spline.sample(8).is_empty());
    }

    #[test]
    fn test_rebuild_is_lazy() {
        let mut spline = line();
        assert!(spline.needs_rebuild());
        assert!(spline.baked().is_none());

        spline.total_length();
        assert!(!spline.needs_rebuild());

        spline.push_knot(Knot::corner(Vec2::new(10.0, 5.0)));
        // Editing only invalidates
        assert!(spline.needs_rebuild());
        assert!((spline.total_length() - 15.0).abs() < 0.05);
        assert!(spline.baked().is_some());
    }

    #[test]
    fn test_generation_tracks_edits() {
        let mut spline = line();
        let start = spline.generation();

        spline.total_length();
        spline.evaluate_position(0.3);
        assert_eq!(spline.generation(), start);

        spline.insert_knot(1, Knot::corner(Vec2::new(5.0, 5.0)));
        assert_eq!(spline.generation(), start + 1);

        // Out of range edits are ignored
        spline.insert_knot(10, Knot::default());
        assert!(!spline.set_knot(10, Knot::default()));
        assert!(spline.remove_knot(10).is_none());
        assert_eq!(spline.generation(), start + 1);

        assert!(spline.set_knot(0, Knot::corner(Vec2::new(0.0, 1.0))));
        assert_eq!(spline.remove_knot(1), Some(Knot::corner(Vec2::new(5.0, 5.0))));
        spline.knots_mut()[0].tangent_out = Vec2::X;
        assert_eq!(spline.generation(), start + 4);
        assert_eq!(spline.knots().len(), 2);
    }

    #[test]
    fn test_resolution_change_rebuilds() {
        let mut spline = line().with_resolution(16);
        assert_eq!(spline.resolution(), 16);
        assert_eq!(spline.arc_length_table().positions().len(), 17);

        spline.set_resolution(32);
        assert!(spline.needs_rebuild());
        assert_eq!(spline.resolution(), 32);
        assert_eq!(spline.arc_length_table().positions().len(), 33);

        spline.set_resolution(32);
        assert!(!spline.needs_rebuild());
    }

    #[test]
    fn test_project_in_rect() {
        let mut spline = Spline::from_points([Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5)]);
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let hit = spline.project_in_rect(Vec2::new(50.0, 35.0), rect, 0.0, 1.0);
        assert!((hit.t - 0.5).abs() < 1e-3);
        assert!((hit.distance - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_reflection_apply_invalidates_table() {
        let mut spline = line();
        assert!((spline.total_length() - 10.0).abs() < 1e-3);
        let start = spline.generation();

        let longer = Spline::from_points([Vec2::new(0.0, 0.0), Vec2::new(30.0, 0.0)]);
        spline.apply(longer.as_partial_reflect());
        assert_eq!(spline.knots()[1].position, Vec2::new(30.0, 0.0));
        assert!(spline.needs_rebuild());
        assert!(spline.baked().is_none());

        assert!((spline.total_length() - 30.0).abs() < 1e-3);
        assert_eq!(spline.generation(), start + 1);
        assert!(!spline.sync_knots());
    }

    #[test]
    fn test_plugin_syncs_reflected_knots() {
        let mut app = App::new();
        app.add_plugins(crate::spline::SplinePlugin);
        let entity = app.world_mut().spawn(line()).id();
        app.update();
        assert_eq!(app.world().get::<Spline>(entity).map(Spline::generation), Some(0));

        let longer = Spline::from_points([Vec2::new(0.0, 0.0), Vec2::new(30.0, 0.0)]);
        if let Some(mut spline) = app.world_mut().get_mut::<Spline>(entity) {
            spline.apply(longer.as_partial_reflect());
        }
        app.update();

        let spline = app.world().get::<Spline>(entity).unwrap();
        assert_eq!(spline.generation(), 1);
        assert!(spline.needs_rebuild());
    }

    #[test]
    fn test_single_knot() {
        let mut spline = Spline::from_points([Vec2::new(3.0, 4.0)]);
        for t in [0.0, 0.5, 1.0] {
            assert_eq!(spline.evaluate_position(t), Vec2::new(3.0, 4.0));
        }
        assert_eq!(spline.baked_position_at(0.5), Vec2::new(3.0, 4.0));
        assert_eq!(spline.segment_count(), 0);
    }
}
