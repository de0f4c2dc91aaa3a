//! Example rect spline application.
//!
//! Run with: `cargo run`
//!
//! The top half is a UI node with animated decorations; the bottom half is
//! a world-space spline drawn with debug gizmos that projects the cursor.

use bevy::prelude::*;
use bevy_rect_spline::prelude::*;

/// Marks the world-space spline the cursor is projected onto.
#[derive(Component)]
struct CursorTarget;

/// Parameter range used for cursor projection.
#[derive(Resource)]
struct ProjectionRange {
    min_t: f32,
    max_t: f32,
}

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins)
        .add_plugins(SplinePlugin)
        .add_plugins(SplineDecorationPlugin)
        .insert_resource(ProjectionRange {
            min_t: 0.0,
            max_t: 1.0,
        })
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_keys, project_cursor, report_events));

    #[cfg(feature = "editor")]
    app.add_plugins(SplineDebugPlugin)
        .add_systems(Update, toggle_samples);

    app.run();
}

fn wave_knots() -> Vec<Knot> {
    vec![
        Knot::new(Vec2::new(0.0, 0.8), Vec2::ZERO, Vec2::new(0.15, -0.6)),
        Knot::smooth(Vec2::new(0.35, 0.3), Vec2::new(0.15, 0.0)),
        Knot::smooth(Vec2::new(0.65, 0.7), Vec2::new(0.15, 0.0)),
        Knot::new(Vec2::new(1.0, 0.2), Vec2::new(-0.15, 0.6), Vec2::ZERO),
    ]
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);

    // UI host: decorations stream along the curve inside the node
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(50.0),
            padding: UiRect::all(Val::Px(24.0)),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.03)),
                Spline::new(wave_knots()),
                SplineDecorations::new(0.06, 0.05)
                    .with_speed(0.04)
                    .with_interval(0.1, 0.9)
                    .with_color(Color::srgb(1.0, 0.8, 0.2)),
            ));
        });

    // World-space host: the rect is centered on the entity
    commands.spawn((
        Spline::new(wave_knots()),
        SplineRect::centered(Vec2::new(800.0, 240.0)),
        Transform::from_xyz(0.0, -180.0, 0.0),
        Visibility::default(),
        CursorTarget,
    ));
}

fn handle_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut range: ResMut<ProjectionRange>,
    mut tracks: Query<&mut SplineDecorations>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        for mut decorations in &mut tracks {
            if decorations.state == DecorationState::Playing {
                decorations.pause();
            } else {
                decorations.play();
            }
        }
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        // Toggle between the whole curve and its last 40%
        range.min_t = if range.min_t == 0.0 { 0.6 } else { 0.0 };
        info!("projection range [{}, {}]", range.min_t, range.max_t);
    }
}

#[cfg(feature = "editor")]
fn toggle_samples(keyboard: Res<ButtonInput<KeyCode>>, mut settings: ResMut<DebugDrawSettings>) {
    if keyboard.just_pressed(KeyCode::KeyS) {
        settings.show_samples = !settings.show_samples;
    }
}

fn project_cursor(
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    range: Res<ProjectionRange>,
    mut targets: Query<(&mut Spline, &SplineRect, &GlobalTransform), With<CursorTarget>>,
    mut gizmos: Gizmos,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(world_cursor) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };

    for (mut spline, rect, global_transform) in &mut targets {
        let local = global_transform
            .affine()
            .inverse()
            .transform_point3(world_cursor.extend(0.0))
            .truncate();

        let spline = spline.bypass_change_detection();
        let hit = spline.project_in_rect(local, rect.0, range.min_t, range.max_t);
        if !hit.is_hit() {
            continue;
        }

        let on_curve = CoordinateMapper::to_local(spline.baked_position_at(hit.t), rect.0);
        let on_curve = global_transform.transform_point(on_curve.extend(0.0));
        gizmos.line(world_cursor.extend(0.0), on_curve, Color::srgb(0.9, 0.3, 0.3));
        gizmos.circle_2d(on_curve.truncate(), 5.0, Color::srgb(0.9, 0.3, 0.3));
    }
}

fn report_events(mut events: MessageReader<DecorationEvent>) {
    for event in events.read() {
        if event.kind != DecorationEventKind::Wrapped {
            info!("decorations on {}: {:?}", event.entity, event.kind);
        }
    }
}
