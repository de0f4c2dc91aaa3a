use bevy::ecs::entity::EntityHashSet;
use bevy::prelude::*;
use bevy::ui::{ComputedNode, UiTransform};

use crate::spline::Spline;

use super::layout::{handle_bounds, layout_decorations, slot_count};
use super::{
    DecorationElement, DecorationEvent, DecorationEventKind, DecorationPlacement, DecorationState,
    DecorationTrackState, SplineDecorations,
};

/// Tracks currently known to be misconfigured.
#[derive(Resource, Default, Debug)]
pub(crate) struct ReportedConfigErrors(pub EntityHashSet);

/// Log configuration problems when a track is added or edited.
pub fn validate_decorations(
    tracks: Query<(Entity, &SplineDecorations), Changed<SplineDecorations>>,
    mut removed: RemovedComponents<SplineDecorations>,
    mut reported: ResMut<ReportedConfigErrors>,
) {
    for entity in removed.read() {
        reported.0.remove(&entity);
    }

    for (entity, decorations) in &tracks {
        match decorations.validate() {
            Ok(()) => {
                reported.0.remove(&entity);
            }
            Err(err) => {
                // Offset animation mutates the component every frame; only warn once
                if reported.0.insert(entity) {
                    warn!("decorations on {entity}: {err}; clamping to a safe value");
                }
            }
        }
    }
}

/// Advance the animated offset of every playing track.
pub fn animate_decorations(
    mut tracks: Query<(Entity, &mut SplineDecorations)>,
    time: Res<Time>,
    mut events: MessageWriter<DecorationEvent>,
) {
    let delta = time.delta_secs();

    for (entity, mut decorations) in &mut tracks {
        if decorations.state != DecorationState::Playing || decorations.speed == 0.0 {
            continue;
        }

        let bound = decorations.effective_spacing();
        let new_offset = decorations.offset + decorations.speed * delta * decorations.direction;
        let (offset, direction, event) =
            handle_bounds(new_offset, decorations.direction, bound, decorations.loop_mode);

        decorations.offset = offset;
        decorations.direction = direction;

        if let Some(kind) = event {
            events.write(DecorationEvent { entity, kind });

            if kind == DecorationEventKind::Finished {
                decorations.state = DecorationState::Finished;
            }
        }
    }
}

/// Spawn, despawn and position decoration elements inside their UI host.
pub fn update_decorations(
    mut commands: Commands,
    mut tracks: Query<(
        Entity,
        &mut Spline,
        &SplineDecorations,
        &ComputedNode,
        Option<&mut DecorationTrackState>,
    )>,
    mut elements: Query<
        (
            &mut Node,
            &mut UiTransform,
            &mut Visibility,
            &mut BackgroundColor,
        ),
        With<DecorationElement>,
    >,
) {
    for (entity, mut spline, decorations, computed, state) in &mut tracks {
        let size = computed.size() * computed.inverse_scale_factor();
        if size.x <= 0.0 || size.y <= 0.0 {
            // Layout has not run yet
            continue;
        }
        let rect = Rect::from_corners(Vec2::ZERO, size);

        // Length queries rebuild the baked table in place; that is not an edit
        let spline = spline.bypass_change_detection();
        spline.sync_knots();

        let Some(mut state) = state else {
            let mut state = DecorationTrackState::default();
            layout_decorations(spline, rect, decorations, &mut state.placements);
            state.elements = state
                .placements
                .iter()
                .enumerate()
                .map(|(index, placement)| {
                    spawn_element(&mut commands, entity, index, decorations, placement)
                })
                .collect();
            remember_inputs(&mut state, spline, decorations);
            commands.entity(entity).insert(state);
            continue;
        };

        if needs_relayout(&state, spline, decorations) {
            let total = spline.total_length();
            let (start, end) = decorations.effective_interval();
            let slots = slot_count((end - start) * total, decorations.effective_spacing());

            if slots != state.elements.len() {
                debug!(
                    "decorations on {entity}: {} -> {} elements",
                    state.elements.len(),
                    slots
                );
                for element in state.elements.drain(..) {
                    if let Ok(mut element_commands) = commands.get_entity(element) {
                        element_commands.despawn();
                    }
                }
            }
            remember_inputs(&mut state, spline, decorations);
        }

        let state = state.into_inner();
        layout_decorations(spline, rect, decorations, &mut state.placements);

        if state.elements.len() != state.placements.len() {
            state.elements = state
                .placements
                .iter()
                .enumerate()
                .map(|(index, placement)| {
                    spawn_element(&mut commands, entity, index, decorations, placement)
                })
                .collect();
            continue;
        }

        for (&element, placement) in state.elements.iter().zip(&state.placements) {
            if let Ok((mut node, mut transform, mut visibility, mut color)) =
                elements.get_mut(element)
            {
                apply_placement(&mut node, &mut transform, &mut visibility, placement);
                color.set_if_neq(BackgroundColor(decorations.color));
            }
        }
    }
}

/// Despawn elements when a track is removed.
pub fn cleanup_decorations(
    mut commands: Commands,
    mut removed: RemovedComponents<SplineDecorations>,
    states: Query<&DecorationTrackState>,
    elements: Query<(Entity, &DecorationElement)>,
) {
    for removed_track in removed.read() {
        if let Ok(state) = states.get(removed_track) {
            for &element in &state.elements {
                if let Ok(mut element_commands) = commands.get_entity(element) {
                    element_commands.despawn();
                }
            }
        }

        // Also catch elements the state no longer lists
        for (entity, element) in &elements {
            if element.track == removed_track {
                commands.entity(entity).despawn();
            }
        }

        if let Ok(mut track_commands) = commands.get_entity(removed_track) {
            track_commands.remove::<DecorationTrackState>();
        }
    }
}

fn needs_relayout(
    state: &DecorationTrackState,
    spline: &Spline,
    decorations: &SplineDecorations,
) -> bool {
    state.generation != spline.generation()
        || state.spacing != decorations.effective_spacing()
        || state.interval != decorations.effective_interval()
        || state.resolution != spline.resolution()
}

fn remember_inputs(
    state: &mut DecorationTrackState,
    spline: &Spline,
    decorations: &SplineDecorations,
) {
    state.generation = spline.generation();
    state.spacing = decorations.effective_spacing();
    state.interval = decorations.effective_interval();
    state.resolution = spline.resolution();
}

fn spawn_element(
    commands: &mut Commands,
    track: Entity,
    index: usize,
    decorations: &SplineDecorations,
    placement: &DecorationPlacement,
) -> Entity {
    let mut node = Node {
        position_type: PositionType::Absolute,
        ..default()
    };
    let mut transform = UiTransform::default();
    let mut visibility = Visibility::default();
    apply_placement(&mut node, &mut transform, &mut visibility, placement);

    commands
        .spawn((
            node,
            transform,
            visibility,
            BackgroundColor(decorations.color),
            DecorationElement { track, index },
            ChildOf(track),
        ))
        .id()
}

fn apply_placement(
    node: &mut Node,
    transform: &mut UiTransform,
    visibility: &mut Visibility,
    placement: &DecorationPlacement,
) {
    let radius = placement.diameter * 0.5;
    node.left = Val::Px(placement.position.x - radius);
    node.top = Val::Px(placement.position.y - radius);
    node.width = Val::Px(placement.diameter);
    node.height = Val::Px(placement.diameter);
    transform.rotation = Rot2::radians(placement.rotation);
    *visibility = if placement.visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}
