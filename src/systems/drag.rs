//! Camera panning by dragging empty canvas.
//!
//! Each camera entity with a [`Draggable`] and a [`ViewportBinding`] runs a
//! two-state machine fed by its bound mouse source:
//!
//! - **Idle -> Dragging**: the drag button goes down while the cursor is
//!   over no pickable shape. The cursor and the camera's `(left, bottom)`
//!   are recorded.
//! - **Dragging -> Dragging**: while the button stays down, the cursor's
//!   offset from the recorded origin is mapped to world space (as a
//!   direction) and the camera is moved so that the grabbed point follows
//!   the cursor. The camera is recommitted right away.
//! - **Dragging -> Idle**: the button is released.
//!
//! # Schedule position
//!
//! Runs **after** transforms, cameras and the layer order are committed.
//! Ends the input tick so button edges are measured per tick.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::camera::{Camera, OrthographicCamera2D, ViewportBinding};
use crate::components::draggable::Draggable;
use crate::events::drag::{DragEnded, DragStarted};
use crate::math::transform_vector_2d;
use crate::resources::mouseinput::{MouseInput, PRIMARY_BUTTON};
use crate::resources::sceneconfig::SceneConfig;
use crate::systems::camera::{commit_camera, view_to_world_point};
use crate::systems::picking::query_at;

/// What the bound mouse source looks like this tick.
#[derive(Debug, Clone, Copy)]
struct Pointer {
    cursor: Vec2,
    down: bool,
    pressed: bool,
}

fn pointer(world: &World, source: u32, button: u32) -> Option<Pointer> {
    let channel = world.get_resource::<MouseInput>()?.channel(source)?;
    Some(Pointer {
        cursor: channel.cursor()?,
        down: channel.is_down(button),
        pressed: channel.just_pressed(button),
    })
}

fn start_drag(world: &mut World, camera: Entity, cursor: Vec2) -> Option<()> {
    let grabbed = view_to_world_point(world, camera, cursor)?;
    if !query_at(world, grabbed.x, grabbed.y, grabbed.z, grabbed.w).is_empty() {
        debug!("press on a shape under camera {:?}, not panning", camera);
        return None;
    }
    let camera_origin = world.get::<OrthographicCamera2D>(camera)?.origin();
    world
        .get_mut::<Draggable>(camera)?
        .start(cursor, camera_origin);
    debug!("camera {:?} starts panning at {:?}", camera, cursor);
    world.trigger(DragStarted {
        camera,
        origin: cursor,
    });
    Some(())
}

fn continue_drag(world: &mut World, camera: Entity, cursor: Vec2, drag: Draggable) -> Option<()> {
    let view_to_world = world.get::<Camera>(camera)?.view_to_world;
    let delta = transform_vector_2d(&view_to_world, cursor - drag.origin);
    world
        .get_mut::<OrthographicCamera2D>(camera)?
        .move_origin_to(drag.camera_origin - delta);
    commit_camera(world, camera);
    Some(())
}

fn end_drag(world: &mut World, camera: Entity) -> Option<()> {
    world.get_mut::<Draggable>(camera)?.stop();
    debug!("camera {:?} stops panning", camera);
    world.trigger(DragEnded { camera });
    Some(())
}

/// Advance one camera's drag state machine.
pub fn step_drag(world: &mut World, camera: Entity, source: u32, button: u32) {
    let Some(pointer) = pointer(world, source, button) else {
        return;
    };
    let Some(drag) = world.get::<Draggable>(camera).copied() else {
        return;
    };

    match (drag.dragged, pointer.down) {
        (false, true) if pointer.pressed => {
            start_drag(world, camera, pointer.cursor);
        }
        (true, true) => {
            continue_drag(world, camera, pointer.cursor, drag);
        }
        (true, false) => {
            end_drag(world, camera);
        }
        _ => {}
    }
}

/// Step every draggable camera, then close the input tick.
pub fn drag_cameras(world: &mut World) {
    let button = world
        .get_resource::<SceneConfig>()
        .map_or(PRIMARY_BUTTON, |config| config.drag_button);

    let mut query = world.query_filtered::<(Entity, &ViewportBinding), (
        With<Draggable>,
        With<Camera>,
        With<OrthographicCamera2D>,
    )>();
    let mut cameras: Vec<(Entity, u32)> = query
        .iter(world)
        .map(|(entity, binding)| (entity, binding.source))
        .collect();
    cameras.sort();

    for (camera, source) in cameras {
        step_drag(world, camera, source, button);
    }

    if let Some(mut input) = world.get_resource_mut::<MouseInput>() {
        input.end_tick();
    }
}
