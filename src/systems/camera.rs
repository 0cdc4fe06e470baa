//! Camera matrix derivation.
//!
//! A camera's view depends on its authored [`OrthographicCamera2D`] framing
//! and on where its entity sits in the hierarchy:
//!
//! ```text
//! world_to_view = ortho(left, right, bottom, top) * world_to_local(entity)
//! view_to_world = inverse(world_to_view)
//! ```
//!
//! # Schedule position
//!
//! Runs **after** transform propagation; the owning entity's
//! [`Transformation`](crate::components::transformation::Transformation)
//! must already be committed.

use bevy_ecs::prelude::*;
use glam::{Mat4, Vec2, Vec4};
use log::{trace, warn};

use crate::components::camera::{Camera, OrthographicCamera2D};
use crate::math::is_singular;
use crate::systems::hierarchy::children_of;
use crate::systems::propagate_transforms::nearest_transformation;

/// Standard orthographic projection of the camera rectangle onto `[-1, 1]^2`.
pub fn orthographic_projection(camera: &OrthographicCamera2D) -> Mat4 {
    let OrthographicCamera2D {
        left,
        right,
        top,
        bottom,
    } = *camera;
    let width = right - left;
    let height = top - bottom;
    Mat4::from_cols(
        Vec4::new(2.0 / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 / height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(-(right + left) / width, -(top + bottom) / height, 0.0, 1.0),
    )
}

/// Recompute the [`Camera`] matrices of `entity` from its framing.
///
/// Does nothing if the entity lacks either camera component.
pub fn commit_camera(world: &mut World, entity: Entity) {
    let Some(framing) = world.get::<OrthographicCamera2D>(entity).copied() else {
        return;
    };
    let world_to_local = nearest_transformation(world, entity).world_to_local;
    let world_to_view = orthographic_projection(&framing) * world_to_local;
    if is_singular(&world_to_view) {
        warn!("camera {:?} has a degenerate view rectangle", entity);
    }
    if let Some(mut camera) = world.get_mut::<Camera>(entity) {
        camera.world_to_view = world_to_view;
        camera.view_to_world = world_to_view.inverse();
    }
}

/// Commit every camera in `entity`'s subtree, `entity` included, parents
/// before children. Transforms in the subtree must already be committed.
pub fn commit_cameras_below(world: &mut World, entity: Entity) {
    let mut pending = vec![entity];
    while let Some(current) = pending.pop() {
        commit_camera(world, current);
        pending.extend(children_of(world, current).into_iter().rev());
    }
}

/// Commit every camera in entity order.
pub fn propagate_cameras(world: &mut World) {
    let mut query = world.query_filtered::<Entity, (With<Camera>, With<OrthographicCamera2D>)>();
    let mut cameras: Vec<Entity> = query.iter(world).collect();
    cameras.sort();
    trace!("committing {} cameras", cameras.len());
    for camera in cameras {
        commit_camera(world, camera);
    }
}

/// Map a view-space point through `camera`'s `view_to_world`.
pub fn view_to_world_point(world: &World, camera: Entity, view: Vec2) -> Option<Vec4> {
    world
        .get::<Camera>(camera)
        .map(|c| c.view_to_world * Vec4::new(view.x, view.y, 0.0, 1.0))
}
