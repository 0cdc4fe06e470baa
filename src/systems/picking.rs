//! Point-in-shape queries used for mouse picking.
//!
//! A world-space point is moved into each candidate's local space through
//! its committed `world_to_local` and tested against its [`BoundingShape`].
//! An entity with a shape but no `Transformation` of its own uses its
//! nearest transformed ancestor's frame.

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec4};

use crate::components::boundingshape::BoundingShape;
use crate::resources::layerorder::LayerOrder;
use crate::systems::propagate_transforms::nearest_transformation;

/// Whether the world point `(x, y, z, w)` lies inside `shape_entity`'s shape.
///
/// Entities without a [`BoundingShape`] contain nothing.
pub fn point_inside(world: &World, point: Vec4, shape_entity: Entity) -> bool {
    let Some(shape) = world.get::<BoundingShape>(shape_entity) else {
        return false;
    };
    let local = nearest_transformation(world, shape_entity).world_to_local * point;
    shape.contains_local(Vec2::new(local.x, local.y))
}

/// Every shape containing the world point.
///
/// Results come topmost first when a [`LayerOrder`] is available, otherwise
/// in entity order.
pub fn query_at(world: &mut World, x: f32, y: f32, z: f32, w: f32) -> Vec<Entity> {
    let point = Vec4::new(x, y, z, w);
    let mut query = world.query_filtered::<Entity, With<BoundingShape>>();
    let world: &World = world;
    let mut hits: Vec<Entity> = query
        .iter(world)
        .filter(|e| point_inside(world, point, *e))
        .collect();

    match world.get_resource::<LayerOrder>() {
        Some(order) => hits.sort_by(|a, b| {
            // unranked entities sink to the bottom
            let rank = |e: &Entity| order.rank(*e).map_or(-1, |r| r as i64);
            rank(b).cmp(&rank(a)).then(a.cmp(b))
        }),
        None => hits.sort(),
    }
    hits
}

/// The topmost shape under the world point, if any.
pub fn pick_topmost(world: &mut World, x: f32, y: f32) -> Option<Entity> {
    query_at(world, x, y, 0.0, 1.0).into_iter().next()
}
