//! Layer ranking.
//!
//! Every entity carrying a [`Transformation`] or a [`Layer`] gets a dense
//! rank in [`LayerOrder`]. Entities are compared by:
//!
//! 1. effective layer (own [`Layer`] or nearest ancestor's, default 0),
//! 2. hierarchy depth,
//! 3. entity id,
//!
//! all ascending, so a higher rank draws later and wins picking.
//!
//! Structural changes are rare next to per-frame commits, so the order is
//! simply rebuilt in full whenever something relevant changed.

use std::cmp::Ordering;

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::layer::Layer;
use crate::components::transformation::Transformation;
use crate::resources::layerorder::LayerOrder;
use crate::systems::hierarchy::{ancestors_inclusive, depth};

/// Layer of `entity` or its nearest ancestor carrying one; 0 otherwise.
pub fn effective_layer(world: &World, entity: Entity) -> i32 {
    ancestors_inclusive(world, entity)
        .find_map(|e| world.get::<Layer>(e).map(|layer| layer.0))
        .unwrap_or(0)
}

/// Sort key used by [`compare`].
pub fn rank_key(world: &World, entity: Entity) -> (i32, usize, Entity) {
    (effective_layer(world, entity), depth(world, entity), entity)
}

/// Total order over entities: layer, then depth, then id.
pub fn compare(world: &World, left: Entity, right: Entity) -> Ordering {
    rank_key(world, left).cmp(&rank_key(world, right))
}

/// Entities that take part in draw/pick ordering.
pub fn ranked_entities(world: &mut World) -> Vec<Entity> {
    let mut query =
        world.query_filtered::<Entity, Or<(With<Transformation>, With<Layer>)>>();
    query.iter(world).collect()
}

/// Collect, sort and assign dense ranks to every ranked entity.
pub fn rebuild_layer_order(world: &mut World) {
    let entities = ranked_entities(world);
    let world_ref: &World = world;
    let mut keyed: Vec<((i32, usize, Entity), Entity)> = entities
        .into_iter()
        .map(|e| (rank_key(world_ref, e), e))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    let sorted: Vec<Entity> = keyed.into_iter().map(|(_, e)| e).collect();

    debug!("rebuilt layer order over {} entities", sorted.len());
    world
        .get_resource_or_insert_with(LayerOrder::new)
        .assign(sorted);
}

/// Rebuild only when flagged dirty.
pub fn refresh_layer_order(world: &mut World) {
    let dirty = world
        .get_resource::<LayerOrder>()
        .is_none_or(LayerOrder::is_dirty);
    if dirty {
        rebuild_layer_order(world);
    }
}

/// Register a freshly built entity: tag it so it is ranked, then rebuild.
pub fn track_entity(world: &mut World, entity: Entity) {
    if world.get::<Layer>(entity).is_none() && world.get::<Transformation>(entity).is_none() {
        world.entity_mut(entity).insert(Transformation::default());
    }
    rebuild_layer_order(world);
}

/// Flag the order dirty when layers, parents or ranked entities change.
pub fn detect_layer_changes(
    changed: Query<(), Or<(Changed<Layer>, Changed<ChildOf>, Added<Transformation>)>>,
    mut removed_layers: RemovedComponents<Layer>,
    mut removed_parents: RemovedComponents<ChildOf>,
    mut removed_transformations: RemovedComponents<Transformation>,
    mut order: ResMut<LayerOrder>,
) {
    let removed = removed_layers.read().count()
        + removed_parents.read().count()
        + removed_transformations.read().count();
    if removed > 0 || !changed.is_empty() {
        order.mark_dirty();
    }
}
