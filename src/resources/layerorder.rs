//! Dense draw/pick ranks produced by the layer ranker.
//!
//! [`LayerOrder`] stores the ranked entities in ascending draw order: index
//! `0` is drawn first, the last entry is drawn on top and wins picking.
//! It is rebuilt wholesale by
//! [`rebuild_layer_order`](crate::systems::layers::rebuild_layer_order)
//! whenever it is flagged dirty.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

#[derive(Resource, Debug, Default)]
pub struct LayerOrder {
    sorted: Vec<Entity>,
    ranks: FxHashMap<Entity, usize>,
    dirty: bool,
}

impl LayerOrder {
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    /// Replace the ranking with `sorted`, which must already be in draw order.
    pub fn assign(&mut self, sorted: Vec<Entity>) {
        self.ranks = sorted
            .iter()
            .enumerate()
            .map(|(rank, entity)| (*entity, rank))
            .collect();
        self.sorted = sorted;
        self.dirty = false;
    }

    /// Dense rank of `entity`; higher draws later.
    pub fn rank(&self, entity: Entity) -> Option<usize> {
        self.ranks.get(&entity).copied()
    }

    /// Entities bottom to top.
    pub fn draw_order(&self) -> &[Entity] {
        &self.sorted
    }

    /// Entities top to bottom.
    pub fn pick_order(&self) -> impl Iterator<Item = Entity> + '_ {
        self.sorted.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
