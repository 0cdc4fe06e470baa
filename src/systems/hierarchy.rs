//! Hierarchy queries and edits.
//!
//! The parent link is bevy's [`ChildOf`] component and is the source of
//! truth; [`Children`] is the derived view bevy keeps in sync through its
//! relationship hooks. All edits go through [`set_parent`], which refuses to
//! create cycles, so the graph stays a forest.
//!
//! Inserting `ChildOf` by hand bypasses the cycle check. The walks below
//! assume the hierarchy is acyclic.

use bevy_ecs::component::Mutable;
use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::boundingshape::BoundingShape;
use crate::components::camera::{Camera, OrthographicCamera2D, ViewportBinding};
use crate::components::draggable::Draggable;
use crate::components::layer::Layer;
use crate::components::transformation::{Transformation, Transformation2D};
use crate::components::unit::Unit;
use crate::error::{SceneError, SceneResult};
use crate::resources::layerorder::LayerOrder;

/// Small inline list of entities, enough for typical fan-out.
pub type EntityList = SmallVec<[Entity; 8]>;

pub fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<ChildOf>(entity).map(|child_of| child_of.parent())
}

/// Snapshot of `entity`'s children.
pub fn children_of(world: &World, entity: Entity) -> EntityList {
    world
        .get::<Children>(entity)
        .map(|children| children.iter().collect())
        .unwrap_or_default()
}

pub fn is_root(world: &World, entity: Entity) -> bool {
    parent_of(world, entity).is_none()
}

/// Walks from an entity towards the root.
pub struct Ancestors<'w> {
    world: &'w World,
    next: Option<Entity>,
}

impl Iterator for Ancestors<'_> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        let current = self.next?;
        self.next = parent_of(self.world, current);
        Some(current)
    }
}

/// `entity` itself, then its parent, grandparent, ... up to the root.
pub fn ancestors_inclusive(world: &World, entity: Entity) -> Ancestors<'_> {
    Ancestors {
        world,
        next: Some(entity),
    }
}

/// Parent, grandparent, ... up to the root.
pub fn ancestors(world: &World, entity: Entity) -> Ancestors<'_> {
    Ancestors {
        world,
        next: parent_of(world, entity),
    }
}

/// Number of steps to the root; a root has depth 0.
pub fn depth(world: &World, entity: Entity) -> usize {
    ancestors(world, entity).count()
}

/// Make `child` a child of `parent`, or a root when `parent` is `None`.
///
/// The old parent link is replaced in one step, so `child` is never listed
/// under two parents. Fails without touching the world when either entity
/// is missing or when `parent` is `child` or one of its descendants.
pub fn set_parent(world: &mut World, child: Entity, parent: Option<Entity>) -> SceneResult<()> {
    if world.get_entity(child).is_err() {
        return Err(SceneError::NoSuchEntity(child));
    }

    match parent {
        Some(parent) => {
            if world.get_entity(parent).is_err() {
                return Err(SceneError::NoSuchEntity(parent));
            }
            if ancestors_inclusive(world, parent).any(|e| e == child) {
                return Err(SceneError::HierarchyCycle { child, parent });
            }
            if parent_of(world, child) == Some(parent) {
                return Ok(());
            }
            debug!("parenting {:?} under {:?}", child, parent);
            world.entity_mut(child).insert(ChildOf(parent));
        }
        None => {
            if is_root(world, child) {
                return Ok(());
            }
            debug!("detaching {:?} from its parent", child);
            world.entity_mut(child).remove::<ChildOf>();
        }
    }

    world.flush();

    if let Some(mut order) = world.get_resource_mut::<LayerOrder>() {
        order.mark_dirty();
    }
    Ok(())
}

/// Turn `child` into a root. No-op if it already is one.
pub fn detach_child(world: &mut World, child: Entity) -> SceneResult<()> {
    set_parent(world, child, None)
}

fn reset<T: Component<Mutability = Mutable> + Default>(world: &mut World, entity: Entity) {
    if let Some(mut component) = world.get_mut::<T>(entity) {
        *component = T::default();
    }
}

/// Prepare `entity` for reuse: unlink it from the hierarchy, reset every
/// scene component it carries to its default value and drop its hit shape
/// and mouse binding, which have no neutral value.
pub fn recycle_entity(world: &mut World, entity: Entity) -> SceneResult<()> {
    for child in children_of(world, entity) {
        detach_child(world, child)?;
    }
    detach_child(world, entity)?;

    reset::<Unit>(world, entity);
    reset::<Transformation>(world, entity);
    reset::<Transformation2D>(world, entity);
    reset::<Layer>(world, entity);
    reset::<Camera>(world, entity);
    reset::<OrthographicCamera2D>(world, entity);
    reset::<Draggable>(world, entity);
    world
        .entity_mut(entity)
        .remove::<(BoundingShape, ViewportBinding)>();
    Ok(())
}
