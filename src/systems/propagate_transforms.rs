//! Transform propagation for parent-child entity hierarchies.
//!
//! Recomputes [`Transformation`] (the local <-> world matrix pair) from each
//! entity's authored [`Transformation2D`], its unit frame and the nearest
//! ancestor that also carries a `Transformation`.
//!
//! # Local matrix
//!
//! ```text
//! local = T(location) * R(rotation) * S(scale) * U
//! ```
//!
//! where `U` scales x/y by [`entity_unit_scale`]. Read right to left, a
//! local point is first converted into the parent's unit, then scaled,
//! rotated and finally translated, so `location` is measured in the parent's
//! unit frame and rotation never skews a non-uniform scale. An entity with a [`Unit`]
//! but no `Transformation2D` gets just `U`; one with neither gets identity.
//! The world matrix is `ancestor.local_to_world * local`.
//!
//! # Schedule position
//!
//! Must run **before** cameras, the layer ranker and hit-testing read the
//! committed matrices.
//!
//! # Singular matrices
//!
//! A zero scale makes `local_to_world` non-invertible. The inverse is stored
//! as computed (non-finite entries) and a warning names the entity; nothing
//! is clamped.
//!
//! Matrices are `f32` while unit factors are `f64`. Unit pairs far apart
//! (attometers under exameters, a 1e-36 scale) survive the narrowing, but the
//! determinant squares the scale and underflows to zero, so such a frame is
//! reported as singular too. Keep nested units within about 1e-18 of each
//! other.

use bevy_ecs::prelude::*;
use glam::Mat4;
use log::{trace, warn};

use crate::components::transformation::{Transformation, Transformation2D};
use crate::components::unit::Unit;
use crate::math::{is_singular, planar_scale};
use crate::systems::hierarchy::{EntityList, ancestors, ancestors_inclusive, children_of};
use crate::systems::units::entity_unit_scale;

/// Committed transformation of `entity` or its nearest ancestor carrying
/// one; identity when there is none.
pub fn nearest_transformation(world: &World, entity: Entity) -> Transformation {
    ancestors_inclusive(world, entity)
        .find_map(|e| world.get::<Transformation>(e).copied())
        .unwrap_or_else(Transformation::identity)
}

/// `local_to_world` of the nearest strict ancestor carrying a
/// `Transformation`, or identity.
fn inherited_local_to_world(world: &World, entity: Entity) -> Mat4 {
    ancestors(world, entity)
        .find_map(|e| world.get::<Transformation>(e))
        .map_or(Mat4::IDENTITY, |t| t.local_to_world)
}

/// Matrix from `entity`'s local frame into its transform ancestor's frame.
pub fn local_matrix(world: &World, entity: Entity) -> Mat4 {
    if let Some(placement) = world.get::<Transformation2D>(entity) {
        let unit = planar_scale(entity_unit_scale(world, entity) as f32);
        placement.matrix() * unit
    } else if world.get::<Unit>(entity).is_some() {
        planar_scale(entity_unit_scale(world, entity) as f32)
    } else {
        Mat4::IDENTITY
    }
}

/// Recompute `entity`'s subtree, assuming its ancestors are up to date.
///
/// Entities without a `Transformation` are passed through: their children
/// compose with the same ancestor matrix. Parents are always committed
/// before their children.
pub fn commit_transformation(world: &mut World, entity: Entity) {
    let mut pending: Vec<(Entity, Mat4)> = vec![(entity, inherited_local_to_world(world, entity))];

    while let Some((current, inherited)) = pending.pop() {
        let passed_down = if world.get::<Transformation>(current).is_some() {
            let local_to_world = inherited * local_matrix(world, current);
            if is_singular(&local_to_world) {
                warn!(
                    "transformation of {:?} is singular, its inverse is not finite",
                    current
                );
            }
            let committed = Transformation::from_local_to_world(local_to_world);
            if let Some(mut transformation) = world.get_mut::<Transformation>(current) {
                if *transformation != committed {
                    *transformation = committed;
                }
            }
            local_to_world
        } else {
            inherited
        };

        let children: EntityList = children_of(world, current);
        // reversed so the first child is committed first
        for child in children.into_iter().rev() {
            pending.push((child, passed_down));
        }
    }
}

/// Entities carrying a `Transformation` with no ancestor that also carries
/// one, in entity order.
pub fn root_transformations(world: &mut World) -> Vec<Entity> {
    let mut query = world.query_filtered::<Entity, With<Transformation>>();
    let world: &World = world;
    let mut roots: Vec<Entity> = query
        .iter(world)
        .filter(|e| ancestors(world, *e).all(|a| world.get::<Transformation>(a).is_none()))
        .collect();
    roots.sort();
    roots
}

/// Commit every transformation tree, top-down.
pub fn propagate_transformations(world: &mut World) {
    let roots = root_transformations(world);
    trace!("committing {} root transformations", roots.len());
    for root in roots {
        commit_transformation(world, root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::LengthUnit;
    use crate::math::{MATRIX_EPSILON, mat4_approx_eq};
    use bevy_ecs::hierarchy::ChildOf;
    use glam::{Vec3, Vec4};

    #[test]
    fn test_local_matrix_without_authored_fields_is_identity() {
        let mut world = World::new();
        let e = world.spawn(Transformation::default()).id();
        assert_eq!(local_matrix(&world, e), Mat4::IDENTITY);
    }

    #[test]
    fn test_unit_only_entity_is_rescaled() {
        let mut world = World::new();
        let root = world
            .spawn((Transformation::default(), Unit::new(1.0, LengthUnit::Meter)))
            .id();
        let child = world
            .spawn((
                ChildOf(root),
                Transformation::default(),
                Unit::new(1.0, LengthUnit::Centimeter),
            ))
            .id();
        world.flush();

        propagate_transformations(&mut world);

        let t = world.get::<Transformation>(child).unwrap();
        let p = t.local_to_world * Vec4::new(100.0, 50.0, 0.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_pass_through_entity_keeps_ancestor_context() {
        let mut world = World::new();
        let root = world
            .spawn((Transformation::default(), Transformation2D::new(10.0, 0.0)))
            .id();
        let group = world.spawn(ChildOf(root)).id();
        let leaf = world
            .spawn((
                ChildOf(group),
                Transformation::default(),
                Transformation2D::new(1.0, 2.0),
            ))
            .id();
        world.flush();

        propagate_transformations(&mut world);

        let expected = Mat4::from_translation(Vec3::new(11.0, 2.0, 0.0));
        let t = world.get::<Transformation>(leaf).unwrap();
        assert!(mat4_approx_eq(&t.local_to_world, &expected, MATRIX_EPSILON));
        assert!(t.is_consistent());
    }

    #[test]
    fn test_root_transformations_skip_nested_ones() {
        let mut world = World::new();
        let root = world.spawn(Transformation::default()).id();
        let nested = world.spawn((ChildOf(root), Transformation::default())).id();
        let bare = world.spawn_empty().id();
        let under_bare = world.spawn((ChildOf(bare), Transformation::default())).id();
        world.flush();

        let roots = root_transformations(&mut world);
        assert!(roots.contains(&root));
        assert!(roots.contains(&under_bare));
        assert!(!roots.contains(&nested));
    }

    #[test]
    fn test_unit_scale_precision_limits() {
        let mut world = World::new();
        let root = world
            .spawn((Transformation::default(), Unit::new(1.0, LengthUnit::Kilometer)))
            .id();
        let near = world
            .spawn((
                ChildOf(root),
                Transformation::default(),
                Unit::new(1.0, LengthUnit::Nanometer),
            ))
            .id();
        let huge = world
            .spawn((Transformation::default(), Unit::new(1.0, LengthUnit::Exameter)))
            .id();
        let far = world
            .spawn((
                ChildOf(huge),
                Transformation::default(),
                Unit::new(1.0, LengthUnit::Attometer),
            ))
            .id();
        world.flush();

        propagate_transformations(&mut world);

        let near = world.get::<Transformation>(near).unwrap();
        assert!(!is_singular(&near.local_to_world));
        assert!(near.world_to_local.is_finite());
        assert!(is_singular(&world.get::<Transformation>(far).unwrap().local_to_world));
    }

    #[test]
    fn test_zero_scale_propagates_non_finite_inverse() {
        let mut world = World::new();
        let e = world
            .spawn((
                Transformation::default(),
                Transformation2D::default().with_scale(0.0, 1.0),
            ))
            .id();
        propagate_transformations(&mut world);
        let t = world.get::<Transformation>(e).unwrap();
        assert!(!t.world_to_local.is_finite());
    }
}
