//! Unit resolution along the hierarchy.
//!
//! An entity's unit is the [`Unit`] on itself or on its nearest ancestor.
//! Composing a child unit with its parent's gives the factor that maps
//! child-unit coordinates into parent-unit coordinates: a child in
//! centimeters under a parent in meters scales by `0.01`.

use bevy_ecs::prelude::*;

use crate::components::unit::Unit;
use crate::length::Length;
use crate::systems::hierarchy::{ancestors_inclusive, parent_of};

/// Unit carried by `entity` or its nearest ancestor, if any.
pub fn nearest_unit(world: &World, entity: Entity) -> Option<Length> {
    ancestors_inclusive(world, entity).find_map(|e| world.get::<Unit>(e).map(|unit| unit.length))
}

/// Nearest unit above `entity`, excluding its own.
pub fn parent_unit(world: &World, entity: Entity) -> Option<Length> {
    parent_of(world, entity).and_then(|parent| nearest_unit(world, parent))
}

/// `child.in(ancestor.unit) / ancestor.value`.
///
/// With no unit on either side there is nothing to convert and the scale
/// is 1.
pub fn unit_scale(child: Option<Length>, ancestor: Option<Length>) -> f64 {
    match (child, ancestor) {
        (Some(child), Some(ancestor)) => child.in_unit(ancestor.unit) / ancestor.value,
        _ => 1.0,
    }
}

/// Scale applied to `entity`'s local frame by the transform propagator.
pub fn entity_unit_scale(world: &World, entity: Entity) -> f64 {
    unit_scale(nearest_unit(world, entity), parent_unit(world, entity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::LengthUnit;
    use bevy_ecs::hierarchy::ChildOf;

    #[test]
    fn test_unit_scale_centimeters_in_meters() {
        let cm = Length::new(1.0, LengthUnit::Centimeter);
        let m = Length::meters(1.0);
        assert!((unit_scale(Some(cm), Some(m)) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_unit_scale_divides_by_ancestor_value() {
        let child = Length::meters(1.0);
        let parent = Length::meters(2.0);
        assert!((unit_scale(Some(child), Some(parent)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_units_mean_identity() {
        assert_eq!(unit_scale(None, None), 1.0);
        assert_eq!(unit_scale(Some(Length::meters(5.0)), None), 1.0);
        assert_eq!(unit_scale(None, Some(Length::meters(5.0))), 1.0);
    }

    #[test]
    fn test_nearest_unit_walks_ancestors() {
        let mut world = World::new();
        let root = world.spawn(Unit::new(1.0, LengthUnit::Kilometer)).id();
        let mid = world.spawn(ChildOf(root)).id();
        let leaf = world
            .spawn((ChildOf(mid), Unit::new(1.0, LengthUnit::Meter)))
            .id();
        world.flush();

        assert_eq!(
            nearest_unit(&world, mid),
            Some(Length::new(1.0, LengthUnit::Kilometer))
        );
        assert_eq!(nearest_unit(&world, leaf), Some(Length::meters(1.0)));
        assert_eq!(
            parent_unit(&world, leaf),
            Some(Length::new(1.0, LengthUnit::Kilometer))
        );
        assert!((entity_unit_scale(&world, leaf) - 0.001).abs() < 1e-12);
        // mid inherits its parent's unit, so it is not rescaled
        assert_eq!(entity_unit_scale(&world, mid), 1.0);
        assert_eq!(entity_unit_scale(&world, root), 1.0);
    }

    #[test]
    fn test_no_unit_anywhere() {
        let mut world = World::new();
        let e = world.spawn_empty().id();
        assert_eq!(nearest_unit(&world, e), None);
        assert_eq!(entity_unit_scale(&world, e), 1.0);
    }
}
