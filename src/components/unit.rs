//! Local unit frame of an entity.
//!
//! An entity carrying a [`Unit`] expresses its own coordinates (and those of
//! descendants that do not override it) in that unit. The transform
//! propagator rescales the entity relative to its parent's nearest unit,
//! see [`crate::systems::units::unit_scale`].

use bevy_ecs::prelude::Component;

use crate::length::{Length, LengthUnit};

/// Physical unit attached to an entity. Defaults to one meter.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct Unit {
    pub length: Length,
}

impl Unit {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self {
            length: Length::new(value, unit),
        }
    }

    /// Build a unit from a literal such as `"1cm"`.
    pub fn parse(text: &str) -> crate::error::SceneResult<Self> {
        Ok(Self {
            length: Length::parse(text)?,
        })
    }
}

impl From<Length> for Unit {
    fn from(length: Length) -> Self {
        Self { length }
    }
}
