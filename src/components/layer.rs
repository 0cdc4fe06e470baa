//! Layer component for draw and pick ordering.
//!
//! Entities without a [`Layer`] inherit the nearest ancestor's value (0 when
//! no ancestor has one). The [`LayerOrder`](crate::resources::layerorder::LayerOrder)
//! resource turns these into dense ranks.

use bevy_ecs::prelude::Component;

/// Rendering bucket. Higher layers are drawn later (on top).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Layer(pub i32);
