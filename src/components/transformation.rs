//! Authored and derived transforms.
//!
//! [`Transformation2D`] is what a scene author edits: location, rotation and
//! scale inside the parent's unit frame. [`Transformation`] is derived from
//! it by [`commit_transformation`](crate::systems::propagate_transforms::commit_transformation)
//! and holds the mutually inverse local/world matrices consumed by cameras,
//! picking and the renderer.

use bevy_ecs::prelude::Component;
use glam::{Mat4, Vec2};

use crate::math::{MATRIX_EPSILON, affine_2d, mat4_approx_eq, to_row_major};

/// Committed local <-> world matrices.
///
/// Only the transform propagator writes these, always as a pair so that
/// `world_to_local == local_to_world.inverse()` holds after every commit.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transformation {
    pub local_to_world: Mat4,
    pub world_to_local: Mat4,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    pub const fn identity() -> Self {
        Self {
            local_to_world: Mat4::IDENTITY,
            world_to_local: Mat4::IDENTITY,
        }
    }

    /// Build the pair from `local_to_world`, inverting it.
    pub fn from_local_to_world(local_to_world: Mat4) -> Self {
        Self {
            local_to_world,
            world_to_local: local_to_world.inverse(),
        }
    }

    /// Whether the two matrices still undo each other.
    pub fn is_consistent(&self) -> bool {
        mat4_approx_eq(
            &(self.world_to_local * self.local_to_world),
            &Mat4::IDENTITY,
            MATRIX_EPSILON,
        )
    }

    pub fn local_to_world_rows(&self) -> [f32; 16] {
        to_row_major(&self.local_to_world)
    }

    pub fn world_to_local_rows(&self) -> [f32; 16] {
        to_row_major(&self.world_to_local)
    }
}

/// Human-edited placement of an entity inside its parent.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transformation2D {
    /// Translation in the parent's unit frame.
    pub location: Vec2,
    pub scale: Vec2,
    /// Counter-clockwise rotation in radians.
    pub rotation: f32,
}

impl Default for Transformation2D {
    fn default() -> Self {
        Self {
            location: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }
}

impl Transformation2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            location: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// `T(location) * R(rotation) * S(scale)`.
    pub fn matrix(&self) -> Mat4 {
        affine_2d(self.location, self.rotation, self.scale)
    }
}
