//! Camera components.
//!
//! [`OrthographicCamera2D`] is the authored framing; [`Camera`] holds the
//! derived world <-> view matrices written by
//! [`commit_camera`](crate::systems::camera::commit_camera).

use bevy_ecs::prelude::Component;
use glam::{Mat4, Vec2};

use crate::math::to_row_major;

/// Committed world <-> view matrices, always mutually inverse.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub world_to_view: Mat4,
    pub view_to_world: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            world_to_view: Mat4::IDENTITY,
            view_to_world: Mat4::IDENTITY,
        }
    }
}

impl Camera {
    pub fn world_to_view_rows(&self) -> [f32; 16] {
        to_row_major(&self.world_to_view)
    }

    pub fn view_to_world_rows(&self) -> [f32; 16] {
        to_row_major(&self.view_to_world)
    }
}

/// Visible rectangle of an orthographic 2D camera, in the owning entity's
/// local space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrthographicCamera2D {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for OrthographicCamera2D {
    fn default() -> Self {
        Self::centered(2.0, 2.0)
    }
}

impl OrthographicCamera2D {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// A `width` x `height` view centered on the origin.
    pub fn centered(width: f32, height: f32) -> Self {
        Self::new(-width / 2.0, width / 2.0, -height / 2.0, height / 2.0)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Bottom-left corner.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.bottom)
    }

    /// Move the bottom-left corner to `origin`, keeping the extent.
    pub fn move_origin_to(&mut self, origin: Vec2) {
        let (width, height) = (self.width(), self.height());
        self.left = origin.x;
        self.bottom = origin.y;
        self.right = origin.x + width;
        self.top = origin.y + height;
    }
}

/// Binds a mouse source (a viewport on the host side) to this camera.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewportBinding {
    pub source: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_framing() {
        let cam = OrthographicCamera2D::centered(4.0, 2.0);
        assert_eq!(cam.left, -2.0);
        assert_eq!(cam.right, 2.0);
        assert_eq!(cam.bottom, -1.0);
        assert_eq!(cam.top, 1.0);
        assert_eq!(cam.width(), 4.0);
        assert_eq!(cam.height(), 2.0);
    }

    #[test]
    fn test_move_origin_keeps_extent() {
        let mut cam = OrthographicCamera2D::new(-1.0, 1.0, -1.0, 1.0);
        cam.move_origin_to(Vec2::new(-1.5, -1.0));
        assert_eq!(cam.left, -1.5);
        assert_eq!(cam.right, 0.5);
        assert_eq!(cam.bottom, -1.0);
        assert_eq!(cam.top, 1.0);
    }
}
