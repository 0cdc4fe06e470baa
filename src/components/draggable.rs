use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Marks a camera entity that can be panned by dragging empty canvas.
///
/// `origin` is the cursor position (view space) when the drag started and
/// `camera_origin` the camera's `(left, bottom)` at that moment. Both are
/// only meaningful while `dragged` is set.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Draggable {
    pub dragged: bool,
    pub origin: Vec2,
    pub camera_origin: Vec2,
}

impl Draggable {
    pub fn start(&mut self, origin: Vec2, camera_origin: Vec2) {
        self.dragged = true;
        self.origin = origin;
        self.camera_origin = camera_origin;
    }

    /// Back to idle.
    pub fn stop(&mut self) {
        *self = Self::default();
    }
}
