//! Camera panning notifications.
//!
//! Triggered by [`drag_cameras`](crate::systems::drag::drag_cameras) when a
//! camera enters or leaves the dragging state. Observers can react without
//! polling [`Draggable`](crate::components::draggable::Draggable):
//!
//! ```ignore
//! world.add_observer(|trigger: On<DragStarted>| {
//!     log::info!("panning {:?}", trigger.event().camera);
//! });
//! ```

use bevy_ecs::prelude::*;
use glam::Vec2;

/// A camera started panning. `origin` is the cursor position in view space.
#[derive(Event, Debug, Clone, Copy)]
pub struct DragStarted {
    pub camera: Entity,
    pub origin: Vec2,
}

/// The drag button was released; the camera keeps its last framing.
#[derive(Event, Debug, Clone, Copy)]
pub struct DragEnded {
    pub camera: Entity,
}
