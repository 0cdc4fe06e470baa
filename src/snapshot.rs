//! Read-only view of committed matrices for the rendering collaborator.
//!
//! Matrices are flattened row-major (16 numbers) and entities are listed in
//! draw order, so a renderer can walk [`RenderSnapshot::entities`] front to
//! back without knowing anything about the ECS.

use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::components::camera::{Camera, OrthographicCamera2D};
use crate::components::transformation::Transformation;
use crate::resources::layerorder::LayerOrder;

#[derive(Debug, Clone, Serialize)]
pub struct EntityMatrices {
    /// `Entity::to_bits`, stable for the entity's lifetime.
    pub entity: u64,
    pub rank: Option<usize>,
    pub local_to_world: [f32; 16],
    pub world_to_local: [f32; 16],
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraMatrices {
    pub entity: u64,
    /// `[left, right, bottom, top]`
    pub framing: [f32; 4],
    pub world_to_view: [f32; 16],
    pub view_to_world: [f32; 16],
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderSnapshot {
    pub entities: Vec<EntityMatrices>,
    pub cameras: Vec<CameraMatrices>,
}

impl RenderSnapshot {
    /// Capture every committed transformation and camera.
    ///
    /// Ranked entities come first in draw order; entities the layer order
    /// has not seen yet follow in entity order.
    pub fn capture(world: &mut World) -> Self {
        let mut transforms = world.query::<(Entity, &Transformation)>();
        let mut cameras = world.query::<(Entity, &Camera, &OrthographicCamera2D)>();
        let world: &World = world;
        let order = world.get_resource::<LayerOrder>();
        let rank = |e: Entity| order.and_then(|o| o.rank(e));

        let mut entities: Vec<(Entity, &Transformation)> = transforms.iter(world).collect();
        entities.sort_by_key(|(e, _)| (rank(*e).is_none(), rank(*e), *e));

        let mut camera_list: Vec<(Entity, &Camera, &OrthographicCamera2D)> =
            cameras.iter(world).collect();
        camera_list.sort_by_key(|(e, _, _)| *e);

        Self {
            entities: entities
                .into_iter()
                .map(|(e, t)| EntityMatrices {
                    entity: e.to_bits(),
                    rank: rank(e),
                    local_to_world: t.local_to_world_rows(),
                    world_to_local: t.world_to_local_rows(),
                })
                .collect(),
            cameras: camera_list
                .into_iter()
                .map(|(e, camera, framing)| CameraMatrices {
                    entity: e.to_bits(),
                    framing: [framing.left, framing.right, framing.bottom, framing.top],
                    world_to_view: camera.world_to_view_rows(),
                    view_to_world: camera.view_to_world_rows(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
