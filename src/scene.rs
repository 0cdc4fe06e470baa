//! Scene setup and the per-tick update loop.
//!
//! A [`Scene`] owns the ECS [`World`] and an ordered list of
//! [`SceneSystem`]s. Registering a system checks that every collaborator it
//! requires is already registered, runs its `initialize` hook and stores
//! the one-shot update systems it hands back in the
//! [`SystemsStore`]. [`Scene::tick`] then runs those update systems in
//! registration order.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use log::{debug, error, info};

use crate::error::{SceneError, SceneResult};
use crate::resources::layerorder::LayerOrder;
use crate::resources::mouseinput::MouseInput;
use crate::resources::sceneconfig::SceneConfig;
use crate::resources::systemsstore::SystemsStore;
use crate::systems::camera::propagate_cameras;
use crate::systems::drag::drag_cameras;
use crate::systems::layers::{detect_layer_changes, refresh_layer_order};
use crate::systems::propagate_transforms::propagate_transformations;

pub const HIERARCHY: &str = "hierarchy";
pub const TRANSFORM: &str = "transform";
pub const CAMERA: &str = "camera";
pub const LAYERS: &str = "layers";
pub const PICKING: &str = "picking";
pub const INPUT: &str = "input";
pub const DRAG: &str = "drag";

/// A unit of engine functionality with setup and teardown hooks.
pub trait SceneSystem: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Systems that must be registered first.
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    /// Insert resources and register update systems, returned in run order.
    fn initialize(&mut self, world: &mut World) -> SceneResult<Vec<SystemId>>;

    /// Undo `initialize`. Registered update systems are removed by the scene.
    fn destroy(&mut self, _world: &mut World) {}
}

/// Parent/child relations. Backed by bevy's `ChildOf`, so there is nothing
/// to run per tick.
pub struct HierarchySystem;

impl SceneSystem for HierarchySystem {
    fn name(&self) -> &'static str {
        HIERARCHY
    }

    fn initialize(&mut self, _world: &mut World) -> SceneResult<Vec<SystemId>> {
        Ok(Vec::new())
    }
}

pub struct TransformSystem;

impl SceneSystem for TransformSystem {
    fn name(&self) -> &'static str {
        TRANSFORM
    }

    fn requires(&self) -> &'static [&'static str] {
        &[HIERARCHY]
    }

    fn initialize(&mut self, world: &mut World) -> SceneResult<Vec<SystemId>> {
        Ok(vec![world.register_system(propagate_transformations)])
    }
}

pub struct CameraSystem;

impl SceneSystem for CameraSystem {
    fn name(&self) -> &'static str {
        CAMERA
    }

    fn requires(&self) -> &'static [&'static str] {
        &[TRANSFORM]
    }

    fn initialize(&mut self, world: &mut World) -> SceneResult<Vec<SystemId>> {
        Ok(vec![world.register_system(propagate_cameras)])
    }
}

pub struct LayerSystem;

impl SceneSystem for LayerSystem {
    fn name(&self) -> &'static str {
        LAYERS
    }

    fn requires(&self) -> &'static [&'static str] {
        &[HIERARCHY]
    }

    fn initialize(&mut self, world: &mut World) -> SceneResult<Vec<SystemId>> {
        world.insert_resource(LayerOrder::new());
        Ok(vec![
            world.register_system(detect_layer_changes),
            world.register_system(refresh_layer_order),
        ])
    }

    fn destroy(&mut self, world: &mut World) {
        world.remove_resource::<LayerOrder>();
    }
}

/// Hit-testing reads committed transforms and the layer order on demand.
pub struct PickingSystem;

impl SceneSystem for PickingSystem {
    fn name(&self) -> &'static str {
        PICKING
    }

    fn requires(&self) -> &'static [&'static str] {
        &[TRANSFORM, LAYERS]
    }

    fn initialize(&mut self, _world: &mut World) -> SceneResult<Vec<SystemId>> {
        Ok(Vec::new())
    }
}

pub struct InputSystem;

impl SceneSystem for InputSystem {
    fn name(&self) -> &'static str {
        INPUT
    }

    fn initialize(&mut self, world: &mut World) -> SceneResult<Vec<SystemId>> {
        let capacity = world
            .get_resource::<SceneConfig>()
            .map_or(crate::resources::mousebuffer::DEFAULT_CAPACITY, |c| {
                c.buffer_capacity
            });
        world.insert_resource(MouseInput::with_capacity(capacity));
        Ok(Vec::new())
    }

    fn destroy(&mut self, world: &mut World) {
        world.remove_resource::<MouseInput>();
    }
}

pub struct DragSystem;

impl SceneSystem for DragSystem {
    fn name(&self) -> &'static str {
        DRAG
    }

    fn requires(&self) -> &'static [&'static str] {
        &[CAMERA, PICKING, INPUT]
    }

    fn initialize(&mut self, world: &mut World) -> SceneResult<Vec<SystemId>> {
        Ok(vec![world.register_system(drag_cameras)])
    }
}

/// The world plus its registered systems.
pub struct Scene {
    pub world: World,
    systems: Vec<Box<dyn SceneSystem>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// An empty scene with default configuration and no systems.
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(SystemsStore::new());
        Self {
            world,
            systems: Vec::new(),
        }
    }

    /// A scene with every built-in system registered in dependency order.
    pub fn with_default_systems(config: SceneConfig) -> SceneResult<Self> {
        let mut scene = Self::with_config(config);
        scene.register(HierarchySystem)?;
        scene.register(TransformSystem)?;
        scene.register(CameraSystem)?;
        scene.register(LayerSystem)?;
        scene.register(PickingSystem)?;
        scene.register(InputSystem)?;
        scene.register(DragSystem)?;
        Ok(scene)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.world.resource::<SystemsStore>().contains(name)
    }

    /// Register `system` after checking its requirements.
    pub fn register(&mut self, mut system: impl SceneSystem) -> SceneResult<()> {
        let name = system.name();
        if self.is_registered(name) {
            return Err(SceneError::DuplicateSystem(name.to_string()));
        }
        if let Some(missing) = system
            .requires()
            .iter()
            .find(|requirement| !self.is_registered(requirement))
        {
            error!("system `{}` is missing `{}`", name, missing);
            return Err(SceneError::MissingRequirement {
                system: name.to_string(),
                requirement: missing.to_string(),
            });
        }

        let ids = system.initialize(&mut self.world)?;
        debug!("registered system `{}` with {} update steps", name, ids.len());
        self.world.resource_mut::<SystemsStore>().insert(name, ids);
        self.systems.push(Box::new(system));
        Ok(())
    }

    /// Run every update system once, in registration order.
    pub fn tick(&mut self) {
        let ids: Vec<SystemId> = self
            .systems
            .iter()
            .filter_map(|system| self.world.resource::<SystemsStore>().get(system.name()))
            .flatten()
            .copied()
            .collect();
        for id in ids {
            if let Err(e) = self.world.run_system(id) {
                error!("update system failed: {}", e);
            }
        }
        self.world.clear_trackers();
    }

    /// Destroy every system, most recently registered first.
    pub fn shutdown(&mut self) {
        while let Some(mut system) = self.systems.pop() {
            let name = system.name();
            let ids = self
                .world
                .resource_mut::<SystemsStore>()
                .remove(name)
                .unwrap_or_default();
            for id in ids {
                if let Err(e) = self.world.unregister_system(id) {
                    error!("failed to unregister a `{}` system: {}", name, e);
                }
            }
            system.destroy(&mut self.world);
            info!("destroyed system `{}`", name);
        }
    }

    /// Commit transforms and cameras for `entity`'s subtree right away, for
    /// editors that change one entity between ticks.
    pub fn commit(&mut self, entity: Entity) {
        crate::systems::propagate_transforms::commit_transformation(&mut self.world, entity);
        crate::systems::camera::commit_cameras_below(&mut self.world, entity);
    }

    pub fn mouse_input(&mut self) -> Option<Mut<'_, MouseInput>> {
        self.world.get_resource_mut::<MouseInput>()
    }

    /// Feed a cursor location (view space) from the host.
    ///
    /// Returns `false` when the sample was dropped, either because it is
    /// older than a full buffer or because no input system is registered.
    pub fn push_location(&mut self, source: u32, timestamp: f64, x: f32, y: f32) -> bool {
        self.mouse_input()
            .is_some_and(|mut input| input.push_location(source, timestamp, x, y))
    }

    /// Feed a button bitmask from the host. Same return value as
    /// [`Scene::push_location`].
    pub fn push_state(&mut self, source: u32, timestamp: f64, buttons: u32) -> bool {
        self.mouse_input()
            .is_some_and(|mut input| input.push_state(source, timestamp, buttons))
    }
}
