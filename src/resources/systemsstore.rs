//! Registry of scene systems by name.
//!
//! Each registered [`SceneSystem`](crate::scene::SceneSystem) stores the ids
//! of its one-shot update systems under its name. Systems look each other up
//! here while initializing to check their requirements.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// Map of system names to their registered update system ids.
#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, Vec<SystemId>>,
}

impl SystemsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        SystemsStore {
            map: FxHashMap::default(),
        }
    }

    /// Record `ids` under a human-readable name, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, ids: Vec<SystemId>) {
        self.map.insert(name.into(), ids);
    }

    /// Retrieve the update system ids registered under `name`.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&[SystemId]> {
        self.map.get(name.as_ref()).map(Vec::as_slice)
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.map.contains_key(name.as_ref())
    }

    pub fn remove(&mut self, name: impl AsRef<str>) -> Option<Vec<SystemId>> {
        self.map.remove(name.as_ref())
    }
}
