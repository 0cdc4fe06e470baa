//! Scene configuration resource.
//!
//! Holds the tunables of the scene-graph core, loaded from an INI file.
//! Missing keys keep their defaults so a partial file is fine.
//!
//! # Configuration File Format
//!
//! ```ini
//! [input]
//! buffer_capacity = 64
//! drag_button = 0
//!
//! [camera]
//! left = -1
//! right = 1
//! bottom = -1
//! top = 1
//!
//! [units]
//! root = 1m
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::camera::OrthographicCamera2D;
use crate::error::{SceneError, SceneResult};
use crate::length::Length;
use crate::resources::mousebuffer::DEFAULT_CAPACITY;
use crate::resources::mouseinput::PRIMARY_BUTTON;

const DEFAULT_CONFIG_PATH: &str = "./scene.ini";

#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    /// Samples kept per mouse buffer.
    pub buffer_capacity: usize,
    /// Logical button that pans cameras.
    pub drag_button: u32,
    /// Framing given to newly built cameras.
    pub camera: OrthographicCamera2D,
    /// Unit of the scene root.
    pub root_unit: Length,
    pub config_path: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            buffer_capacity: DEFAULT_CAPACITY,
            drag_button: PRIMARY_BUTTON,
            camera: OrthographicCamera2D::default(),
            root_unit: Length::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. A malformed `[units] root`
    /// literal is reported as [`SceneError::MalformedLength`].
    pub fn load_from_file(&mut self) -> SceneResult<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| SceneError::Config(format!("failed to load config file: {}", e)))?;
        self.apply(&config)
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> SceneResult<()> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| SceneError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> SceneResult<()> {
        // [input] section
        if let Some(capacity) = config.getuint("input", "buffer_capacity").ok().flatten() {
            self.buffer_capacity = capacity as usize;
        }
        if let Some(button) = config.getuint("input", "drag_button").ok().flatten() {
            self.drag_button = button as u32;
        }

        // [camera] section
        let camera = &mut self.camera;
        for (key, slot) in [
            ("left", &mut camera.left),
            ("right", &mut camera.right),
            ("bottom", &mut camera.bottom),
            ("top", &mut camera.top),
        ] {
            if let Some(value) = config.getfloat("camera", key).ok().flatten() {
                *slot = value as f32;
            }
        }

        // [units] section
        if let Some(root) = config.get("units", "root") {
            self.root_unit = Length::parse(&root)?;
        }

        info!(
            "Loaded scene config: buffer_capacity={}, drag_button={}, camera=[{}, {}]x[{}, {}], root unit={}",
            self.buffer_capacity,
            self.drag_button,
            self.camera.left,
            self.camera.right,
            self.camera.bottom,
            self.camera.top,
            self.root_unit
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> SceneResult<()> {
        let mut config = Ini::new();

        config.set("input", "buffer_capacity", Some(self.buffer_capacity.to_string()));
        config.set("input", "drag_button", Some(self.drag_button.to_string()));

        config.set("camera", "left", Some(self.camera.left.to_string()));
        config.set("camera", "right", Some(self.camera.right.to_string()));
        config.set("camera", "bottom", Some(self.camera.bottom.to_string()));
        config.set("camera", "top", Some(self.camera.top.to_string()));

        config.set("units", "root", Some(self.root_unit.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| SceneError::Config(format!("failed to save config file: {}", e)))?;

        info!("Saved scene config to {:?}", self.config_path);

        Ok(())
    }
}
