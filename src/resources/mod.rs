//! ECS resources made available to systems.
//!
//! Overview
//! - `layerorder` – dense draw/pick ranks built by the layer ranker
//! - `mousebuffer` – timestamp-ordered ring buffers of mouse samples
//! - `mouseinput` – per-source mouse channels fed by the host
//! - `sceneconfig` – tunables loaded from an INI file
//! - `systemsstore` – registry of scene systems by name
pub mod layerorder;
pub mod mousebuffer;
pub mod mouseinput;
pub mod sceneconfig;
pub mod systemsstore;
