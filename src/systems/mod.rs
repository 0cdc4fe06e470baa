//! Engine systems.
//!
//! Most of these are exclusive (`&mut World`) so that editors can call them
//! directly on a single entity as well as run them once per tick.
//!
//! Submodules overview
//! - [`camera`] – derive world <-> view matrices from orthographic framings
//! - [`drag`] – pan cameras by dragging empty canvas
//! - [`hierarchy`] – parent/child queries and cycle-checked reparenting
//! - [`layers`] – rank entities by layer, depth and id
//! - [`picking`] – point-in-shape queries in local space
//! - [`propagate_transforms`] – commit local <-> world matrices top-down
//! - [`units`] – nearest-ancestor unit resolution and unit composition

pub mod camera;
pub mod drag;
pub mod hierarchy;
pub mod layers;
pub mod picking;
pub mod propagate_transforms;
pub mod units;
