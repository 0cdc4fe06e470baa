//! Planegraph: a 2D scene-graph core on top of `bevy_ecs`.
//!
//! Entities arranged in a parent/child hierarchy carry an optional physical
//! [`Unit`](components::unit::Unit), an optional 2D placement and an optional
//! [`Layer`](components::layer::Layer). The engine derives, every tick:
//!
//! - a mutually inverse local <-> world matrix pair per entity,
//! - world <-> view matrices for orthographic cameras,
//! - a deterministic draw/pick order,
//!
//! and answers point-in-shape queries used for picking and camera panning.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (units, transforms, layers, cameras, shapes)
//! - [`events`] – drag notifications
//! - [`length`] – lengths, the unit table and the length literal grammar
//! - [`math`] – matrix helpers
//! - [`resources`] – layer order, mouse buffers, configuration, system registry
//! - [`scene`] – system lifecycle and the per-tick update loop
//! - [`snapshot`] – row-major matrices in draw order for renderers
//! - [`systems`] – hierarchy, units, transforms, cameras, layers, picking, drag

pub mod components;
pub mod error;
pub mod events;
pub mod length;
pub mod math;
pub mod resources;
pub mod scene;
pub mod snapshot;
pub mod systems;

pub use error::{SceneError, SceneResult};
pub use length::{Length, LengthUnit};
pub use scene::{Scene, SceneSystem};
