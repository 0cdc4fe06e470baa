//! ECS components attached to scene entities.
//!
//! The hierarchy itself uses bevy's built-in
//! [`ChildOf`](bevy_ecs::hierarchy::ChildOf) / [`Children`](bevy_ecs::hierarchy::Children)
//! relationship; everything else a scene entity can carry lives here.
//!
//! Submodules overview:
//! - [`boundingshape`] – circle/square shapes used by hit-testing
//! - [`camera`] – orthographic framing, derived view matrices, viewport binding
//! - [`draggable`] – transient camera panning state
//! - [`layer`] – inherited draw/pick bucket
//! - [`transformation`] – authored 2D placement and committed local/world matrices
//! - [`unit`] – physical unit establishing a local scale frame

pub mod boundingshape;
pub mod camera;
pub mod draggable;
pub mod layer;
pub mod transformation;
pub mod unit;
