//! Event types emitted by the engine.
//!
//! Submodules:
//! - [`drag`] – camera panning started/ended
pub mod drag;
