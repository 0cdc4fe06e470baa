//! Error type shared by the scene-graph modules.
//!
//! Authoring errors (bad length literals, unknown units, broken hierarchy
//! edits, missing collaborator systems) are raised where they happen and
//! surfaced to the caller. Per-tick math is never checked here; see
//! [`crate::systems::propagate_transforms`] for how singular matrices behave.

use bevy_ecs::entity::Entity;
use thiserror::Error;

/// Everything that can go wrong while building or editing a scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// A length literal did not match `[+-]?\d*(\.\d+)?\s*<unit>`.
    #[error("malformed length literal `{0}`")]
    MalformedLength(String),

    /// A unit symbol is not part of the length unit table.
    #[error("invalid length unit `{0}`")]
    InvalidUnit(String),

    /// A system was registered before a collaborator it depends on.
    #[error("system `{system}` requires `{requirement}`, which is not registered")]
    MissingRequirement {
        system: String,
        requirement: String,
    },

    /// The same system name was registered twice.
    #[error("system `{0}` is already registered")]
    DuplicateSystem(String),

    /// Reparenting would make an entity its own ancestor.
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    HierarchyCycle { child: Entity, parent: Entity },

    /// The entity is not alive in the world.
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(Entity),

    /// The configuration file could not be read, parsed or written.
    #[error("config error: {0}")]
    Config(String),
}

pub type SceneResult<T> = Result<T, SceneError>;
