//! Game Runtime
//!
//! A small component-object runtime for a side-scrolling grid platformer.
//!
//! Key concepts:
//! - GameObject: named transform + ordered list of components
//! - Component: closed set of behaviours (sprite, physics, player, ...)
//! - Scene: owns objects, camera, events and the z-ordered renderer
//! - Entity: handle to an object inside one scene
//!
//! Design philosophy:
//! - Simple over flexible (the component set is known at compile time)
//! - Components talk to their owner directly and to the scene through events
//! - Drawing never mutates state

pub mod bounds;
pub mod collision;
pub mod component;
pub mod components;
pub mod entity;
pub mod event;
pub mod level_scene;
pub mod object;
pub mod renderer;
pub mod scene;
pub mod transform;

pub use bounds::{Bounds, BoxBounds};
pub use component::{Capability, Component, FrameContext};
pub use entity::{Entity, EntityAllocator};
pub use event::Events;
pub use level_scene::LevelScene;
pub use object::GameObject;
pub use renderer::{DrawContext, Renderer, SpriteDraw, Surface};
pub use scene::Scene;
pub use transform::{Camera, Transform, Vector2};

use thiserror::Error;

use crate::asset::AssetError;
use crate::level::LevelError;

/// Failure while building or driving a scene
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Level(#[from] LevelError),
}
