//! Grid Dash: a 2D grid platformer with an in-app level editor
//!
//! - Entity/component runtime with z-ordered rendering
//! - AABB collision with land-or-die resolution
//! - Tile editor with palette, snapping cursor and camera panning
//! - Text level format stored in ZIP archives

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod asset;
pub mod config;
pub mod draw;
pub mod editor;
pub mod game;
pub mod input;
pub mod level;
pub mod storage;
