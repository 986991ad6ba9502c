//! Sprite assets
//!
//! Sprites and spritesheets are decoded once and cached in an [`AssetPool`]
//! keyed by absolute path. Components hold cheap copies that share pixel
//! data with the pooled original.

mod library;
mod sprite;

pub use library::AssetPool;
pub use sprite::{SheetLayout, Sprite, SpriteCell, Spritesheet};

use thiserror::Error;

/// Error type for asset loading
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to decode image '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("sprite '{0}' has not been loaded")]
    MissingSprite(String),
    #[error("spritesheet '{0}' has not been loaded")]
    MissingSpritesheet(String),
    #[error("asset '{0}' is already loaded")]
    AlreadyLoaded(String),
    #[error("tile {index} of '{path}' lies outside the {width}x{height} image")]
    TileOutOfBounds {
        path: String,
        index: u32,
        width: u32,
        height: u32,
    },
}
