//! Asset Pool - caching of sprites and spritesheets
//!
//! Assets are keyed by absolute file path so `"assets/a.png"` and
//! `"./assets/a.png"` resolve to the same entry. The pool is an explicit
//! context object owned by the app and lent to scenes and the level parser.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::sprite::{SheetLayout, Sprite, Spritesheet};
use super::AssetError;

/// Cache of loaded sprites and spritesheets
#[derive(Debug, Default)]
pub struct AssetPool {
    sprites: HashMap<PathBuf, Sprite>,
    spritesheets: HashMap<PathBuf, Spritesheet>,
}

/// Absolute, lexically normalized form of an asset path
fn resolve(path: &str) -> PathBuf {
    let path = Path::new(path);
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for part in absolute.components() {
        match part {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

impl AssetPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_sprite(&self, path: &str) -> bool {
        self.sprites.contains_key(&resolve(path))
    }

    pub fn has_spritesheet(&self, path: &str) -> bool {
        self.spritesheets.contains_key(&resolve(path))
    }

    /// Register an already decoded sprite under `path`.
    pub fn add_sprite(&mut self, path: &str, sprite: Sprite) -> Result<(), AssetError> {
        let key = resolve(path);
        if self.sprites.contains_key(&key) {
            return Err(AssetError::AlreadyLoaded(key.display().to_string()));
        }
        log::debug!("asset pool: sprite {}", key.display());
        self.sprites.insert(key, sprite);
        Ok(())
    }

    /// Get a sprite, decoding it from disk on first use.
    pub fn sprite(&mut self, path: &str) -> Result<&Sprite, AssetError> {
        let key = resolve(path);
        if !self.sprites.contains_key(&key) {
            let sprite = Sprite::load(path)?;
            log::debug!("asset pool: loaded {} ({}x{})", key.display(), sprite.width, sprite.height);
            self.sprites.insert(key.clone(), sprite);
        }
        self.sprites
            .get(&key)
            .ok_or_else(|| AssetError::MissingSprite(path.to_string()))
    }

    /// Get a sprite that must already be in the pool.
    pub fn loaded_sprite(&self, path: &str) -> Result<&Sprite, AssetError> {
        self.sprites
            .get(&resolve(path))
            .ok_or_else(|| AssetError::MissingSprite(path.to_string()))
    }

    /// Cut a spritesheet from the sprite at `path`.
    /// Registering the same path twice keeps the first sheet.
    pub fn add_spritesheet(&mut self, path: &str, layout: SheetLayout) -> Result<(), AssetError> {
        let key = resolve(path);
        if self.spritesheets.contains_key(&key) {
            return Ok(());
        }
        let parent = self.sprite(path)?.clone();
        let sheet = Spritesheet::new(&parent, layout)?;
        log::debug!("asset pool: spritesheet {} ({} tiles)", key.display(), sheet.sprites.len());
        self.spritesheets.insert(key, sheet);
        Ok(())
    }

    pub fn spritesheet(&self, path: &str) -> Result<&Spritesheet, AssetError> {
        self.spritesheets
            .get(&resolve(path))
            .ok_or_else(|| AssetError::MissingSpritesheet(path.to_string()))
    }

    /// Tile `index` of a loaded spritesheet.
    pub fn sheet_sprite(&self, path: &str, index: usize) -> Result<&Sprite, AssetError> {
        let sheet = self.spritesheet(path)?;
        sheet.get(index).ok_or_else(|| AssetError::TileOutOfBounds {
            path: path.to_string(),
            index: index as u32,
            width: sheet.layout.tile_width * sheet.layout.columns,
            height: sheet.layout.tile_height,
        })
    }
}
