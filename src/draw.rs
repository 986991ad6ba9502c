//! Window backend for [`Surface`]
//!
//! Sprite pixels are uploaded once and cached by the sprite's pixel buffer.
//! Each cache entry holds a weak handle to its buffer; entries whose buffer
//! is gone are dropped.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Weak;

use image::RgbaImage;
use macroquad::prelude::*;

use crate::asset::Sprite;
use crate::game::{SpriteDraw, Surface};

/// Per-sprite values (GPU textures) keyed by pixel buffer
pub(crate) struct TextureCache<T> {
    entries: HashMap<usize, (Weak<RgbaImage>, T)>,
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> TextureCache<T> {
    /// Cached value for `sprite`'s pixels, built with `make` on a miss.
    pub(crate) fn get_or_insert_with(&mut self, sprite: &Sprite, make: impl FnOnce(&RgbaImage) -> T) -> &T {
        let key = sprite.texture_key();
        if !self.entries.contains_key(&key) {
            self.prune();
        }
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                if entry.get().0.strong_count() == 0 {
                    entry.insert((sprite.image_handle(), make(sprite.image())));
                }
                &entry.into_mut().1
            }
            Entry::Vacant(entry) => &entry.insert((sprite.image_handle(), make(sprite.image()))).1,
        }
    }

    /// Drop entries whose pixel buffer no longer exists.
    pub(crate) fn prune(&mut self) {
        self.entries.retain(|_, (image, _)| image.strong_count() > 0);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Draws to the macroquad window
#[derive(Default)]
pub struct MacroquadSurface {
    textures: TextureCache<Texture2D>,
}

impl MacroquadSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for MacroquadSurface {
    fn screen_size(&self) -> (f32, f32) {
        (screen_width(), screen_height())
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        draw_rectangle(x, y, width, height, color);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        draw_line(x1, y1, x2, y2, 1.0, color);
    }

    fn draw_sprite(&mut self, sprite: &Sprite, params: SpriteDraw) {
        let texture = self.textures.get_or_insert_with(sprite, |image| {
            let texture = Texture2D::from_rgba8(image.width() as u16, image.height() as u16, image.as_raw());
            texture.set_filter(FilterMode::Nearest);
            texture
        });
        draw_texture_ex(
            texture,
            params.x,
            params.y,
            Color::new(1.0, 1.0, 1.0, params.alpha),
            DrawTextureParams {
                dest_size: Some(vec2(params.width, params.height)),
                rotation: params.rotation.to_radians(),
                ..Default::default()
            },
        );
    }
}
