//! Renderer
//!
//! Buckets scene objects by z-index and draws them back to front.
//! Buckets hold entity handles; the scene owns the objects. Only occupied
//! z-indices are visited, however far apart they are.
//!
//! Non-UI objects are drawn with a camera-relative copy of their transform.
//! The stored transform is never touched while drawing.

use std::collections::BTreeMap;

use macroquad::color::Color;

use crate::asset::Sprite;
use crate::config::EngineConfig;
use super::entity::Entity;
use super::object::GameObject;
use super::transform::{Camera, Transform};

/// Placement of one sprite draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Degrees, around the sprite centre
    pub rotation: f32,
    pub alpha: f32,
}

impl SpriteDraw {
    /// Unrotated, opaque draw filling `(x, y, width, height)`
    pub fn at(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
            alpha: 1.0,
        }
    }
}

/// Where components draw to. Implemented by the window backend and by tests.
pub trait Surface {
    /// Size of the drawable area in pixels
    fn screen_size(&self) -> (f32, f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color);
    fn draw_sprite(&mut self, sprite: &Sprite, params: SpriteDraw);
}

/// Read-only state lent to every draw call
#[derive(Clone, Copy)]
pub struct DrawContext<'a> {
    pub camera: Camera,
    pub config: &'a EngineConfig,
}

/// Transform an object is drawn with: UI objects draw where they are,
/// everything else is shifted by the camera.
pub fn view_transform(object: &GameObject, camera: &Camera) -> Transform {
    if object.is_ui {
        object.transform.clone()
    } else {
        object.transform.offset_by(camera.position)
    }
}

/// Z-ordered draw list
#[derive(Debug, Default)]
pub struct Renderer {
    buckets: BTreeMap<i32, Vec<Entity>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an object for drawing in the bucket of its z-index.
    pub fn submit(&mut self, entity: Entity, z_index: i32) {
        self.buckets.entry(z_index).or_default().push(entity);
    }

    /// Entities in draw order: ascending z-index, submission order within a bucket.
    pub fn draw_order(&self) -> Vec<Entity> {
        self.buckets.values().flatten().copied().collect()
    }

    /// Draw every submitted object that `lookup` can resolve.
    pub fn render<'a>(
        &self,
        lookup: impl Fn(Entity) -> Option<&'a GameObject>,
        surface: &mut dyn Surface,
        ctx: &DrawContext,
    ) {
        for entity in self.draw_order() {
            if let Some(object) = lookup(entity) {
                let transform = view_transform(object, &ctx.camera);
                object.draw(&transform, surface, ctx);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// One recorded draw call
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Rect { x: f32, y: f32, width: f32, height: f32 },
        Line { x1: f32, y1: f32, x2: f32, y2: f32 },
        Sprite { path: String, params: SpriteDraw },
    }

    /// Surface that records every call instead of drawing
    pub struct RecordingSurface {
        pub size: (f32, f32),
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self {
                size: (1280.0, 720.0),
                calls: Vec::new(),
            }
        }

        pub fn sprites(&self) -> Vec<(String, SpriteDraw)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    DrawCall::Sprite { path, params } => Some((path.clone(), *params)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn screen_size(&self) -> (f32, f32) {
            self.size
        }

        fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, _color: Color) {
            self.calls.push(DrawCall::Rect { x, y, width, height });
        }

        fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, _color: Color) {
            self.calls.push(DrawCall::Line { x1, y1, x2, y2 });
        }

        fn draw_sprite(&mut self, sprite: &Sprite, params: SpriteDraw) {
            self.calls.push(DrawCall::Sprite {
                path: sprite.path.clone(),
                params,
            });
        }
    }
}
