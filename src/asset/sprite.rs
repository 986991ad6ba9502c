//! Sprites and spritesheets
//!
//! A sprite is a decoded RGBA image plus the file path it came from.
//! Spritesheets cut a parent sprite into equally sized tiles in row-major
//! order; each tile remembers its (row, column, index) so the level format
//! can point back at it.

use std::rc::{Rc, Weak};

use image::{imageops, Rgba, RgbaImage};

use super::AssetError;

/// Position of a sub-sprite inside its spritesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteCell {
    pub row: u32,
    pub column: u32,
    /// Row-major index inside the sheet
    pub index: u32,
}

/// A drawable image.
///
/// Pixel data is shared between copies; recolouring copies on write.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Picture file this sprite (or its parent sheet) was loaded from
    pub path: String,
    pub width: u32,
    pub height: u32,
    image: Rc<RgbaImage>,
    /// Set when the sprite was cut from a spritesheet
    pub cell: Option<SpriteCell>,
}

impl Sprite {
    /// Wrap an already decoded image.
    pub fn from_image(path: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            path: path.into(),
            width: image.width(),
            height: image.height(),
            image: Rc::new(image),
            cell: None,
        }
    }

    /// Decode an image file from disk.
    pub fn load(path: &str) -> Result<Self, AssetError> {
        let image = image::open(path)
            .map_err(|source| AssetError::Decode {
                path: path.to_string(),
                source,
            })?
            .to_rgba8();
        Ok(Self::from_image(path, image))
    }

    pub fn is_subsprite(&self) -> bool {
        self.cell.is_some()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Identity of the pixel buffer, stable while any copy is alive.
    /// Draw backends key their texture caches on it.
    pub fn texture_key(&self) -> usize {
        Rc::as_ptr(&self.image) as usize
    }

    /// Non-owning handle to the pixel buffer. While it is held the buffer's
    /// address is never reused, so it keeps a [`Self::texture_key`] honest.
    pub fn image_handle(&self) -> Weak<RgbaImage> {
        Rc::downgrade(&self.image)
    }

    /// Replace every near-white pixel (all channels above `threshold`) with `color`.
    pub fn recolor(&mut self, threshold: u8, color: [u8; 3]) {
        let image = Rc::make_mut(&mut self.image);
        for pixel in image.pixels_mut() {
            let Rgba([r, g, b, a]) = *pixel;
            if r > threshold && g > threshold && b > threshold {
                *pixel = Rgba([color[0], color[1], color[2], a]);
            }
        }
    }
}

/// How a spritesheet is cut from its parent image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Gap in pixels between neighbouring tiles
    pub spacing: u32,
    pub columns: u32,
    /// Total number of tiles
    pub count: u32,
}

/// A set of equally sized sprites cut from one picture.
#[derive(Debug, Clone)]
pub struct Spritesheet {
    pub sprites: Vec<Sprite>,
    pub layout: SheetLayout,
}

impl Spritesheet {
    /// Cut `parent` into tiles following `layout`.
    pub fn new(parent: &Sprite, layout: SheetLayout) -> Result<Self, AssetError> {
        let columns = layout.columns.max(1);
        let mut sprites = Vec::with_capacity(layout.count as usize);

        for index in 0..layout.count {
            let row = index / columns;
            let column = index % columns;
            let x = column * (layout.tile_width + layout.spacing);
            let y = row * (layout.tile_height + layout.spacing);

            if x + layout.tile_width > parent.width || y + layout.tile_height > parent.height {
                return Err(AssetError::TileOutOfBounds {
                    path: parent.path.clone(),
                    index,
                    width: parent.width,
                    height: parent.height,
                });
            }

            let tile = imageops::crop_imm(parent.image(), x, y, layout.tile_width, layout.tile_height).to_image();
            let mut sprite = Sprite::from_image(parent.path.clone(), tile);
            sprite.cell = Some(SpriteCell { row, column, index });
            sprites.push(sprite);
        }

        Ok(Self { sprites, layout })
    }

    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        })
    }

    #[test]
    fn test_sheet_cells_are_row_major() {
        let parent = Sprite::from_image("sheet.png", checker(2 * 10 + 2, 2 * 10 + 2));
        let layout = SheetLayout { tile_width: 10, tile_height: 10, spacing: 2, columns: 2, count: 3 };
        let sheet = Spritesheet::new(&parent, layout).unwrap();

        assert_eq!(sheet.sprites.len(), 3);
        assert_eq!(sheet.sprites[1].cell, Some(SpriteCell { row: 0, column: 1, index: 1 }));
        assert_eq!(sheet.sprites[2].cell, Some(SpriteCell { row: 1, column: 0, index: 2 }));
        // Second tile starts after one tile plus spacing
        assert_eq!(sheet.sprites[1].image().get_pixel(0, 0)[0], 12);
        assert_eq!(sheet.sprites[2].image().get_pixel(0, 0)[1], 12);
        assert_eq!(sheet.sprites[0].path, "sheet.png");
    }

    #[test]
    fn test_sheet_rejects_tiles_outside_image() {
        let parent = Sprite::from_image("small.png", checker(10, 10));
        let layout = SheetLayout { tile_width: 10, tile_height: 10, spacing: 0, columns: 2, count: 2 };
        assert!(matches!(
            Spritesheet::new(&parent, layout),
            Err(AssetError::TileOutOfBounds { index: 1, .. })
        ));
    }

    #[test]
    fn test_recolor_copies_on_write() {
        let white = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let original = Sprite::from_image("layer.png", white);
        let mut tinted = original.clone();
        assert_eq!(original.texture_key(), tinted.texture_key());

        tinted.recolor(200, [255, 0, 0]);
        assert_ne!(original.texture_key(), tinted.texture_key());
        assert_eq!(*tinted.image().get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*original.image().get_pixel(1, 1), Rgba([255, 255, 255, 255]));
    }
}
