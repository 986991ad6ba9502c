//! Tile palette
//!
//! One button per ground tile, laid out like the tiles in their sheet.
//! Clicking a button hands the editor a new cursor carrying that tile.

use crate::asset::{AssetError, AssetPool, Sprite};
use crate::config::EngineConfig;
use crate::game::component::FrameContext;
use crate::game::object::GENERATED_NAME;
use crate::game::{BoxBounds, Camera, DrawContext, GameObject, SpriteDraw, Surface, Transform, Vector2};
use crate::input::MouseButton;

/// Palette button. Expects a sibling `Sprite` to show and to hand out.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    button: Sprite,
    hover: Sprite,
    pub selected: bool,
    /// Offset that centres the tile inside the button
    inset: (f32, f32),
}

impl MenuItem {
    pub fn new(x: f32, y: f32, width: f32, height: f32, button: Sprite, hover: Sprite) -> Self {
        Self {
            x,
            y,
            width,
            height,
            button,
            hover,
            selected: false,
            inset: (0.0, 0.0),
        }
    }

    pub fn start(&mut self, owner: &mut GameObject) {
        if let Some(sprite) = owner.get_component::<Sprite>() {
            self.inset = (
                ((self.width - sprite.width as f32) / 2.0).trunc(),
                ((self.height - sprite.height as f32) / 2.0).trunc(),
            );
        }
    }

    pub fn update(&mut self, owner: &mut GameObject, ctx: &mut FrameContext) {
        let mouse = &ctx.input.mouse;
        if self.selected || !mouse.inside(self.x, self.y, self.width, self.height) {
            return;
        }
        if mouse.holding(MouseButton::Left) {
            // The copy never carries this button: copy() drops it
            let cursor = owner.copy();
            log::debug!("picked palette tile at ({}, {})", self.x, self.y);
            ctx.events.pick.send(cursor);
            self.selected = true;
        }
    }

    pub fn draw(&self, owner: &GameObject, surface: &mut dyn Surface) {
        surface.draw_sprite(&self.button, SpriteDraw::at(self.x, self.y, self.width, self.height));
        if let Some(sprite) = owner.get_component::<Sprite>() {
            surface.draw_sprite(
                sprite,
                SpriteDraw::at(
                    self.x + self.inset.0,
                    self.y + self.inset.1,
                    sprite.width as f32,
                    sprite.height as f32,
                ),
            );
        }
        if self.selected {
            surface.draw_sprite(&self.hover, SpriteDraw::at(self.x, self.y, self.width, self.height));
        }
    }
}

/// Row of tile buttons along the bottom of the editor
pub struct Palette {
    items: Vec<GameObject>,
}

impl Palette {
    /// One button per tile of the ground sheet. Both the ground and the button
    /// sheets must already be in the pool.
    pub fn new(config: &EngineConfig, assets: &AssetPool) -> Result<Self, AssetError> {
        let editor = &config.editor;
        let world = &config.world;
        let tiles = assets.spritesheet(&config.paths.ground_tiles.path)?;
        let button = assets.sheet_sprite(&config.paths.buttons.path, 0)?;
        let hover = assets.sheet_sprite(&config.paths.buttons.path, 1)?;

        let mut items = Vec::with_capacity(tiles.sprites.len());
        for tile in &tiles.sprites {
            let (row, column) = tile.cell.map(|c| (c.row as f32, c.column as f32)).unwrap_or_default();
            let x = editor.button_offset.0 + column * (editor.button_width + editor.button_spacing_horizontal);
            let y = editor.button_offset.1 + row * (editor.button_height + editor.button_spacing_vertical);

            let item = GameObject::new(GENERATED_NAME, Transform::from_position(Vector2::new(x, y)), -1)
                .with_component(tile.clone())
                .with_component(MenuItem::new(
                    x,
                    y,
                    editor.button_width,
                    editor.button_height,
                    button.clone(),
                    hover.clone(),
                ))
                .with_component(BoxBounds::new(world.tile_width, world.tile_height));
            items.push(item);
        }

        Ok(Self { items })
    }

    #[cfg(test)]
    pub(crate) fn items(&self) -> &[GameObject] {
        &self.items
    }

    pub fn start(&mut self) {
        for item in &mut self.items {
            item.start();
        }
    }

    /// Update every button. A newly selected button deselects the others.
    pub fn update(&mut self, dt: f32, ctx: &mut FrameContext) {
        let mut picked = None;
        for (i, item) in self.items.iter_mut().enumerate() {
            let was_selected = is_selected(item);
            item.update(dt, ctx);
            if !was_selected && is_selected(item) {
                picked = Some(i);
            }
        }

        if let Some(picked) = picked {
            for (i, item) in self.items.iter_mut().enumerate() {
                if i != picked {
                    if let Some(menu_item) = item.get_component_mut::<MenuItem>() {
                        menu_item.selected = false;
                    }
                }
            }
        }
    }

    /// Buttons live in screen space and ignore the camera.
    pub fn draw(&self, surface: &mut dyn Surface, config: &EngineConfig) {
        let ctx = DrawContext {
            camera: Camera::default(),
            config,
        };
        for item in &self.items {
            item.draw(&item.transform, surface, &ctx);
        }
    }
}

fn is_selected(item: &GameObject) -> bool {
    item.get_component::<MenuItem>().is_some_and(|m| m.selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::event::Events;
    use crate::game::level_scene::{register_sheets, testing::blank_assets};
    use crate::game::renderer::testing::RecordingSurface;
    use crate::input::InputSnapshot;
    use std::collections::HashMap;

    fn palette(config: &EngineConfig) -> Palette {
        let mut assets = blank_assets(config);
        register_sheets(&mut assets, [&config.paths.ground_tiles, &config.paths.buttons]).unwrap();
        let mut palette = Palette::new(config, &assets).unwrap();
        palette.start();
        palette
    }

    fn click(palette: &mut Palette, config: &EngineConfig, events: &mut Events, x: f32, y: f32) {
        let input = InputSnapshot::default().with_click(x, y, MouseButton::Left);
        let mut camera = Camera::default();
        let edges = HashMap::new();
        let mut ctx = FrameContext {
            input: &input,
            config,
            camera: &mut camera,
            events,
            parallax_edges: &edges,
        };
        palette.update(0.016, &mut ctx);
    }

    fn selected(palette: &Palette) -> Vec<usize> {
        (0..palette.items().len()).filter(|&i| is_selected(&palette.items()[i])).collect()
    }

    #[test]
    fn test_buttons_follow_sheet_layout() {
        let config = EngineConfig::default();
        let palette = palette(&config);
        assert_eq!(palette.items().len(), 12);

        // tile 7 sits at row 1, column 1 of the sheet
        let item = palette.items()[7].get_component::<MenuItem>().unwrap();
        assert_eq!((item.x, item.y), (470.0, 625.0));
        assert_eq!(palette.items()[7].z_index, -1);
    }

    #[test]
    fn test_click_picks_tile_and_moves_selection() {
        let config = EngineConfig::default();
        let mut palette = palette(&config);
        let mut events = Events::new();

        click(&mut palette, &config, &mut events, 430.0, 590.0);
        assert_eq!(selected(&palette), vec![0]);
        let picked: Vec<GameObject> = events.pick.drain().collect();
        assert_eq!(picked.len(), 1);
        assert!(picked[0].get_component::<Sprite>().is_some());
        assert!(picked[0].get_component::<BoxBounds>().is_some());
        assert!(picked[0].get_component::<MenuItem>().is_none());

        // clicking the selected button again does nothing
        click(&mut palette, &config, &mut events, 430.0, 590.0);
        assert!(events.pick.is_empty());

        click(&mut palette, &config, &mut events, 500.0, 590.0);
        assert_eq!(selected(&palette), vec![1]);
        assert_eq!(events.pick.len(), 1);
    }

    #[test]
    fn test_selected_button_draws_hover() {
        let config = EngineConfig::default();
        let mut palette = palette(&config);
        let mut surface = RecordingSurface::new();
        palette.draw(&mut surface, &config);
        let idle = surface.sprites().len();

        click(&mut palette, &config, &mut Events::new(), 430.0, 590.0);
        let mut surface = RecordingSurface::new();
        palette.draw(&mut surface, &config);
        assert_eq!(surface.sprites().len(), idle + 1);
    }
}
