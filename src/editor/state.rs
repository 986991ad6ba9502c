//! Level editor scene
//!
//! Place tiles on a grid with the mouse, pan with the middle button,
//! save (S), reload (L) and play (E) the level.

use crate::asset::AssetPool;
use crate::config::EngineConfig;
use crate::game::component::FrameContext;
use crate::game::components::SnapToGrid;
use crate::game::level_scene::{ground_object, player_object, register_sheets};
use crate::game::{DrawContext, Entity, GameObject, Scene, SceneError, Surface, Transform};
use crate::input::{InputSnapshot, KeyCode};
use crate::level::{load_level, save_level};
use crate::storage::LocalStorage;
use super::grid::{CameraControls, Grid};
use super::palette::Palette;

/// What the editor asks the app to do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRequest {
    /// Switch to the play scene
    Play,
}

pub struct LevelEditorScene {
    pub scene: Scene,
    player: Entity,
    grid: Grid,
    camera_controls: CameraControls,
    palette: Palette,
    cursor: GameObject,
}

impl LevelEditorScene {
    /// `generation` stamps the scene's entity handles.
    pub fn new(config: &EngineConfig, assets: &mut AssetPool, generation: u32) -> Result<Self, SceneError> {
        let paths = &config.paths;
        register_sheets(
            assets,
            paths.player_layers.iter().chain([&paths.ground_tiles, &paths.buttons]),
        )?;

        let mut palette = Palette::new(config, assets)?;
        palette.start();

        let cursor = GameObject::new("Mouse Cursor", Transform::default(), 10).with_component(SnapToGrid::new(
            config.world.tile_width,
            config.world.tile_height,
            config.editor.place_debounce,
        ));

        let mut scene = Scene::with_generation("Editor", generation);
        let mut player = player_object(config, assets)?;
        player.set_non_serializable();
        let mut ground = ground_object(&config.world);
        ground.set_non_serializable();
        let player = scene.add_game_object(player);
        scene.add_game_object(ground);

        Ok(Self {
            scene,
            player,
            grid: Grid::new(&config.world, &config.editor),
            camera_controls: CameraControls::new(),
            palette,
            cursor,
        })
    }

    pub fn player(&self) -> Option<&GameObject> {
        self.scene.get(self.player)
    }

    pub fn cursor(&self) -> &GameObject {
        &self.cursor
    }

    pub fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        config: &EngineConfig,
        assets: &AssetPool,
        storage: &LocalStorage,
    ) -> Result<Option<EditorRequest>, SceneError> {
        let ground_limit = config.world.camera_offset_ground_y;
        if self.scene.camera.position.y > ground_limit {
            self.scene.camera.position.y = ground_limit;
        }

        let edges = self.scene.parallax_edges();
        for entity in self.scene.entities() {
            self.scene.update_object(entity, dt, input, config, &edges);
        }

        self.camera_controls.update(input, &mut self.scene.camera);

        let mut ctx = FrameContext {
            input,
            config,
            camera: &mut self.scene.camera,
            events: &mut self.scene.events,
            parallax_edges: &edges,
        };
        self.palette.update(dt, &mut ctx);
        self.cursor.update(dt, &mut ctx);

        self.apply_pick();
        self.scene.add_spawned();

        let paths = &config.paths;
        if input.key_pressed(KeyCode::S) {
            let objects = self.scene.objects();
            save_level(storage, &paths.levels_dir, &paths.level_name, objects)?;
        } else if input.key_pressed(KeyCode::L) {
            for object in load_level(storage, &paths.levels_dir, &paths.level_name, assets)? {
                self.scene.add_game_object(object);
            }
        } else if input.key_pressed(KeyCode::E) {
            return Ok(Some(EditorRequest::Play));
        }
        Ok(None)
    }

    /// Swap in the last picked palette tile as the cursor, keeping the
    /// placement state of the current one.
    fn apply_pick(&mut self) {
        let Some(mut cursor) = self.scene.events.pick.drain().last() else {
            return;
        };
        if let Some(snap) = self.cursor.remove_component::<SnapToGrid>() {
            cursor.add_component(snap);
        }
        self.cursor = cursor;
    }

    pub fn draw(&self, surface: &mut dyn Surface, config: &EngineConfig) {
        let (width, height) = surface.screen_size();
        surface.fill_rect(0.0, 0.0, width, height, macroquad::color::WHITE);
        self.scene.render(surface, config);
        self.grid.draw(surface, &self.scene.camera, config.world.ground_y);
        self.palette.draw(surface, config);

        let ctx = DrawContext {
            camera: self.scene.camera,
            config,
        };
        self.cursor.draw(&self.cursor.transform, surface, &ctx);
    }
}
