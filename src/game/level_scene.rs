//! Play Scene
//!
//! Runs the level: the player auto-runs to the right, the camera follows,
//! and every other object is checked against the player's box once per frame.

use crate::asset::{AssetPool, AssetError};
use crate::config::{EngineConfig, SheetConfig, WorldConfig};
use crate::input::InputSnapshot;
use crate::level::load_level;
use crate::storage::LocalStorage;
use super::bounds::BoxBounds;
use super::collision::resolve_ground_contact;
use super::components::{Ground, ParallaxBackground, ParallaxLayer, Player, RigidBody};
use super::entity::Entity;
use super::object::GameObject;
use super::renderer::Surface;
use super::scene::Scene;
use super::transform::{Camera, Transform, Vector2};
use super::SceneError;

pub struct LevelScene {
    pub scene: Scene,
    player: Entity,
}

/// Cut every sheet in `sheets` into the pool.
pub fn register_sheets<'a>(
    assets: &mut AssetPool,
    sheets: impl IntoIterator<Item = &'a SheetConfig>,
) -> Result<(), AssetError> {
    for sheet in sheets {
        assets.add_spritesheet(&sheet.path, sheet.layout())?;
    }
    Ok(())
}

/// The player cube at its start position, with its recoloured layers and no physics.
pub fn player_object(config: &EngineConfig, assets: &AssetPool) -> Result<GameObject, AssetError> {
    let paths = &config.paths.player_layers;
    let layers = [
        assets.sheet_sprite(&paths[0].path, 0)?.clone(),
        assets.sheet_sprite(&paths[1].path, 0)?.clone(),
        assets.sheet_sprite(&paths[2].path, 0)?.clone(),
    ];
    let world = &config.world;
    let player = Player::new(
        layers,
        world.player_primary,
        world.player_secondary,
        world.player_width,
        world.player_height,
    );
    Ok(GameObject::new("Player", Transform::from_position(Vector2::new(500.0, 350.0)), 0).with_component(player))
}

/// The black ground strip at the ground line
pub fn ground_object(world: &WorldConfig) -> GameObject {
    GameObject::new("ground", Transform::from_position(Vector2::new(0.0, world.ground_y)), 1).with_component(Ground)
}

/// Keep the player inside the camera's comfort zone, never scrolling below the ground.
pub fn follow_player(camera: &mut Camera, player: Vector2, world: &WorldConfig) {
    if player.x - camera.position.x > world.camera_offset_x {
        camera.position.x = player.x - world.camera_offset_x;
    }
    if player.y - camera.position.y > world.camera_offset_y {
        camera.position.y = player.y - world.camera_offset_y;
    }
    if camera.position.y > world.camera_offset_ground_y {
        camera.position.y = world.camera_offset_ground_y;
    }
}

impl LevelScene {
    /// Build the play scene and load the configured level into it.
    /// `generation` stamps the scene's entity handles.
    pub fn new(
        config: &EngineConfig,
        assets: &mut AssetPool,
        storage: &LocalStorage,
        generation: u32,
    ) -> Result<Self, SceneError> {
        let paths = &config.paths;
        register_sheets(assets, paths.player_layers.iter().chain([&paths.ground_tiles]))?;

        let mut scene = Scene::with_generation("Level", generation);
        let world = &config.world;
        let player = player_object(config, assets)?
            .with_component(RigidBody::new(Vector2::new(config.physics.player_speed, 0.0)))
            .with_component(BoxBounds::new(world.player_width, world.player_height));
        let player = scene.add_game_object(player);

        Self::init_backgrounds(&mut scene, config, assets)?;

        for object in load_level(storage, &paths.levels_dir, &paths.level_name, assets)? {
            scene.add_game_object(object);
        }
        log::info!("play scene ready with {} objects", scene.len());

        Ok(Self { scene, player })
    }

    fn init_backgrounds(scene: &mut Scene, config: &EngineConfig, assets: &mut AssetPool) -> Result<(), AssetError> {
        let world = &config.world;
        scene.add_game_object(ground_object(world));

        let sky = assets.sprite(&config.paths.background)?.clone();
        let ground = assets.sprite(&config.paths.ground_background)?.clone();
        let ground_speed = config.physics.player_speed - world.ground_speed_lag;

        for i in 0..world.parallax_tiles {
            let x = (i * sky.width) as f32;

            let mut background = GameObject::new("Background", Transform::from_position(Vector2::new(x, 0.0)), -10)
                .with_component(ParallaxBackground::new(sky.clone(), ParallaxLayer::Sky, world.background_speed));
            background.is_ui = true;

            let mut ground_strip = GameObject::new(
                "GroundBg",
                Transform::from_position(Vector2::new(x, sky.height as f32)),
                -9,
            )
            .with_component(ParallaxBackground::new(ground.clone(), ParallaxLayer::Ground, ground_speed));
            ground_strip.is_ui = true;

            scene.add_game_object(background);
            scene.add_game_object(ground_strip);
        }
        Ok(())
    }

    pub fn player(&self) -> Option<&GameObject> {
        self.scene.get(self.player)
    }

    pub fn update(&mut self, dt: f32, input: &InputSnapshot, config: &EngineConfig) {
        let world = &config.world;
        let Some(position) = self.player().map(|player| player.transform.position) else {
            return;
        };
        follow_player(&mut self.scene.camera, position, world);

        let edges = self.scene.parallax_edges();
        self.scene.update_object(self.player, dt, input, config, &edges);
        if let Some(player) = self.scene.get_mut(self.player).and_then(|p| p.get_component_mut::<Player>()) {
            player.on_ground = false;
        }

        for entity in self.scene.entities() {
            if entity == self.player {
                continue;
            }
            self.scene.update_object(entity, dt, input, config, &edges);

            if let Some((player, other)) = self.scene.pair_mut(self.player, entity) {
                if other.get_component::<Ground>().is_some() {
                    resolve_ground_contact(other, player);
                }
            }
            self.scene.collide(self.player, entity, world);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, config: &EngineConfig) {
        let (width, height) = surface.screen_size();
        surface.fill_rect(0.0, 0.0, width, height, config.world.background_color());
        self.scene.render(surface, config);
    }
}
