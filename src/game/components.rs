//! Runtime Components
//!
//! Behaviours that only exist while a scene runs. None of these are
//! written to level files.

use std::collections::HashMap;

use macroquad::color::BLACK;

use crate::asset::Sprite;
use crate::config::WorldConfig;
use crate::input::{KeyCode, MouseButton};
use super::component::FrameContext;
use super::object::GameObject;
use super::renderer::{DrawContext, SpriteDraw, Surface};
use super::transform::{Camera, Transform, Vector2};

/// Channels above this count as "white" when recolouring player layers
const RECOLOR_THRESHOLD: u8 = 200;

// ============================================================================
// Physics
// ============================================================================

/// Velocity integrated every frame with gravity, clamped to the terminal speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub velocity: Vector2,
}

impl RigidBody {
    pub fn new(velocity: Vector2) -> Self {
        Self { velocity }
    }

    pub fn update(&mut self, dt: f32, owner: &mut GameObject, ctx: &FrameContext) {
        let physics = &ctx.config.physics;

        owner.transform.position.y += self.velocity.y * dt;
        owner.transform.position.x += self.velocity.x * dt;

        self.velocity.y += physics.gravity * dt;
        if self.velocity.y.abs() > physics.max_velocity {
            self.velocity.y = self.velocity.y.signum() * physics.max_velocity;
        }
    }
}

// ============================================================================
// Player
// ============================================================================

/// The controllable cube: three stacked sprite layers, jump on Space,
/// spin while airborne.
#[derive(Debug, Clone)]
pub struct Player {
    layers: [Sprite; 3],
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
}

impl Player {
    /// Build a player from its three layers, recolouring the white parts of
    /// the first two with `primary` and `secondary`.
    pub fn new(mut layers: [Sprite; 3], primary: [u8; 3], secondary: [u8; 3], width: f32, height: f32) -> Self {
        layers[0].recolor(RECOLOR_THRESHOLD, primary);
        layers[1].recolor(RECOLOR_THRESHOLD, secondary);
        Self {
            layers,
            width,
            height,
            on_ground: true,
        }
    }

    /// Player with transparent layers, for headless tests.
    #[cfg(test)]
    pub(crate) fn bare(width: f32, height: f32) -> Self {
        let blank = Sprite::from_image("", image::RgbaImage::new(width as u32, height as u32));
        Self {
            layers: [blank.clone(), blank.clone(), blank],
            width,
            height,
            on_ground: true,
        }
    }

    pub fn update(&mut self, dt: f32, owner: &mut GameObject, ctx: &FrameContext) {
        if self.on_ground && ctx.input.key_down(KeyCode::Space) {
            if let Some(body) = owner.get_component_mut::<RigidBody>() {
                body.velocity.y = ctx.config.physics.jump_force;
            }
            self.on_ground = false;
        }

        if !self.on_ground {
            owner.transform.rotation += ctx.config.physics.spin_rate * dt;
        } else {
            // Snap back upright unless resting flat on a face (0 or 180 degrees)
            let rotation = (owner.transform.rotation as i32 % 360) as f32;
            owner.transform.rotation = if (rotation > 0.0 && rotation < 180.0) || (rotation > 180.0 && rotation < 360.0) {
                0.0
            } else {
                rotation
            };
        }
    }

    pub fn draw(&self, transform: &Transform, surface: &mut dyn Surface) {
        let params = SpriteDraw {
            x: transform.position.x,
            y: transform.position.y,
            width: self.width * transform.scale.x,
            height: self.height * transform.scale.y,
            rotation: transform.rotation,
            alpha: 1.0,
        };
        for layer in &self.layers {
            surface.draw_sprite(layer, params);
        }
    }

    /// Put `owner` down at height `y`: stop falling and mark it grounded.
    pub fn land(owner: &mut GameObject, y: f32) {
        owner.transform.position.y = y;
        if let Some(body) = owner.get_component_mut::<RigidBody>() {
            body.velocity.y = 0.0;
        }
        if let Some(player) = owner.get_component_mut::<Player>() {
            player.on_ground = true;
        }
    }

    /// Send `owner` back to the respawn point and rewind the camera.
    pub fn die(owner: &mut GameObject, camera: &mut Camera, world: &WorldConfig) {
        log::info!("player died at {:?}", owner.transform.position);
        owner.transform.position = Vector2::new(world.respawn.0, world.respawn.1);
        camera.position.x = 0.0;
    }
}

// ============================================================================
// Ground
// ============================================================================

/// Black strip marking the ground plane. Follows the camera horizontally.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ground;

impl Ground {
    pub fn update(&mut self, owner: &mut GameObject, ctx: &FrameContext) {
        owner.transform.position.x = ctx.camera.position.x - 10.0;
    }

    pub fn draw(&self, transform: &Transform, surface: &mut dyn Surface) {
        let (screen_width, _) = surface.screen_size();
        surface.fill_rect(
            transform.position.x.trunc() - 10.0,
            transform.position.y.trunc(),
            screen_width + 20.0,
            10.0,
            BLACK,
        );
    }
}

// ============================================================================
// Parallax
// ============================================================================

/// Which strip a parallax tile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParallaxLayer {
    /// Sky, drawn full height with the ground colour below the ground line
    Sky,
    /// Ground texture, pinned to the ground line
    Ground,
}

/// One tile of a horizontally wrapping background strip.
///
/// Objects carrying this are UI objects: the layer applies the camera
/// itself (vertically, for the ground strip).
#[derive(Debug, Clone)]
pub struct ParallaxBackground {
    sprite: Sprite,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub layer: ParallaxLayer,
}

impl ParallaxBackground {
    pub fn new(sprite: Sprite, layer: ParallaxLayer, speed: f32) -> Self {
        Self {
            width: sprite.width as f32,
            height: sprite.height as f32,
            sprite,
            speed,
            layer,
        }
    }

    pub fn update(&mut self, dt: f32, owner: &mut GameObject, ctx: &FrameContext) {
        let position = &mut owner.transform.position;
        position.x = (position.x - dt * self.speed).floor();

        if position.x < -self.width {
            // Re-enter just right of the right-most peer, which moves by dt * speed this frame too
            let edge = ctx.parallax_edges.get(&self.layer).copied().unwrap_or(0.0);
            position.x = (edge + self.width - dt * self.speed).floor();
        }

        if self.layer == ParallaxLayer::Ground {
            position.y = ctx.config.world.ground_y;
        }
    }

    pub fn draw(&self, transform: &Transform, surface: &mut dyn Surface, ctx: &DrawContext) {
        let x = transform.position.x.trunc();
        let camera_y = ctx.camera.position.y;
        match self.layer {
            ParallaxLayer::Ground => {
                let y = (transform.position.y - camera_y).trunc();
                surface.draw_sprite(&self.sprite, SpriteDraw::at(x, y, self.width, self.height));
            }
            ParallaxLayer::Sky => {
                let (_, screen_height) = surface.screen_size();
                let horizon = (ctx.config.world.ground_y - camera_y).trunc().min(screen_height);
                surface.draw_sprite(
                    &self.sprite,
                    SpriteDraw::at(x, transform.position.y.trunc(), self.width, screen_height),
                );
                surface.fill_rect(x, horizon, self.width, screen_height, ctx.config.world.ground_color());
            }
        }
    }
}

// ============================================================================
// Editor cursor
// ============================================================================

/// Locks its owner to the grid cell under the mouse and places a copy of
/// the owner on left click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapToGrid {
    pub grid_width: f32,
    pub grid_height: f32,
    /// Minimum time between two placements
    pub debounce_time: f32,
    debounce_left: f32,
}

impl SnapToGrid {
    pub fn new(grid_width: f32, grid_height: f32, debounce_time: f32) -> Self {
        Self {
            grid_width,
            grid_height,
            debounce_time,
            debounce_left: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, owner: &mut GameObject, ctx: &mut FrameContext) {
        self.debounce_left -= dt;

        if owner.get_component::<Sprite>().is_none() {
            return;
        }

        let mouse = &ctx.input.mouse;
        let camera = ctx.camera.position;
        let column = ((mouse.x + camera.x + mouse.dx) / self.grid_width).floor();
        let row = ((mouse.y + camera.y + mouse.dy) / self.grid_height).floor();
        let cell = Vector2::new(column * self.grid_width, row * self.grid_height);

        // The cursor is drawn in screen space
        owner.transform.position = cell - camera;

        let over_palette = mouse.y >= ctx.config.editor.button_offset.1;
        if !over_palette && mouse.holding(MouseButton::Left) && self.debounce_left < 0.0 {
            self.debounce_left = self.debounce_time;
            let mut placed = owner.copy();
            placed.transform.position = cell;
            log::debug!("placing tile at {:?}", cell);
            ctx.events.spawn.send(placed);
        }
    }

    /// Ghost of the owner's sprite at half opacity
    pub fn draw(&self, owner: &GameObject, transform: &Transform, surface: &mut dyn Surface) {
        if let Some(sprite) = owner.get_component::<Sprite>() {
            let mut params = SpriteDraw::at(
                transform.position.x.trunc(),
                transform.position.y.trunc(),
                sprite.width as f32,
                sprite.height as f32,
            );
            params.alpha = 0.5;
            surface.draw_sprite(sprite, params);
        }
    }
}

/// Largest x among the parallax tiles of each layer, never below zero
pub fn parallax_edges<'a>(objects: impl IntoIterator<Item = &'a GameObject>) -> HashMap<ParallaxLayer, f32> {
    let mut edges = HashMap::new();
    for object in objects {
        if let Some(background) = object.get_component::<ParallaxBackground>() {
            let edge = edges.entry(background.layer).or_insert(0.0f32);
            *edge = edge.max(object.transform.position.x);
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::game::event::Events;
    use crate::game::renderer::testing::RecordingSurface;
    use crate::input::InputSnapshot;
    use image::RgbaImage;

    struct Frame {
        input: InputSnapshot,
        config: EngineConfig,
        camera: Camera,
        events: Events,
        edges: HashMap<ParallaxLayer, f32>,
    }

    impl Frame {
        fn new() -> Self {
            Self {
                input: InputSnapshot::default(),
                config: EngineConfig::default(),
                camera: Camera::default(),
                events: Events::new(),
                edges: HashMap::new(),
            }
        }

        fn update(&mut self, object: &mut GameObject, dt: f32) {
            let mut ctx = FrameContext {
                input: &self.input,
                config: &self.config,
                camera: &mut self.camera,
                events: &mut self.events,
                parallax_edges: &self.edges,
            };
            object.update(dt, &mut ctx);
        }
    }

    fn tile_sprite() -> Sprite {
        Sprite::from_image("assets/groundSprites.png", RgbaImage::new(42, 42))
    }

    fn player_object() -> GameObject {
        let mut player = GameObject::new("Player", Transform::from_position(Vector2::new(500.0, 350.0)), 0);
        player.add_component(Player::bare(42.0, 42.0));
        player.add_component(RigidBody::new(Vector2::new(395.0, 0.0)));
        player
    }

    #[test]
    fn test_rigid_body_integrates_then_accelerates() {
        let mut frame = Frame::new();
        let mut object = GameObject::new("body", Transform::default(), 0);
        object.add_component(RigidBody::new(Vector2::new(100.0, 10.0)));

        frame.update(&mut object, 0.5);
        assert_eq!(object.transform.position, Vector2::new(50.0, 5.0));
        assert_eq!(object.get_component::<RigidBody>().unwrap().velocity.y, 10.0 + 2850.0 * 0.5);
    }

    #[test]
    fn test_rigid_body_clamps_terminal_velocity() {
        let mut frame = Frame::new();
        let mut object = GameObject::new("body", Transform::default(), 0);
        object.add_component(RigidBody::new(Vector2::new(0.0, 1800.0)));

        frame.update(&mut object, 1.0);
        assert_eq!(object.get_component::<RigidBody>().unwrap().velocity.y, 1900.0);

        object.get_component_mut::<RigidBody>().unwrap().velocity.y = -5000.0;
        frame.update(&mut object, 0.0);
        assert_eq!(object.get_component::<RigidBody>().unwrap().velocity.y, -1900.0);
    }

    #[test]
    fn test_jump_sets_velocity_and_leaves_ground() {
        let mut frame = Frame::new();
        frame.input = InputSnapshot::default().with_key(KeyCode::Space);
        let mut player = player_object();

        frame.update(&mut player, 0.0);
        // player updates before its rigid body, which then sees the jump force
        assert_eq!(player.get_component::<RigidBody>().unwrap().velocity.y, -650.0);
        assert!(!player.get_component::<Player>().unwrap().on_ground);
    }

    #[test]
    fn test_airborne_player_spins_and_lands_upright() {
        let mut frame = Frame::new();
        let mut player = player_object();
        player.get_component_mut::<Player>().unwrap().on_ground = false;

        frame.update(&mut player, 0.1);
        assert!(player.transform.rotation > 0.0);

        player.get_component_mut::<Player>().unwrap().on_ground = true;
        frame.update(&mut player, 0.1);
        assert_eq!(player.transform.rotation, 0.0);

        player.transform.rotation = 450.0;
        frame.update(&mut player, 0.1);
        assert_eq!(player.transform.rotation, 0.0);

        player.transform.rotation = 180.0;
        frame.update(&mut player, 0.1);
        assert_eq!(player.transform.rotation, 180.0);
    }

    #[test]
    fn test_die_respawns_and_rewinds_camera() {
        let world = WorldConfig::default();
        let mut camera = Camera::new(Vector2::new(900.0, 120.0));
        let mut player = player_object();

        Player::die(&mut player, &mut camera, &world);
        assert_eq!(player.transform.position, Vector2::new(0.0, 30.0));
        assert_eq!(camera.position, Vector2::new(0.0, 120.0));
    }

    #[test]
    fn test_ground_follows_camera() {
        let mut frame = Frame::new();
        frame.camera.position.x = 1234.0;
        let mut ground = GameObject::new("ground", Transform::from_position(Vector2::new(0.0, 714.0)), 1);
        ground.add_component(Ground);

        frame.update(&mut ground, 0.016);
        assert_eq!(ground.transform.position, Vector2::new(1224.0, 714.0));
    }

    #[test]
    fn test_parallax_scrolls_and_wraps_behind_peers() {
        let mut frame = Frame::new();
        let sprite = Sprite::from_image("bg.png", RgbaImage::new(100, 50));
        let mut tile = GameObject::new("Background", Transform::from_position(Vector2::new(10.0, 0.0)), -10);
        tile.is_ui = true;
        tile.add_component(ParallaxBackground::new(sprite, ParallaxLayer::Sky, 80.0));

        frame.update(&mut tile, 0.1);
        assert_eq!(tile.transform.position.x, 2.0);

        tile.transform.position.x = -95.0;
        frame.edges.insert(ParallaxLayer::Sky, 500.0);
        frame.update(&mut tile, 0.1);
        assert_eq!(tile.transform.position.x, 592.0);
    }

    #[test]
    fn test_ground_strip_pinned_to_ground_line() {
        let mut frame = Frame::new();
        let sprite = Sprite::from_image("ground.png", RgbaImage::new(100, 50));
        let mut tile = GameObject::new("GroundBg", Transform::from_position(Vector2::new(0.0, 50.0)), -9);
        tile.add_component(ParallaxBackground::new(sprite, ParallaxLayer::Ground, 360.0));

        frame.update(&mut tile, 0.0);
        assert_eq!(tile.transform.position.y, 714.0);
    }

    #[test]
    fn test_parallax_edges_per_layer() {
        let sky = Sprite::from_image("bg.png", RgbaImage::new(10, 10));
        let mut objects = Vec::new();
        for (x, layer) in [(-30.0, ParallaxLayer::Sky), (70.0, ParallaxLayer::Sky), (-5.0, ParallaxLayer::Ground)] {
            let mut object = GameObject::new("bg", Transform::from_position(Vector2::new(x, 0.0)), -10);
            object.add_component(ParallaxBackground::new(sky.clone(), layer, 1.0));
            objects.push(object);
        }

        let edges = parallax_edges(&objects);
        assert_eq!(edges[&ParallaxLayer::Sky], 70.0);
        assert_eq!(edges[&ParallaxLayer::Ground], 0.0);
    }

    #[test]
    fn test_snap_to_grid_places_copy_on_click() {
        let mut frame = Frame::new();
        frame.camera.position = Vector2::new(100.0, 0.0);
        frame.input = InputSnapshot::default().with_click(50.0, 100.0, MouseButton::Left);

        let mut cursor = GameObject::new("Mouse Cursor", Transform::default(), 10);
        cursor.add_component(tile_sprite());
        cursor.add_component(SnapToGrid::new(42.0, 42.0, 0.2));

        frame.update(&mut cursor, 0.016);
        // (50 + 100) / 42 -> column 3, 100 / 42 -> row 2
        assert_eq!(cursor.transform.position, Vector2::new(126.0 - 100.0, 84.0));

        let placed: Vec<GameObject> = frame.events.spawn.drain().collect();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].transform.position, Vector2::new(126.0, 84.0));
        assert!(placed[0].get_component::<Sprite>().is_some());
        assert!(placed[0].get_component::<SnapToGrid>().is_none());

        // still inside the debounce window
        frame.update(&mut cursor, 0.016);
        assert!(frame.events.spawn.is_empty());
    }

    #[test]
    fn test_snap_to_grid_ignores_clicks_on_palette() {
        let mut frame = Frame::new();
        frame.input = InputSnapshot::default().with_click(450.0, 600.0, MouseButton::Left);

        let mut cursor = GameObject::new("Mouse Cursor", Transform::default(), 10);
        cursor.add_component(tile_sprite());
        cursor.add_component(SnapToGrid::new(42.0, 42.0, 0.2));

        frame.update(&mut cursor, 0.016);
        assert!(frame.events.spawn.is_empty());
    }

    #[test]
    fn test_player_draws_three_layers_rotated() {
        let config = EngineConfig::default();
        let ctx = DrawContext { camera: Camera::default(), config: &config };
        let mut player = player_object();
        player.transform.rotation = 90.0;

        let mut surface = RecordingSurface::new();
        player.draw(&player.transform.clone(), &mut surface, &ctx);

        let sprites = surface.sprites();
        assert_eq!(sprites.len(), 3);
        assert!(sprites.iter().all(|(_, p)| p.rotation == 90.0 && p.width == 42.0));
    }
}
