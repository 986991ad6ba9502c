//! Scene
//!
//! Owns the game objects of one screen (editor or play), the camera and the
//! draw list. Objects are only ever added; handles stay valid for the life
//! of the scene. Scenes built with different generations never resolve each
//! other's handles.

use std::collections::HashMap;

use crate::config::{EngineConfig, WorldConfig};
use crate::input::InputSnapshot;
use super::component::FrameContext;
use super::components::{parallax_edges, ParallaxLayer};
use super::entity::{Entity, EntityAllocator};
use super::event::Events;
use super::object::GameObject;
use super::renderer::{DrawContext, Renderer, Surface};
use super::transform::Camera;

pub struct Scene {
    pub name: String,
    pub camera: Camera,
    pub events: Events,
    entities: EntityAllocator,
    objects: Vec<GameObject>,
    renderer: Renderer,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_generation(name, 0)
    }

    /// Scene whose handles carry `generation`
    pub fn with_generation(name: impl Into<String>, generation: u32) -> Self {
        Self {
            name: name.into(),
            camera: Camera::default(),
            events: Events::new(),
            entities: EntityAllocator::with_generation(generation),
            objects: Vec::new(),
            renderer: Renderer::new(),
        }
    }

    /// Add an object: give it a handle, queue it for drawing, then start its components.
    pub fn add_game_object(&mut self, mut object: GameObject) -> Entity {
        let entity = self.entities.allocate();
        object.id = entity;
        self.renderer.submit(entity, object.z_index);
        object.start();
        log::trace!("{}: added '{}' as {:?}", self.name, object.name, entity);
        self.objects.push(object);
        entity
    }

    pub fn get(&self, entity: Entity) -> Option<&GameObject> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.objects.get(entity.index() as usize)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut GameObject> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.objects.get_mut(entity.index() as usize)
    }

    /// Objects in the order they were added
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Handles in the order they were added
    pub fn entities(&self) -> Vec<Entity> {
        self.objects.iter().map(GameObject::id).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Snapshot of each parallax layer's right-most tile, taken before a frame's updates
    pub fn parallax_edges(&self) -> HashMap<ParallaxLayer, f32> {
        parallax_edges(&self.objects)
    }

    /// Run one object's update hooks against this scene's camera and events.
    pub fn update_object(
        &mut self,
        entity: Entity,
        dt: f32,
        input: &InputSnapshot,
        config: &EngineConfig,
        edges: &HashMap<ParallaxLayer, f32>,
    ) {
        if !self.entities.is_alive(entity) {
            return;
        }
        let Some(object) = self.objects.get_mut(entity.index() as usize) else {
            return;
        };
        let mut ctx = FrameContext {
            input,
            config,
            camera: &mut self.camera,
            events: &mut self.events,
            parallax_edges: edges,
        };
        object.update(dt, &mut ctx);
    }

    /// Check `player` against the bounds of `other` and resolve any overlap.
    /// Returns whether the two overlapped.
    pub fn collide(&mut self, player: Entity, other: Entity, world: &WorldConfig) -> bool {
        let Some((player, other)) = Self::split_pair(&mut self.objects, &self.entities, player, other) else {
            return false;
        };
        let (Some(player_bounds), Some(other_bounds)) = (player.bounds(), other.bounds()) else {
            return false;
        };
        if !player_bounds.collide(&player.transform, other_bounds, &other.transform) {
            return false;
        }
        other_bounds.resolve(&other.transform, player, &mut self.camera, world);
        true
    }

    /// Add every object queued on the spawn channel. Returns how many were added.
    pub fn add_spawned(&mut self) -> usize {
        let spawned: Vec<GameObject> = self.events.spawn.drain().collect();
        let count = spawned.len();
        for object in spawned {
            self.add_game_object(object);
        }
        count
    }

    pub fn render(&self, surface: &mut dyn Surface, config: &EngineConfig) {
        let ctx = DrawContext {
            camera: self.camera,
            config,
        };
        self.renderer.render(|entity| self.get(entity), surface, &ctx);
    }

    /// Mutable borrow of `a` alongside a shared borrow of a different object `b`
    pub fn pair_mut(&mut self, a: Entity, b: Entity) -> Option<(&mut GameObject, &GameObject)> {
        Self::split_pair(&mut self.objects, &self.entities, a, b)
    }

    fn split_pair<'a>(
        objects: &'a mut [GameObject],
        entities: &EntityAllocator,
        a: Entity,
        b: Entity,
    ) -> Option<(&'a mut GameObject, &'a GameObject)> {
        if !entities.is_alive(a) || !entities.is_alive(b) || a == b {
            return None;
        }
        let (a, b) = (a.index() as usize, b.index() as usize);
        if a.max(b) >= objects.len() {
            return None;
        }
        if a < b {
            let (left, right) = objects.split_at_mut(b);
            Some((&mut left[a], &right[0]))
        } else {
            let (left, right) = objects.split_at_mut(a);
            Some((&mut right[0], &left[b]))
        }
    }
}
