//! Game Objects
//!
//! A game object is a name, a transform, a z-index and an ordered list of
//! components. Lifecycle hooks run over the components in insertion order.

use super::bounds::Bounds;
use super::component::{Capability, Component, FrameContext};
use super::entity::Entity;
use super::renderer::{DrawContext, Surface};
use super::transform::Transform;

/// Name given to objects produced by [`GameObject::copy`]
pub const GENERATED_NAME: &str = "Generated";

#[derive(Debug, Clone)]
pub struct GameObject {
    /// Handle assigned when the object joins a scene, null before that
    pub(crate) id: Entity,
    pub name: String,
    pub transform: Transform,
    pub z_index: i32,
    /// UI objects are drawn in screen space, ignoring the camera
    pub is_ui: bool,
    serializable: bool,
    components: Vec<Component>,
}

impl GameObject {
    pub fn new(name: impl Into<String>, transform: Transform, z_index: i32) -> Self {
        Self {
            id: Entity::NULL,
            name: name.into(),
            transform,
            z_index,
            is_ui: false,
            serializable: true,
            components: Vec::new(),
        }
    }

    pub fn id(&self) -> Entity {
        self.id
    }

    pub fn is_serializable(&self) -> bool {
        self.serializable
    }

    /// Keep this object out of saved levels.
    pub fn set_non_serializable(&mut self) {
        self.serializable = false;
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Append a component. Several components of one kind may coexist;
    /// lookups return the first.
    pub fn add_component(&mut self, component: impl Into<Component>) -> &mut Self {
        self.components.push(component.into());
        self
    }

    /// Builder form of [`add_component`](Self::add_component)
    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component.into());
        self
    }

    /// First component of kind `T`
    pub fn get_component<T: Capability>(&self) -> Option<&T> {
        self.components.iter().find_map(T::extract)
    }

    pub fn get_component_mut<T: Capability>(&mut self) -> Option<&mut T> {
        self.components.iter_mut().find_map(T::extract_mut)
    }

    /// Remove the first component of kind `T`, returning it.
    pub fn remove_component<T: Capability>(&mut self) -> Option<Component> {
        let index = self.components.iter().position(|c| T::extract(c).is_some())?;
        Some(self.components.remove(index))
    }

    /// First component providing the bounds capability
    pub fn bounds(&self) -> Option<&dyn Bounds> {
        self.components.iter().find_map(Component::as_bounds)
    }

    /// Fresh object named "Generated" with the same z-index, a copy of the
    /// transform, and a copy of every component kind that supports copying.
    pub fn copy(&self) -> GameObject {
        let mut object = GameObject::new(GENERATED_NAME, self.transform.clone(), self.z_index);
        object.components = self.components.iter().filter_map(Component::copy).collect();
        object
    }

    pub fn start(&mut self) {
        self.each_component(|component, owner| component.start(owner));
    }

    pub fn update(&mut self, dt: f32, ctx: &mut FrameContext) {
        self.each_component(|component, owner| component.update(dt, owner, ctx));
    }

    /// Draw every component with `transform`, usually the camera-relative view
    /// of this object's own transform.
    pub fn draw(&self, transform: &Transform, surface: &mut dyn Surface, ctx: &DrawContext) {
        for component in &self.components {
            component.draw(self, transform, surface, ctx);
        }
    }

    /// Run `hook` on each component in order, with the component detached so
    /// the hook can borrow the owner mutably.
    fn each_component(&mut self, mut hook: impl FnMut(&mut Component, &mut GameObject)) {
        let mut index = 0;
        while index < self.components.len() {
            let mut component = self.components.remove(index);
            hook(&mut component, self);
            let slot = index.min(self.components.len());
            self.components.insert(slot, component);
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Sprite;
    use crate::config::EngineConfig;
    use crate::game::bounds::BoxBounds;
    use crate::game::components::{Ground, Player, RigidBody};
    use crate::game::event::Events;
    use crate::game::transform::{Camera, Vector2};
    use crate::input::InputSnapshot;
    use image::RgbaImage;
    use std::collections::HashMap;

    fn sprite() -> Sprite {
        Sprite::from_image("assets/groundSprites.png", RgbaImage::new(42, 42))
    }

    #[test]
    fn test_get_returns_first_of_kind() {
        let mut object = GameObject::new("o", Transform::default(), 0);
        object.add_component(BoxBounds::new(1.0, 1.0));
        object.add_component(BoxBounds::new(2.0, 2.0));

        assert_eq!(object.get_component::<BoxBounds>().unwrap().width, 1.0);
        assert!(object.get_component::<RigidBody>().is_none());
    }

    #[test]
    fn test_remove_first_of_kind() {
        let mut object = GameObject::new("o", Transform::default(), 0)
            .with_component(BoxBounds::new(1.0, 1.0))
            .with_component(Ground)
            .with_component(BoxBounds::new(2.0, 2.0));

        assert!(object.remove_component::<BoxBounds>().is_some());
        assert_eq!(object.components().len(), 2);
        assert_eq!(object.get_component::<BoxBounds>().unwrap().width, 2.0);
        assert!(object.remove_component::<RigidBody>().is_none());
    }

    #[test]
    fn test_copy_keeps_only_copyable_components() {
        let mut original = GameObject::new("Tile", Transform::from_position(Vector2::new(84.0, 126.0)), 3)
            .with_component(sprite())
            .with_component(RigidBody::new(Vector2::ZERO))
            .with_component(BoxBounds::new(42.0, 42.0));
        original.is_ui = true;
        original.set_non_serializable();

        let copy = original.copy();
        assert_eq!(copy.name, GENERATED_NAME);
        assert_eq!(copy.z_index, 3);
        assert_eq!(copy.transform, original.transform);
        assert_eq!(copy.components().len(), 2);
        assert!(copy.get_component::<RigidBody>().is_none());
        assert!(!copy.is_ui);
        assert!(copy.is_serializable());
        assert!(copy.id().is_null());

        original.transform.position.x = 0.0;
        assert_eq!(copy.transform.position.x, 84.0);
    }

    #[test]
    fn test_update_runs_in_insertion_order() {
        let config = EngineConfig::default();
        let input = InputSnapshot::default().with_key(crate::input::KeyCode::Space);
        let mut camera = Camera::default();
        let mut events = Events::new();
        let edges = HashMap::new();
        let mut ctx = FrameContext {
            input: &input,
            config: &config,
            camera: &mut camera,
            events: &mut events,
            parallax_edges: &edges,
        };

        // Rigid body first: it integrates before the player applies the jump
        let mut object = GameObject::new("p", Transform::default(), 0)
            .with_component(RigidBody::new(Vector2::new(0.0, 100.0)))
            .with_component(Player::bare(42.0, 42.0));
        object.update(1.0, &mut ctx);

        assert_eq!(object.transform.position.y, 100.0);
        assert_eq!(object.get_component::<RigidBody>().unwrap().velocity.y, -650.0);
        assert!(matches!(object.components()[0], Component::RigidBody(_)));
        assert!(matches!(object.components()[1], Component::Player(_)));
    }

    #[test]
    fn test_bounds_capability() {
        let object = GameObject::new("o", Transform::default(), 0)
            .with_component(sprite())
            .with_component(BoxBounds::new(42.0, 10.0));
        assert_eq!(object.bounds().map(|b| b.height()), Some(10.0));
        assert!(GameObject::new("o", Transform::default(), 0).bounds().is_none());
    }
}
