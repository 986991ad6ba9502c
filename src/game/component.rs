//! Components
//!
//! Every behaviour a game object can carry is a variant of [`Component`].
//! The set is closed: adding a kind means adding a variant, and every
//! dispatch below is an exhaustive match, so nothing can be forgotten.
//!
//! Typed lookup goes through [`Capability`]: `object.get_component::<RigidBody>()`
//! returns the first component of that kind. The bounds capability is
//! looked up separately with [`Component::as_bounds`].
//!
//! Hooks receive their owning object as `owner`. While a hook runs the
//! component itself is detached from the owner, so `owner` only exposes
//! its siblings.

use std::collections::HashMap;

use crate::asset::Sprite;
use crate::config::EngineConfig;
use crate::editor::palette::MenuItem;
use crate::input::InputSnapshot;
use super::bounds::{BoxBounds, Bounds};
use super::components::{Ground, ParallaxBackground, ParallaxLayer, Player, RigidBody, SnapToGrid};
use super::event::Events;
use super::object::GameObject;
use super::renderer::{DrawContext, SpriteDraw, Surface};
use super::transform::{Camera, Transform};

/// Everything a component may touch during `update`
pub struct FrameContext<'a> {
    pub input: &'a InputSnapshot,
    pub config: &'a EngineConfig,
    pub camera: &'a mut Camera,
    pub events: &'a mut Events,
    /// Right-most x of each parallax layer, taken before any layer moved this frame
    pub parallax_edges: &'a HashMap<ParallaxLayer, f32>,
}

/// A behaviour attached to a game object
#[derive(Debug, Clone)]
pub enum Component {
    Sprite(Sprite),
    BoxBounds(BoxBounds),
    RigidBody(RigidBody),
    Player(Player),
    Ground(Ground),
    ParallaxBackground(ParallaxBackground),
    SnapToGrid(SnapToGrid),
    MenuItem(MenuItem),
}

/// Typed access to one component kind inside a [`Component`]
pub trait Capability: Sized {
    fn extract(component: &Component) -> Option<&Self>;
    fn extract_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! capability {
    ($($kind:ident),* $(,)?) => {
        $(
            impl Capability for $kind {
                fn extract(component: &Component) -> Option<&Self> {
                    match component {
                        Component::$kind(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn extract_mut(component: &mut Component) -> Option<&mut Self> {
                    match component {
                        Component::$kind(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$kind> for Component {
                fn from(inner: $kind) -> Self {
                    Component::$kind(inner)
                }
            }
        )*
    };
}

capability!(Sprite, BoxBounds, RigidBody, Player, Ground, ParallaxBackground, SnapToGrid, MenuItem);

impl Component {
    pub fn as_bounds(&self) -> Option<&dyn Bounds> {
        match self {
            Component::BoxBounds(bounds) => Some(bounds),
            _ => None,
        }
    }

    /// Called once when the owner enters a scene or palette.
    pub fn start(&mut self, owner: &mut GameObject) {
        if let Component::MenuItem(item) = self {
            item.start(owner);
        }
    }

    pub fn update(&mut self, dt: f32, owner: &mut GameObject, ctx: &mut FrameContext) {
        match self {
            Component::RigidBody(body) => body.update(dt, owner, ctx),
            Component::Player(player) => player.update(dt, owner, ctx),
            Component::Ground(ground) => ground.update(owner, ctx),
            Component::ParallaxBackground(background) => background.update(dt, owner, ctx),
            Component::SnapToGrid(snap) => snap.update(dt, owner, ctx),
            Component::MenuItem(item) => item.update(owner, ctx),
            Component::Sprite(_) | Component::BoxBounds(_) => {}
        }
    }

    /// Draw with `transform`, the owner's transform as seen through the camera.
    pub fn draw(&self, owner: &GameObject, transform: &Transform, surface: &mut dyn Surface, ctx: &DrawContext) {
        match self {
            Component::Sprite(sprite) => {
                let params = SpriteDraw::at(
                    transform.position.x.trunc(),
                    transform.position.y.trunc(),
                    sprite.width as f32,
                    sprite.height as f32,
                );
                surface.draw_sprite(sprite, params);
            }
            Component::Player(player) => player.draw(transform, surface),
            Component::Ground(ground) => ground.draw(transform, surface),
            Component::ParallaxBackground(background) => background.draw(transform, surface, ctx),
            Component::SnapToGrid(snap) => snap.draw(owner, transform, surface),
            Component::MenuItem(item) => item.draw(owner, surface),
            Component::BoxBounds(_) | Component::RigidBody(_) => {}
        }
    }

    /// Independent copy for a duplicated object, `None` for kinds that never carry over.
    pub fn copy(&self) -> Option<Component> {
        match self {
            Component::Sprite(sprite) => Some(Component::Sprite(sprite.clone())),
            Component::BoxBounds(bounds) => Some(Component::BoxBounds(*bounds)),
            Component::RigidBody(_)
            | Component::Player(_)
            | Component::Ground(_)
            | Component::ParallaxBackground(_)
            | Component::SnapToGrid(_)
            | Component::MenuItem(_) => None,
        }
    }
}
