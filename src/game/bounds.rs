//! Bounding shapes
//!
//! Axis-aligned boxes anchored at the owner's position (top-left corner).
//! Overlap tests compare centres, so boxes that only touch still collide.

use crate::config::WorldConfig;
use super::collision;
use super::object::GameObject;
use super::transform::{Camera, Transform, Vector2};

/// Concrete shape behind a [`Bounds`] capability
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Box(&'a BoxBounds),
}

/// Shape contract shared by every bounding component.
pub trait Bounds {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn shape(&self) -> Shape<'_>;

    /// Does this shape, placed at `own`, overlap `other` placed at `other_transform`?
    fn collide(&self, own: &Transform, other: &dyn Bounds, other_transform: &Transform) -> bool {
        match (self.shape(), other.shape()) {
            (Shape::Box(a), Shape::Box(b)) => check_collision(a, own, b, other_transform),
        }
    }

    /// Push `player` out of this shape (or kill it), treating this shape as an obstacle at `own`.
    fn resolve(&self, own: &Transform, player: &mut GameObject, camera: &mut Camera, world: &WorldConfig) {
        match self.shape() {
            Shape::Box(obstacle) => collision::resolve_collision(obstacle, own, player, camera, world),
        }
    }
}

/// Axis-aligned box, persisted with the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBounds {
    pub width: f32,
    pub height: f32,
}

impl BoxBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Centre of the box when its owner sits at `transform`
    pub fn center(&self, transform: &Transform) -> Vector2 {
        transform.position + Vector2::new(self.half_width(), self.half_height())
    }
}

impl Bounds for BoxBounds {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Box(self)
    }
}

/// Closed AABB overlap test on box centres.
pub fn check_collision(a: &BoxBounds, a_transform: &Transform, b: &BoxBounds, b_transform: &Transform) -> bool {
    let a_center = a.center(a_transform);
    let b_center = b.center(b_transform);

    (a_center.x - b_center.x).abs() <= a.half_width() + b.half_width()
        && (a_center.y - b_center.y).abs() <= a.half_height() + b.half_height()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Transform {
        Transform::from_position(Vector2::new(x, y))
    }

    #[test]
    fn test_center_is_position_plus_half_size() {
        let b = BoxBounds::new(42.0, 20.0);
        assert_eq!(b.center(&at(100.0, 50.0)), Vector2::new(121.0, 60.0));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = BoxBounds::new(42.0, 42.0);
        let b = BoxBounds::new(10.0, 80.0);
        let cases = [(0.0, 0.0), (30.0, 30.0), (60.0, 0.0), (-20.0, 50.0), (0.0, -81.0)];

        for (x, y) in cases {
            assert_eq!(
                check_collision(&a, &at(0.0, 0.0), &b, &at(x, y)),
                check_collision(&b, &at(x, y), &a, &at(0.0, 0.0)),
                "asymmetric at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_touching_boxes_collide() {
        let a = BoxBounds::new(42.0, 42.0);
        let b = BoxBounds::new(42.0, 42.0);

        assert!(check_collision(&a, &at(0.0, 0.0), &b, &at(42.0, 0.0)));
        assert!(check_collision(&a, &at(0.0, 0.0), &b, &at(0.0, 42.0)));
        assert!(!check_collision(&a, &at(0.0, 0.0), &b, &at(42.5, 0.0)));
        assert!(!check_collision(&a, &at(0.0, 0.0), &b, &at(0.0, -42.5)));
    }

    #[test]
    fn test_collide_through_trait_objects() {
        let a: &dyn Bounds = &BoxBounds::new(42.0, 42.0);
        let b: &dyn Bounds = &BoxBounds::new(42.0, 42.0);
        assert!(a.collide(&at(0.0, 0.0), b, &at(20.0, 20.0)));
        assert!(!a.collide(&at(0.0, 0.0), b, &at(100.0, 0.0)));
    }
}
