//! Transform Types
//!
//! 2D value types shared by the runtime, the renderer and the level format:
//! - Vector2: plain float pair
//! - Transform: position, scale and rotation of a game object
//! - Camera: world-space offset applied to non-UI objects when drawing

use std::ops::{Add, Sub};

/// 2D float coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    pub const ONE: Vector2 = Vector2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Position, scale and rotation of a game object.
///
/// `Clone` is a deep copy: every field is a value, so the clone is fully
/// independent of the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vector2,
    /// Scale factor per axis, (1, 1) by default
    pub scale: Vector2,
    /// Rotation in degrees
    pub rotation: f32,
}

impl Transform {
    /// Transform at a position with unit scale and no rotation
    pub fn from_position(position: Vector2) -> Self {
        Self {
            position,
            scale: Vector2::ONE,
            rotation: 0.0,
        }
    }

    /// Same transform with its position shifted by `-offset`.
    /// Scale and rotation are kept.
    pub fn offset_by(&self, offset: Vector2) -> Self {
        Self {
            position: self.position - offset,
            scale: self.scale,
            rotation: self.rotation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Vector2::ZERO)
    }
}

/// Scene camera. Only translation is supported.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub position: Vector2,
}

impl Camera {
    pub fn new(position: Vector2) -> Self {
        Self { position }
    }
}
