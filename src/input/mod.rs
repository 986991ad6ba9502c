//! Input snapshots
//!
//! The core never talks to the window directly. Once per frame the app
//! polls macroquad into an [`InputSnapshot`] and lends it to the scene;
//! components read pressed state, cursor position and per-frame deltas
//! from it.

mod state;

pub use state::InputState;

use std::collections::HashSet;

pub use macroquad::input::KeyCode;

/// Mouse buttons the editor cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Mouse state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseSnapshot {
    /// Cursor position in window coordinates
    pub x: f32,
    pub y: f32,
    /// Cursor movement since last frame while a button is held (0 otherwise)
    pub dx: f32,
    pub dy: f32,
    /// Is any button held?
    pub pressed: bool,
    /// Which button is held (first of left, middle, right)
    pub button: Option<MouseButton>,
}

impl MouseSnapshot {
    /// Is `button` held this frame?
    pub fn holding(&self, button: MouseButton) -> bool {
        self.pressed && self.button == Some(button)
    }

    /// Is the cursor inside the half-open box `(x, x + width] × (y, y + height]`?
    pub fn inside(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        self.x > x && self.x <= x + width && self.y > y && self.y <= y + height
    }
}

/// Everything the core reads from input during one frame
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub mouse: MouseSnapshot,
    /// Keys held this frame
    keys_down: HashSet<KeyCode>,
    /// Keys that went down this frame
    keys_pressed: HashSet<KeyCode>,
}

impl InputSnapshot {
    pub fn new(mouse: MouseSnapshot, keys_down: HashSet<KeyCode>, keys_pressed: HashSet<KeyCode>) -> Self {
        Self {
            mouse,
            keys_down,
            keys_pressed,
        }
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Snapshot with `key` held and just pressed.
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys_down.insert(key);
        self.keys_pressed.insert(key);
        self
    }

    /// Snapshot with the cursor at (x, y) and `button` held.
    pub fn with_click(mut self, x: f32, y: f32, button: MouseButton) -> Self {
        self.mouse.x = x;
        self.mouse.y = y;
        self.mouse.pressed = true;
        self.mouse.button = Some(button);
        self
    }
}
