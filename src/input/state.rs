//! Input polling
//!
//! Reads keyboard and mouse state from macroquad once per frame.

use macroquad::input::{
    get_keys_down, get_keys_pressed, is_mouse_button_down, mouse_position,
    MouseButton as MqButton,
};

use super::{InputSnapshot, MouseButton, MouseSnapshot};

/// Polls macroquad and remembers the previous cursor position for drag deltas
#[derive(Debug, Default)]
pub struct InputState {
    last_mouse: Option<(f32, f32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame before updating the scene
    pub fn poll(&mut self) -> InputSnapshot {
        let (x, y) = mouse_position();

        let button = if is_mouse_button_down(MqButton::Left) {
            Some(MouseButton::Left)
        } else if is_mouse_button_down(MqButton::Middle) {
            Some(MouseButton::Middle)
        } else if is_mouse_button_down(MqButton::Right) {
            Some(MouseButton::Right)
        } else {
            None
        };

        let (dx, dy) = match (button, self.last_mouse) {
            (Some(_), Some((lx, ly))) => (x - lx, y - ly),
            _ => (0.0, 0.0),
        };
        self.last_mouse = Some((x, y));

        let mouse = MouseSnapshot {
            x,
            y,
            dx,
            dy,
            pressed: button.is_some(),
            button,
        };
        InputSnapshot::new(mouse, get_keys_down(), get_keys_pressed())
    }
}
