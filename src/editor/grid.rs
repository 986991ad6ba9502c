//! Editor grid and camera panning

use macroquad::color::Color;

use crate::config::{EditorConfig, WorldConfig};
use crate::game::{Camera, Surface};
use crate::input::{InputSnapshot, MouseButton};

const GRID_COLOR: Color = Color::new(0.2, 0.2, 0.2, 0.5);

/// Tile-sized grid drawn over the editor view, stopping at the ground line.
#[derive(Debug, Clone)]
pub struct Grid {
    pub cell_width: f32,
    pub cell_height: f32,
    pub vertical_lines: u32,
    pub horizontal_lines: u32,
}

impl Grid {
    pub fn new(world: &WorldConfig, editor: &EditorConfig) -> Self {
        Self {
            cell_width: world.tile_width,
            cell_height: world.tile_height,
            vertical_lines: editor.grid_vertical_lines,
            horizontal_lines: editor.grid_horizontal_lines,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, camera: &Camera, ground_y: f32) {
        let (screen_width, screen_height) = surface.screen_size();
        let camera = camera.position;
        let bottom = (ground_y - camera.y).min(screen_height);

        let mut x = (camera.x / self.cell_width).floor() * self.cell_width - camera.x;
        for _ in 0..=self.vertical_lines {
            surface.draw_line(x, 0.0, x, bottom, GRID_COLOR);
            x += self.cell_width;
        }

        let mut y = (camera.y / self.cell_height).floor() * self.cell_height - camera.y;
        for _ in 0..=self.horizontal_lines {
            if camera.y + y >= ground_y {
                break;
            }
            surface.draw_line(0.0, y, screen_width, y, GRID_COLOR);
            y += self.cell_height;
        }
    }
}

/// Drag the camera with the middle mouse button.
#[derive(Debug, Clone, Default)]
pub struct CameraControls {
    previous: (f32, f32),
}

impl CameraControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, input: &InputSnapshot, camera: &mut Camera) {
        let mouse = &input.mouse;
        let current = (mouse.x + mouse.dx, mouse.y + mouse.dy);
        if mouse.holding(MouseButton::Middle) {
            camera.position.x -= current.0 - self.previous.0;
            camera.position.y -= current.1 - self.previous.1;
        }
        self.previous = current;
    }
}
