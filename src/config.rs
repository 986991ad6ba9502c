//! Engine configuration
//!
//! Read from an optional RON file. Every field has a default, so a config
//! file only needs the values it changes:
//!
//! ```ron
//! (
//!     physics: (gravity: 3000.0),
//!     paths: (level_name: "Stage2"),
//! )
//! ```

use std::path::Path;

use macroquad::color::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::asset::SheetLayout;

/// Default config file, relative to the working directory
pub const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub world: WorldConfig,
    pub editor: EditorConfig,
    pub paths: PathConfig,
}

impl EngineConfig {
    /// Load the config at `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("no {} found, using default config", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Grid Dash".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Cap on |velocity.y|
    pub max_velocity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_force: f32,
    /// Constant horizontal player speed
    pub player_speed: f32,
    /// Airborne spin (degrees/s)
    pub spin_rate: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 2850.0,
            max_velocity: 1900.0,
            jump_force: -650.0,
            player_speed: 395.0,
            spin_rate: 716.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub ground_y: f32,
    pub tile_width: f32,
    pub tile_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Where the player reappears after dying
    pub respawn: (f32, f32),
    pub camera_offset_x: f32,
    pub camera_offset_y: f32,
    /// Lowest camera y (the camera never scrolls past the ground)
    pub camera_offset_ground_y: f32,
    pub background_color: [u8; 3],
    pub ground_color: [u8; 3],
    /// Replaces the white parts of the player's first layer
    pub player_primary: [u8; 3],
    /// Replaces the white parts of the player's second layer
    pub player_secondary: [u8; 3],
    pub background_speed: f32,
    /// Ground layer scrolls at `player_speed - ground_speed_lag`
    pub ground_speed_lag: f32,
    /// Tiles per parallax layer
    pub parallax_tiles: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ground_y: 714.0,
            tile_width: 42.0,
            tile_height: 42.0,
            player_width: 42.0,
            player_height: 42.0,
            respawn: (0.0, 30.0),
            camera_offset_x: 300.0,
            camera_offset_y: 325.0,
            camera_offset_ground_y: 150.0,
            background_color: [15, 98, 212],
            ground_color: [28, 70, 148],
            player_primary: [255, 0, 0],
            player_secondary: [0, 255, 0],
            background_speed: 80.0,
            ground_speed_lag: 35.0,
            parallax_tiles: 7,
        }
    }
}

impl WorldConfig {
    pub fn background_color(&self) -> Color {
        rgb(self.background_color)
    }

    pub fn ground_color(&self) -> Color {
        rgb(self.ground_color)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub button_offset: (f32, f32),
    pub button_width: f32,
    pub button_height: f32,
    pub button_spacing_horizontal: f32,
    pub button_spacing_vertical: f32,
    /// Minimum time between two placements (seconds)
    pub place_debounce: f32,
    pub grid_vertical_lines: u32,
    pub grid_horizontal_lines: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            button_offset: (400.0, 560.0),
            button_width: 60.0,
            button_height: 60.0,
            button_spacing_horizontal: 10.0,
            button_spacing_vertical: 5.0,
            place_debounce: 0.2,
            grid_vertical_lines: 31,
            grid_horizontal_lines: 20,
        }
    }
}

/// A spritesheet file and how to cut it
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    pub path: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub spacing: u32,
    pub columns: u32,
    pub count: u32,
}

impl SheetConfig {
    fn new(path: &str, tile: u32, spacing: u32, columns: u32, count: u32) -> Self {
        Self {
            path: path.to_string(),
            tile_width: tile,
            tile_height: tile,
            spacing,
            columns,
            count,
        }
    }

    pub fn layout(&self) -> SheetLayout {
        SheetLayout {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            spacing: self.spacing,
            columns: self.columns,
            count: self.count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub levels_dir: String,
    pub level_name: String,
    pub player_layers: [SheetConfig; 3],
    pub ground_tiles: SheetConfig,
    pub buttons: SheetConfig,
    pub background: String,
    pub ground_background: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            levels_dir: "levels".to_string(),
            level_name: "Test".to_string(),
            player_layers: [
                SheetConfig::new("assets/player/layerOne.png", 42, 2, 13, 13 * 5),
                SheetConfig::new("assets/player/layerTwo.png", 42, 2, 13, 13 * 5),
                SheetConfig::new("assets/player/layerThree.png", 42, 2, 13, 13 * 5),
            ],
            ground_tiles: SheetConfig::new("assets/groundSprites.png", 42, 2, 6, 12),
            buttons: SheetConfig::new("assets/ui/buttonSprites.png", 60, 2, 2, 2),
            background: "assets/backgrounds/bg01.png".to_string(),
            ground_background: "assets/grounds/ground01.png".to_string(),
        }
    }
}

/// Opaque colour from 8-bit channels
pub fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba(r, g, b, 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EngineConfig::from_ron("(physics: (gravity: 3000.0), paths: (level_name: \"Stage2\"))").unwrap();
        assert_eq!(config.physics.gravity, 3000.0);
        assert_eq!(config.physics.max_velocity, 1900.0);
        assert_eq!(config.paths.level_name, "Stage2");
        assert_eq!(config.paths.levels_dir, "levels");
        assert_eq!(config.world.ground_y, 714.0);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(
            EngineConfig::from_ron("(physics: (gravity: \"heavy\"))"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = EngineConfig::load(&dir.path().join("config.ron")).unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.paths.ground_tiles.layout().count, 12);
    }
}
