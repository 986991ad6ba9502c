//! Application state
//!
//! Owns the shared context (config, asset pool, storage) and the active
//! scene. The editor hands over to the play scene when asked.

use crate::asset::AssetPool;
use crate::config::EngineConfig;
use crate::editor::{EditorRequest, LevelEditorScene};
use crate::game::{LevelScene, SceneError, Surface};
use crate::input::InputSnapshot;
use crate::storage::LocalStorage;

/// The scene currently receiving updates
pub enum ActiveScene {
    Editor(Box<LevelEditorScene>),
    Level(Box<LevelScene>),
}

impl ActiveScene {
    pub fn name(&self) -> &str {
        match self {
            ActiveScene::Editor(editor) => &editor.scene.name,
            ActiveScene::Level(level) => &level.scene.name,
        }
    }
}

pub struct AppState {
    pub config: EngineConfig,
    pub assets: AssetPool,
    pub storage: LocalStorage,
    pub scene: ActiveScene,
    /// Handle generation of the next scene built
    next_generation: u32,
}

impl AppState {
    /// Start in the level editor.
    pub fn new(config: EngineConfig, storage: LocalStorage) -> Result<Self, SceneError> {
        Self::with_assets(config, AssetPool::new(), storage)
    }

    pub fn with_assets(config: EngineConfig, mut assets: AssetPool, storage: LocalStorage) -> Result<Self, SceneError> {
        let editor = LevelEditorScene::new(&config, &mut assets, 0)?;
        Ok(Self {
            config,
            assets,
            storage,
            scene: ActiveScene::Editor(Box::new(editor)),
            next_generation: 1,
        })
    }

    pub fn update(&mut self, dt: f32, input: &InputSnapshot) -> Result<(), SceneError> {
        let request = match &mut self.scene {
            ActiveScene::Editor(editor) => editor.update(dt, input, &self.config, &self.assets, &self.storage)?,
            ActiveScene::Level(level) => {
                level.update(dt, input, &self.config);
                None
            }
        };
        if request == Some(EditorRequest::Play) {
            self.change_scene()?;
        }
        Ok(())
    }

    /// Switch from the editor to a fresh play scene of the configured level.
    fn change_scene(&mut self) -> Result<(), SceneError> {
        let level = LevelScene::new(&self.config, &mut self.assets, &self.storage, self.next_generation)?;
        self.next_generation += 1;
        log::info!("switching to {}", level.scene.name);
        self.scene = ActiveScene::Level(Box::new(level));
        Ok(())
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match &self.scene {
            ActiveScene::Editor(editor) => editor.draw(surface, &self.config),
            ActiveScene::Level(level) => level.draw(surface, &self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level_scene::testing::blank_assets;
    use crate::input::KeyCode;
    use tempfile::TempDir;

    #[test]
    fn test_starts_in_editor_and_switches_to_play() {
        let dir = TempDir::new().unwrap();
        let config = EngineConfig::default();
        let assets = blank_assets(&config);
        let mut app = AppState::with_assets(config, assets, LocalStorage::with_base_dir(dir.path())).unwrap();
        assert_eq!(app.scene.name(), "Editor");

        app.update(1.0 / 60.0, &InputSnapshot::default()).unwrap();
        assert_eq!(app.scene.name(), "Editor");

        app.update(1.0 / 60.0, &InputSnapshot::default().with_key(KeyCode::E)).unwrap();
        assert_eq!(app.scene.name(), "Level");
    }

    #[test]
    fn test_editor_handles_do_not_resolve_in_play_scene() {
        let dir = TempDir::new().unwrap();
        let config = EngineConfig::default();
        let assets = blank_assets(&config);
        let mut app = AppState::with_assets(config, assets, LocalStorage::with_base_dir(dir.path())).unwrap();
        let cursor = match &app.scene {
            ActiveScene::Editor(editor) => editor.cursor().id(),
            ActiveScene::Level(_) => panic!("expected editor"),
        };

        app.update(1.0 / 60.0, &InputSnapshot::default().with_key(KeyCode::E)).unwrap();
        match &app.scene {
            ActiveScene::Level(level) => assert!(level.scene.get(cursor).is_none()),
            ActiveScene::Editor(_) => panic!("expected play scene"),
        }
        assert_eq!(app.next_generation, 2);
    }
}
