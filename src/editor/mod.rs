//! Level Editor
//!
//! Grid-snapped tile placement:
//! - tile palette along the bottom of the screen
//! - snapping cursor that places copies of the picked tile
//! - middle-drag camera panning
//! - save/load of the current level archive

pub mod grid;
pub mod palette;
mod state;

pub use palette::{MenuItem, Palette};
pub use state::{EditorRequest, LevelEditorScene};
