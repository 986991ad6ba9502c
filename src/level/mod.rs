//! Level Files
//!
//! Levels are stored as a ZIP archive holding one JSON-like text member.
//! The text is a sequence of `"GameObject": { ... }` records:
//!
//! ```text
//! "GameObject": {
//!     "Transform": {
//!         "Position": {
//!             "x": 84.0f,
//!             "y": 588.0f
//!         },
//!         "Scale": {
//!             "x": 1.0f,
//!             "y": 1.0f
//!         },
//!         "rotation": 0.0f
//!     },
//!     "Name": "Generated",
//!     "ZIndex": 0,
//!     "Components": {
//!         "Sprite": {
//!             "isSubsprite": true,
//!             "FilePath": "assets/groundSprites.png",
//!             "row": 0,
//!             "column": 1,
//!             "index": 1
//!         }
//!     }
//! }
//! ```
//!
//! Floats carry an `f` suffix. Member order is fixed; the reader does not
//! accept reordered keys. Only component kinds listed in [`ComponentTag`]
//! are persisted, everything else is silently left out when writing.

mod archive;
mod parser;
mod registry;
mod writer;

pub use archive::{archive_path, load_level, open_level, save_level, serialize_level};
pub use parser::Parser;
pub use registry::ComponentTag;
pub use writer::WriteLevel;

use thiserror::Error;

use crate::storage::StorageError;

/// Error type for reading and writing levels.
///
/// Grammar errors carry the 1-based line they were detected on.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("line {line}: expected {expected}, found '{found}'")]
    Syntax {
        expected: String,
        found: String,
        line: usize,
    },
    #[error("line {line}: unexpected end of level, expected {expected}")]
    UnexpectedEnd { expected: String, line: usize },
    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber { text: String, line: usize },
    #[error("line {line}: unknown component '{tag}'")]
    UnknownComponent { tag: String, line: usize },
    #[error("line {line}: {kind} '{path}' has not been loaded")]
    MissingAsset {
        kind: &'static str,
        path: String,
        line: usize,
    },
    #[error("level archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("level storage: {0}")]
    Storage(#[from] StorageError),
    #[error("level I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl LevelError {
    /// Line the error was detected on, for grammar errors
    pub fn line(&self) -> Option<usize> {
        match self {
            LevelError::Syntax { line, .. }
            | LevelError::UnexpectedEnd { line, .. }
            | LevelError::InvalidNumber { line, .. }
            | LevelError::UnknownComponent { line, .. }
            | LevelError::MissingAsset { line, .. } => Some(*line),
            LevelError::Archive(_) | LevelError::Storage(_) | LevelError::Io(_) => None,
        }
    }
}
