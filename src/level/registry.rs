//! Persisted component kinds
//!
//! The level format knows exactly the kinds listed in [`ComponentTag`].
//! Each tag owns its reader; writers live with [`WriteLevel`](super::WriteLevel).

use crate::asset::AssetPool;
use crate::game::{BoxBounds, Component};
use super::parser::Parser;
use super::LevelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentTag {
    Sprite,
    BoxBounds,
}

impl ComponentTag {
    pub const ALL: [ComponentTag; 2] = [ComponentTag::Sprite, ComponentTag::BoxBounds];

    /// Key the component is written under
    pub fn name(self) -> &'static str {
        match self {
            ComponentTag::Sprite => "Sprite",
            ComponentTag::BoxBounds => "BoxBounds",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }

    /// Read the members of this kind and its closing brace. The opening
    /// `"Tag": {` has already been consumed.
    pub fn deserialize(self, parser: &mut Parser, assets: &AssetPool) -> Result<Component, LevelError> {
        match self {
            ComponentTag::Sprite => read_sprite(parser, assets),
            ComponentTag::BoxBounds => read_box_bounds(parser),
        }
    }
}

/// Sprites are not stored inline: the file names the picture (and tile), and
/// the pixels come from the asset pool.
fn read_sprite(parser: &mut Parser, assets: &AssetPool) -> Result<Component, LevelError> {
    let is_subsprite = parser.consume_bool_property("isSubsprite")?;
    parser.consume(b',')?;
    let path = parser.consume_string_property("FilePath")?;

    if is_subsprite {
        parser.consume(b',')?;
        parser.consume_int_property("row")?;
        parser.consume(b',')?;
        parser.consume_int_property("column")?;
        parser.consume(b',')?;
        let line = parser.line();
        let index = parser.consume_int_property("index")?;
        let index = usize::try_from(index).map_err(|_| LevelError::InvalidNumber {
            text: index.to_string(),
            line,
        })?;

        if !assets.has_spritesheet(&path) {
            return Err(LevelError::MissingAsset {
                kind: "spritesheet",
                path,
                line: parser.line(),
            });
        }
        parser.consume_end_object_property()?;

        let sprite = assets
            .sheet_sprite(&path, index)
            .map_err(|_| LevelError::MissingAsset {
                kind: "sprite tile",
                path: format!("{path}#{index}"),
                line: parser.line(),
            })?;
        return Ok(Component::Sprite(sprite.clone()));
    }

    if !assets.has_sprite(&path) {
        return Err(LevelError::MissingAsset {
            kind: "sprite",
            path,
            line: parser.line(),
        });
    }
    parser.consume_end_object_property()?;

    let sprite = assets.loaded_sprite(&path).map_err(|_| LevelError::MissingAsset {
        kind: "sprite",
        path: path.clone(),
        line: parser.line(),
    })?;
    Ok(Component::Sprite(sprite.clone()))
}

fn read_box_bounds(parser: &mut Parser) -> Result<Component, LevelError> {
    let width = parser.consume_float_property("Width")?;
    parser.consume(b',')?;
    let height = parser.consume_float_property("Height")?;
    parser.consume_end_object_property()?;
    Ok(Component::BoxBounds(BoxBounds::new(width, height)))
}
