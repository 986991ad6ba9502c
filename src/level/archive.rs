//! Level archives
//!
//! `<levels_dir>/<name>.zip`, holding a single deflated member `<name>.json`.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::asset::AssetPool;
use crate::game::GameObject;
use crate::storage::LocalStorage;
use super::parser::Parser;
use super::writer::WriteLevel;
use super::LevelError;

/// Storage path of the archive for level `name`
pub fn archive_path(levels_dir: &str, name: &str) -> String {
    if levels_dir.is_empty() {
        format!("{name}.zip")
    } else {
        format!("{}/{name}.zip", levels_dir.trim_end_matches('/'))
    }
}

fn member_name(name: &str) -> String {
    format!("{name}.json")
}

/// Level text for `objects`: every serializable object, newline separated.
pub fn serialize_level<'a>(objects: impl IntoIterator<Item = &'a GameObject>) -> String {
    objects
        .into_iter()
        .map(|object| object.serialize(0))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `objects` to the archive for level `name`, replacing any previous one.
/// Returns the number of bytes written.
pub fn save_level<'a>(
    storage: &LocalStorage,
    levels_dir: &str,
    name: &str,
    objects: impl IntoIterator<Item = &'a GameObject>,
) -> Result<usize, LevelError> {
    let text = serialize_level(objects);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer.start_file(member_name(name), options)?;
    writer.write_all(text.as_bytes())?;
    let bytes = writer.finish()?.into_inner();

    let path = archive_path(levels_dir, name);
    storage.write(&path, &bytes)?;
    log::info!("saved level '{}' to {} ({} bytes)", name, path, bytes.len());
    Ok(bytes.len())
}

/// Parser over the text of level `name`. A missing archive is not an error:
/// the parser is simply empty.
pub fn open_level(storage: &LocalStorage, levels_dir: &str, name: &str) -> Result<Parser, LevelError> {
    let path = archive_path(levels_dir, name);
    if !storage.exists(&path) {
        log::info!("no level archive at {}, starting empty", path);
        return Ok(Parser::empty());
    }

    let bytes = storage.read(&path)?;
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut member = archive.by_name(&member_name(name))?;
    let mut text = Vec::new();
    member.read_to_end(&mut text)?;
    Ok(Parser::new(text))
}

/// Every object stored in level `name`, in file order.
pub fn load_level(
    storage: &LocalStorage,
    levels_dir: &str,
    name: &str,
    assets: &AssetPool,
) -> Result<Vec<GameObject>, LevelError> {
    let objects = open_level(storage, levels_dir, name)?.parse_all(assets)?;
    log::info!("loaded {} objects from level '{}'", objects.len(), name);
    Ok(objects)
}
