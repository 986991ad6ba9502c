//! Level writer
//!
//! Property helpers emit one `"name": value` pair at a given tab depth,
//! followed by an optional comma and newline. Objects open with
//! `"name": {` on their own line and close with a bare `}` so the caller
//! decides what follows.
//!
//! Strings escape `"` and `\` with a backslash. Floats always end in `f`;
//! finite values always carry a decimal point and non-finite ones are
//! written `NaNf`, `inff` and `-inff`. Everything written reads back.

use crate::asset::Sprite;
use crate::game::{BoxBounds, Component, GameObject, Transform, Vector2};
use super::registry::ComponentTag;

/// Something that can be written into a level file
pub trait WriteLevel {
    /// Text for this value at `tabs` levels of indentation. Empty when the
    /// value is not persisted.
    fn serialize(&self, tabs: usize) -> String;
}

pub fn indent(tabs: usize) -> String {
    "\t".repeat(tabs)
}

/// `,` then `\n`, each optional
pub fn ending(newline: bool, comma: bool) -> &'static str {
    match (comma, newline) {
        (true, true) => ",\n",
        (true, false) => ",",
        (false, true) => "\n",
        (false, false) => "",
    }
}

pub fn string_property(name: &str, value: &str, tabs: usize, newline: bool, comma: bool) -> String {
    format!("{}\"{}\": \"{}\"{}", indent(tabs), name, escape(value), ending(newline, comma))
}

/// `value` with `"` and `\` backslash-escaped
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub fn int_property(name: &str, value: i64, tabs: usize, newline: bool, comma: bool) -> String {
    format!("{}\"{}\": {}{}", indent(tabs), name, value, ending(newline, comma))
}

pub fn float_property(name: &str, value: f32, tabs: usize, newline: bool, comma: bool) -> String {
    format!("{}\"{}\": {}f{}", indent(tabs), name, format_float(value), ending(newline, comma))
}

pub fn bool_property(name: &str, value: bool, tabs: usize, newline: bool, comma: bool) -> String {
    format!("{}\"{}\": {}{}", indent(tabs), name, value, ending(newline, comma))
}

pub fn begin_object(name: &str, tabs: usize) -> String {
    format!("{}\"{}\": {{{}", indent(tabs), name, ending(true, false))
}

pub fn close_object(tabs: usize) -> String {
    format!("{}}}", indent(tabs))
}

/// Shortest text that reads back to exactly `value`. Finite values always
/// get a decimal point; `NaN`, `inf` and `-inf` are left as they are.
fn format_float(value: f32) -> String {
    let text = value.to_string();
    if !value.is_finite() || text.contains('.') {
        text
    } else {
        text + ".0"
    }
}

impl WriteLevel for Vector2 {
    fn serialize(&self, tabs: usize) -> String {
        let mut out = float_property("x", self.x, tabs, true, true);
        out += &float_property("y", self.y, tabs, true, false);
        out
    }
}

impl WriteLevel for Transform {
    fn serialize(&self, tabs: usize) -> String {
        let mut out = begin_object("Transform", tabs);

        out += &begin_object("Position", tabs + 1);
        out += &self.position.serialize(tabs + 2);
        out += &close_object(tabs + 1);
        out += ending(true, true);

        out += &begin_object("Scale", tabs + 1);
        out += &self.scale.serialize(tabs + 2);
        out += &close_object(tabs + 1);
        out += ending(true, true);

        out += &float_property("rotation", self.rotation, tabs + 1, true, false);
        out += &close_object(tabs);
        out
    }
}

impl WriteLevel for Sprite {
    fn serialize(&self, tabs: usize) -> String {
        let mut out = begin_object(ComponentTag::Sprite.name(), tabs);
        out += &bool_property("isSubsprite", self.is_subsprite(), tabs + 1, true, true);

        match self.cell {
            Some(cell) => {
                out += &string_property("FilePath", &self.path, tabs + 1, true, true);
                out += &int_property("row", cell.row.into(), tabs + 1, true, true);
                out += &int_property("column", cell.column.into(), tabs + 1, true, true);
                out += &int_property("index", cell.index.into(), tabs + 1, true, false);
            }
            None => {
                out += &string_property("FilePath", &self.path, tabs + 1, true, false);
            }
        }

        out += &close_object(tabs);
        out
    }
}

impl WriteLevel for BoxBounds {
    fn serialize(&self, tabs: usize) -> String {
        let mut out = begin_object(ComponentTag::BoxBounds.name(), tabs);
        out += &float_property("Width", self.width, tabs + 1, true, true);
        out += &float_property("Height", self.height, tabs + 1, true, false);
        out += &close_object(tabs);
        out
    }
}

impl WriteLevel for Component {
    fn serialize(&self, tabs: usize) -> String {
        match self {
            Component::Sprite(sprite) => sprite.serialize(tabs),
            Component::BoxBounds(bounds) => bounds.serialize(tabs),
            Component::RigidBody(_)
            | Component::Player(_)
            | Component::Ground(_)
            | Component::ParallaxBackground(_)
            | Component::SnapToGrid(_)
            | Component::MenuItem(_) => String::new(),
        }
    }
}

impl WriteLevel for GameObject {
    /// Empty for non-serializable objects. The `Components` block is left
    /// out entirely when no component is persisted.
    fn serialize(&self, tabs: usize) -> String {
        if !self.is_serializable() {
            return String::new();
        }

        let components: Vec<String> = self
            .components()
            .iter()
            .map(|component| component.serialize(tabs + 2))
            .filter(|text| !text.is_empty())
            .collect();

        let mut out = begin_object("GameObject", tabs);
        out += &self.transform.serialize(tabs + 1);
        out += ending(true, true);
        out += &string_property("Name", &self.name, tabs + 1, true, true);

        if components.is_empty() {
            out += &int_property("ZIndex", self.z_index.into(), tabs + 1, true, false);
        } else {
            out += &int_property("ZIndex", self.z_index.into(), tabs + 1, true, true);
            out += &begin_object("Components", tabs + 1);
            let last = components.len() - 1;
            for (i, text) in components.iter().enumerate() {
                out += text;
                out += ending(true, i < last);
            }
            out += &close_object(tabs + 1);
            out += ending(true, false);
        }

        out += &close_object(tabs);
        out
    }
}
