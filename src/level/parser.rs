//! Level parser
//!
//! Recursive-descent reader over the raw bytes of a level member. Keys are
//! matched in the exact order the writer emits them. Whitespace is allowed
//! between any two tokens; `\n` advances the line counter used in errors.

use crate::asset::AssetPool;
use crate::game::{Component, GameObject, Transform, Vector2};
use super::registry::ComponentTag;
use super::LevelError;

pub struct Parser {
    bytes: Vec<u8>,
    offset: usize,
    line: usize,
}

impl Parser {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            offset: 0,
            line: 1,
        }
    }

    /// Parser with nothing to read
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// 1-based line of the current position
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
        }
        Some(byte)
    }

    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\n' | b'\t' | b'\r')) {
            self.advance();
        }
    }

    fn syntax_error(&self, expected: impl Into<String>) -> LevelError {
        match self.peek() {
            Some(found) => LevelError::Syntax {
                expected: expected.into(),
                found: (found as char).to_string(),
                line: self.line,
            },
            None => LevelError::UnexpectedEnd {
                expected: expected.into(),
                line: self.line,
            },
        }
    }

    /// Consume the delimiter `c`, skipping whitespace before it.
    pub fn consume(&mut self, c: u8) -> Result<(), LevelError> {
        self.skip_whitespace();
        if self.peek() != Some(c) {
            return Err(self.syntax_error(format!("'{}'", c as char)));
        }
        self.advance();
        Ok(())
    }

    /// Is the next non-blank byte `c`? Nothing is consumed but whitespace.
    fn next_is(&mut self, c: u8) -> bool {
        self.skip_whitespace();
        self.peek() == Some(c)
    }

    /// Read the run of bytes accepted by `accept`
    fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> String {
        let start = self.offset;
        while self.peek().is_some_and(&accept) {
            self.advance();
        }
        String::from_utf8_lossy(&self.bytes[start..self.offset]).into_owned()
    }

    pub fn parse_int(&mut self) -> Result<i64, LevelError> {
        self.skip_whitespace();
        let line = self.line;
        let text = self.take_while(|b| b.is_ascii_digit() || b == b'-');
        text.parse().map_err(|_| LevelError::InvalidNumber { text, line })
    }

    /// Consume `word` if the input continues with it.
    fn take_word(&mut self, word: &[u8]) -> bool {
        if !self.bytes.get(self.offset..).is_some_and(|rest| rest.starts_with(word)) {
            return false;
        }
        for _ in word {
            self.advance();
        }
        true
    }

    /// A float literal with its mandatory `f` suffix. `NaN`, `inf` and
    /// `-inf` stand for the non-finite values.
    pub fn parse_float(&mut self) -> Result<f32, LevelError> {
        self.skip_whitespace();
        let line = self.line;
        let value = if self.take_word(b"NaN") {
            f32::NAN
        } else if self.take_word(b"inf") {
            f32::INFINITY
        } else if self.take_word(b"-inf") {
            f32::NEG_INFINITY
        } else {
            let text = self.take_while(|b| b.is_ascii_digit() || b == b'-' || b == b'.');
            text.parse::<f32>()
                .map_err(|_| LevelError::InvalidNumber { text, line })?
        };
        self.consume(b'f')?;
        Ok(value)
    }

    /// A quoted string. A backslash makes the next byte literal.
    pub fn parse_string(&mut self) -> Result<String, LevelError> {
        self.consume(b'"')?;
        let mut text = Vec::new();
        loop {
            match self.peek() {
                Some(b'"') | None => break,
                Some(b'\\') => {
                    self.advance();
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some(byte) => {
                    text.push(byte);
                    self.advance();
                }
            }
        }
        self.consume(b'"')?;
        Ok(String::from_utf8_lossy(&text).into_owned())
    }

    pub fn parse_bool(&mut self) -> Result<bool, LevelError> {
        self.skip_whitespace();
        let (word, value): (&[u8], bool) = match self.peek() {
            Some(b't') => (b"true", true),
            Some(b'f') => (b"false", false),
            _ => return Err(self.syntax_error("'true' or 'false'")),
        };
        for &c in word {
            if self.peek() != Some(c) {
                return Err(self.syntax_error(format!("'{}'", c as char)));
            }
            self.advance();
        }
        Ok(value)
    }

    /// Read a quoted key and require it to be `name`.
    fn check_key(&mut self, name: &str) -> Result<(), LevelError> {
        self.skip_whitespace();
        let line = self.line;
        let key = self.parse_string()?;
        if key != name {
            return Err(LevelError::Syntax {
                expected: format!("'{name}'"),
                found: key,
                line,
            });
        }
        self.consume(b':')
    }

    pub fn consume_string_property(&mut self, name: &str) -> Result<String, LevelError> {
        self.check_key(name)?;
        self.parse_string()
    }

    pub fn consume_int_property(&mut self, name: &str) -> Result<i64, LevelError> {
        self.check_key(name)?;
        self.parse_int()
    }

    pub fn consume_float_property(&mut self, name: &str) -> Result<f32, LevelError> {
        self.check_key(name)?;
        self.parse_float()
    }

    pub fn consume_bool_property(&mut self, name: &str) -> Result<bool, LevelError> {
        self.check_key(name)?;
        self.parse_bool()
    }

    pub fn consume_begin_object_property(&mut self, name: &str) -> Result<(), LevelError> {
        self.check_key(name)?;
        self.consume(b'{')
    }

    pub fn consume_end_object_property(&mut self) -> Result<(), LevelError> {
        self.consume(b'}')
    }

    /// `"x": ..f, "y": ..f`
    pub fn parse_vector2(&mut self) -> Result<Vector2, LevelError> {
        let x = self.consume_float_property("x")?;
        self.consume(b',')?;
        let y = self.consume_float_property("y")?;
        Ok(Vector2::new(x, y))
    }

    pub fn parse_transform(&mut self) -> Result<Transform, LevelError> {
        self.consume_begin_object_property("Transform")?;

        self.consume_begin_object_property("Position")?;
        let position = self.parse_vector2()?;
        self.consume_end_object_property()?;
        self.consume(b',')?;

        self.consume_begin_object_property("Scale")?;
        let scale = self.parse_vector2()?;
        self.consume_end_object_property()?;
        self.consume(b',')?;

        let rotation = self.consume_float_property("rotation")?;
        self.consume_end_object_property()?;

        Ok(Transform {
            position,
            scale,
            rotation,
        })
    }

    /// `"Tag": { ... }`, dispatched on the tag
    pub fn parse_component(&mut self, assets: &AssetPool) -> Result<Component, LevelError> {
        self.skip_whitespace();
        let line = self.line;
        let tag = self.parse_string()?;
        self.consume(b':')?;
        self.consume(b'{')?;

        let kind = ComponentTag::from_name(&tag).ok_or(LevelError::UnknownComponent { tag, line })?;
        kind.deserialize(self, assets)
    }

    /// Next object in the stream, `None` once the input is exhausted.
    /// A comma between two objects is accepted.
    pub fn parse_game_object(&mut self, assets: &AssetPool) -> Result<Option<GameObject>, LevelError> {
        self.skip_whitespace();
        if self.at_end() {
            return Ok(None);
        }
        if self.next_is(b',') {
            self.advance();
            self.skip_whitespace();
            if self.at_end() {
                return Ok(None);
            }
        }

        self.consume_begin_object_property("GameObject")?;
        let transform = self.parse_transform()?;
        self.consume(b',')?;
        let name = self.consume_string_property("Name")?;
        self.consume(b',')?;
        let line = self.line;
        let z_index = self.consume_int_property("ZIndex")?;
        let z_index = i32::try_from(z_index).map_err(|_| LevelError::InvalidNumber {
            text: z_index.to_string(),
            line,
        })?;

        let mut object = GameObject::new(name, transform, z_index);

        if self.next_is(b',') {
            self.advance();
            self.consume_begin_object_property("Components")?;
            object.add_component(self.parse_component(assets)?);
            while self.next_is(b',') {
                self.advance();
                object.add_component(self.parse_component(assets)?);
            }
            self.consume_end_object_property()?;
        }

        self.consume_end_object_property()?;
        Ok(Some(object))
    }

    /// Every remaining object, in file order.
    pub fn parse_all(&mut self, assets: &AssetPool) -> Result<Vec<GameObject>, LevelError> {
        let mut objects = Vec::new();
        while let Some(object) = self.parse_game_object(assets)? {
            objects.push(object);
        }
        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{SheetLayout, Sprite};
    use crate::game::BoxBounds;
    use crate::level::WriteLevel;
    use image::RgbaImage;

    fn parser(text: &str) -> Parser {
        Parser::new(text.as_bytes().to_vec())
    }

    fn pool() -> AssetPool {
        let mut pool = AssetPool::new();
        pool.add_sprite("assets/groundSprites.png", Sprite::from_image("assets/groundSprites.png", RgbaImage::new(130, 86)))
            .unwrap();
        let layout = SheetLayout { tile_width: 42, tile_height: 42, spacing: 2, columns: 3, count: 6 };
        pool.add_spritesheet("assets/groundSprites.png", layout).unwrap();
        pool
    }

    #[test]
    fn test_primitives() {
        let mut p = parser("  -42 3.5f \"hello\" true\n false");
        assert_eq!(p.parse_int().unwrap(), -42);
        assert_eq!(p.parse_float().unwrap(), 3.5);
        assert_eq!(p.parse_string().unwrap(), "hello");
        assert!(p.parse_bool().unwrap());
        assert!(!p.parse_bool().unwrap());
        assert_eq!(p.line(), 2);
        p.skip_whitespace();
        assert!(p.at_end());
    }

    #[test]
    fn test_escaped_name_and_non_finite_floats_read_back() {
        let mut transform = Transform::from_position(Vector2::new(f32::INFINITY, f32::NEG_INFINITY));
        transform.rotation = f32::NAN;
        let object = GameObject::new(r#"Gate "A" \ left"#, transform, 2);

        let objects = parser(&object.serialize(0)).parse_all(&AssetPool::new()).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, r#"Gate "A" \ left"#);
        assert_eq!(objects[0].transform.position, Vector2::new(f32::INFINITY, f32::NEG_INFINITY));
        assert!(objects[0].transform.rotation.is_nan());
    }

    #[test]
    fn test_float_requires_suffix() {
        let mut p = parser("1.5,");
        assert!(matches!(p.parse_float(), Err(LevelError::Syntax { .. })));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let mut p = parser("\n\n\"ZIndex\": abc");
        match p.consume_int_property("ZIndex") {
            Err(LevelError::InvalidNumber { text, line }) => {
                assert_eq!(text, "");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_key_reported_with_line() {
        let mut p = parser("\"GameObject\": {\n\t\"Transform\": {\n\t\t\"Posit\": {");
        match p.parse_game_object(&AssetPool::new()) {
            Err(err @ LevelError::Syntax { .. }) => {
                assert_eq!(err.line(), Some(3));
                assert!(err.to_string().contains("Posit"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_truncated_input() {
        let mut p = parser("\"GameObject\": {\n\t\"Transform\"");
        assert!(matches!(
            p.parse_game_object(&AssetPool::new()),
            Err(LevelError::UnexpectedEnd { line: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_component_tag() {
        let object = GameObject::new("Generated", Transform::default(), 0).with_component(BoxBounds::new(1.0, 1.0));
        let text = object.serialize(0).replace("BoxBounds", "Teleporter");

        match parser(&text).parse_game_object(&AssetPool::new()) {
            Err(LevelError::UnknownComponent { tag, line }) => {
                assert_eq!(tag, "Teleporter");
                assert_eq!(line, 16);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_has_no_objects() {
        assert!(Parser::empty().parse_game_object(&AssetPool::new()).unwrap().is_none());
        assert!(parser(" \n\t").parse_game_object(&AssetPool::new()).unwrap().is_none());
    }

    #[test]
    fn test_objects_with_separating_commas() {
        let assets = pool();
        let sprite = assets.sheet_sprite("assets/groundSprites.png", 4).unwrap().clone();
        let first = GameObject::new("Generated", Transform::from_position(Vector2::new(84.0, 588.0)), 0)
            .with_component(sprite)
            .with_component(BoxBounds::new(42.0, 42.0));
        let second = GameObject::new("Marker", Transform::default(), -1);

        let text = format!("{},\n{}\n", first.serialize(0), second.serialize(0));
        let objects = parser(&text).parse_all(&assets).unwrap();

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name, "Generated");
        assert_eq!(objects[0].transform.position, Vector2::new(84.0, 588.0));
        let cell = objects[0].get_component::<Sprite>().unwrap().cell.unwrap();
        assert_eq!((cell.row, cell.column, cell.index), (1, 1, 4));
        assert_eq!(objects[0].get_component::<BoxBounds>().unwrap().width, 42.0);
        assert_eq!(objects[1].z_index, -1);
        assert!(objects[1].components().is_empty());
    }

    #[test]
    fn test_missing_spritesheet_is_reported() {
        let mut sprite = Sprite::from_image("assets/unknown.png", RgbaImage::new(1, 1));
        sprite.cell = Some(crate::asset::SpriteCell { row: 0, column: 0, index: 0 });
        let text = GameObject::new("Generated", Transform::default(), 0)
            .with_component(sprite)
            .serialize(0);

        assert!(matches!(
            parser(&text).parse_game_object(&pool()),
            Err(LevelError::MissingAsset { kind: "spritesheet", .. })
        ));
    }
}
