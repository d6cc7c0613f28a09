//! Bitmap font support: parses AngelCode BMFont text descriptors and lays out strings.
//!
//! Only the text variant of the format is understood. Layout is pure math over the
//! descriptor, so text can be measured (for hit boxes) without a renderer.

use std::collections::HashMap;
use std::str::FromStr;

use bevy_ecs::resource::Resource;
use glam::Vec2;

use crate::error::FontError;

/// A single glyph's rectangle in the font atlas and its placement metrics, in font pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub x_advance: i32,
}

/// A glyph positioned by [`BitmapFont::layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub glyph: Glyph,
    /// Top-left corner relative to the top-left of the laid out text.
    pub offset: Vec2,
    /// Destination size after scaling.
    pub size: Vec2,
}

#[derive(Resource, Debug, Clone)]
pub struct BitmapFont {
    pub face: String,
    /// The size the font was rendered at; text requested at this size is drawn 1:1.
    pub size: f32,
    pub line_height: f32,
    pub base: f32,
    pub atlas_size: (u32, u32),
    /// File name of the atlas page.
    pub page: String,
    glyphs: HashMap<char, Glyph>,
    kerning: HashMap<(char, char), i32>,
}

/// One `tag key=value ...` line of the descriptor.
struct Line<'a> {
    number: usize,
    tag: &'a str,
    attributes: Vec<(&'a str, &'a str)>,
}

impl<'a> Line<'a> {
    fn parse(number: usize, text: &'a str) -> Option<Self> {
        let mut tokens = tokenize(text).into_iter();
        let tag = tokens.next()?;
        let attributes = tokens
            .filter_map(|token| token.split_once('='))
            .map(|(key, value)| (key, value.trim_matches('"')))
            .collect();
        Some(Self { number, tag, attributes })
    }

    fn raw(&self, tag: &'static str, attribute: &'static str) -> Result<&'a str, FontError> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == attribute)
            .map(|(_, value)| *value)
            .ok_or(FontError::MissingAttribute {
                tag,
                attribute,
                line: self.number,
            })
    }

    fn get<T: FromStr>(&self, tag: &'static str, attribute: &'static str) -> Result<T, FontError> {
        let value = self.raw(tag, attribute)?;
        value.parse().map_err(|_| FontError::InvalidValue {
            attribute: attribute.to_string(),
            value: value.to_string(),
            line: self.number,
        })
    }

    fn get_char(&self, tag: &'static str, attribute: &'static str) -> Result<char, FontError> {
        let id: u32 = self.get(tag, attribute)?;
        char::from_u32(id).ok_or_else(|| FontError::InvalidValue {
            attribute: attribute.to_string(),
            value: id.to_string(),
            line: self.number,
        })
    }
}

/// Splits on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    let mut quoted = false;

    for (i, c) in line.char_indices() {
        if c == '"' {
            quoted = !quoted;
        } else if c.is_whitespace() && !quoted {
            if let Some(s) = start.take() {
                tokens.push(&line[s..i]);
            }
            continue;
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        tokens.push(&line[s..]);
    }
    tokens
}

impl BitmapFont {
    pub fn parse(bytes: &[u8]) -> Result<Self, FontError> {
        let text = std::str::from_utf8(bytes).map_err(|_| FontError::Encoding)?;

        let mut info = None;
        let mut common = None;
        let mut page = None;
        let mut glyphs = HashMap::new();
        let mut kerning = HashMap::new();

        for (index, raw) in text.lines().enumerate() {
            let Some(line) = Line::parse(index + 1, raw) else {
                continue;
            };

            match line.tag {
                "info" => {
                    let face = line.raw("info", "face").unwrap_or_default().to_string();
                    info = Some((face, line.get::<f32>("info", "size")?));
                }
                "common" => {
                    common = Some((
                        line.get::<f32>("common", "lineHeight")?,
                        line.get::<f32>("common", "base")?,
                        line.get::<u32>("common", "scaleW")?,
                        line.get::<u32>("common", "scaleH")?,
                    ));
                }
                "page" => {
                    // Single-page fonts only; the first page wins
                    if page.is_none() {
                        page = Some(line.raw("page", "file")?.to_string());
                    }
                }
                "char" => {
                    let id = line.get_char("char", "id")?;
                    let glyph = Glyph {
                        x: line.get("char", "x")?,
                        y: line.get("char", "y")?,
                        width: line.get("char", "width")?,
                        height: line.get("char", "height")?,
                        x_offset: line.get("char", "xoffset")?,
                        y_offset: line.get("char", "yoffset")?,
                        x_advance: line.get("char", "xadvance")?,
                    };
                    glyphs.insert(id, glyph);
                }
                "kerning" => {
                    let first = line.get_char("kerning", "first")?;
                    let second = line.get_char("kerning", "second")?;
                    kerning.insert((first, second), line.get("kerning", "amount")?);
                }
                // "chars" and "kernings" only carry counts
                _ => {}
            }
        }

        let (face, size) = info.ok_or(FontError::MissingTag { tag: "info" })?;
        let (line_height, base, scale_w, scale_h) = common.ok_or(FontError::MissingTag { tag: "common" })?;
        let page = page.ok_or(FontError::MissingTag { tag: "page" })?;

        Ok(Self {
            face,
            size,
            line_height,
            base,
            atlas_size: (scale_w, scale_h),
            page,
            glyphs,
            kerning,
        })
    }

    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn kerning(&self, first: char, second: char) -> i32 {
        self.kerning.get(&(first, second)).copied().unwrap_or(0)
    }

    fn scale(&self, size: f32) -> f32 {
        if self.size > 0.0 {
            size / self.size
        } else {
            1.0
        }
    }

    /// Width and height of `text` drawn at `size`. Characters missing from the font take no space.
    pub fn measure(&self, text: &str, size: f32) -> Vec2 {
        let scale = self.scale(size);
        let mut width = 0.0;
        let mut previous = None;

        for c in text.chars() {
            let Some(glyph) = self.glyph(c) else {
                continue;
            };
            if let Some(prev) = previous {
                width += self.kerning(prev, c) as f32 * scale;
            }
            width += glyph.x_advance as f32 * scale;
            previous = Some(c);
        }

        Vec2::new(width, self.line_height * scale)
    }

    /// Positions each drawable glyph of `text` at `size`.
    pub fn layout(&self, text: &str, size: f32) -> Vec<PlacedGlyph> {
        let scale = self.scale(size);
        let mut placed = Vec::with_capacity(text.len());
        let mut pen = 0.0;
        let mut previous = None;

        for c in text.chars() {
            let Some(glyph) = self.glyph(c) else {
                continue;
            };
            if let Some(prev) = previous {
                pen += self.kerning(prev, c) as f32 * scale;
            }
            if glyph.width > 0 && glyph.height > 0 {
                placed.push(PlacedGlyph {
                    glyph: *glyph,
                    offset: Vec2::new(pen + glyph.x_offset as f32 * scale, glyph.y_offset as f32 * scale),
                    size: Vec2::new(glyph.width as f32, glyph.height as f32) * scale,
                });
            }
            pen += glyph.x_advance as f32 * scale;
            previous = Some(c);
        }

        placed
    }
}
