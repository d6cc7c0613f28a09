//! Draws bitmap-font text from the font atlas texture.

use glam::Vec2;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, RenderTarget};

use crate::asset::Asset;
use crate::error::TextureError;
use crate::texture::font::BitmapFont;
use crate::texture::sprite::TextureStore;

/// Draws `text` at `size`, centered on `center`.
pub fn draw_text<C: RenderTarget>(
    canvas: &mut Canvas<C>,
    store: &TextureStore,
    font: &BitmapFont,
    text: &str,
    size: f32,
    center: Vec2,
) -> Result<(), TextureError> {
    let top_left = center - font.measure(text, size) / 2.0;

    for placed in font.layout(text, size) {
        let glyph = placed.glyph;
        let src = Rect::new(glyph.x as i32, glyph.y as i32, glyph.width, glyph.height);
        let origin = top_left + placed.offset;
        let dest = Rect::new(
            origin.x.round() as i32,
            origin.y.round() as i32,
            placed.size.x.round().max(1.0) as u32,
            placed.size.y.round().max(1.0) as u32,
        );
        store.draw(canvas, Asset::FontImage, Some(src), dest, false)?;
    }

    Ok(())
}
