//! Draws the scene: sprites and bitmap text in layer order, then presents the frame.

use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{NonSend, NonSendMut, Query, Res};
use glam::Vec2;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::error::{GameError, TextureError};
use crate::systems::components::{Label, Position, Sprite, TileScroll};
use crate::texture::font::BitmapFont;
use crate::texture::sprite::TextureStore;
use crate::texture::text::draw_text;

enum DrawItem<'a> {
    Sprite {
        center: Vec2,
        sprite: &'a Sprite,
        scroll: Option<&'a TileScroll>,
    },
    Text {
        center: Vec2,
        label: &'a Label,
    },
}

impl DrawItem<'_> {
    fn layer(&self) -> u8 {
        match self {
            DrawItem::Sprite { sprite, .. } => sprite.layer,
            DrawItem::Text { label, .. } => label.layer,
        }
    }
}

/// Draws a sprite whose texture wraps horizontally, shifted left by the scroll offset.
fn draw_tiled(
    canvas: &mut Canvas<Window>,
    store: &TextureStore,
    sprite: &Sprite,
    dest: Rect,
    scroll: &TileScroll,
) -> Result<(), TextureError> {
    let source = sprite.asset.size();
    let offset = (scroll.offset.floor() as u32) % source.x.max(1);
    let scale = sprite.scale;

    // Right part of the texture first, then the wrapped-around left part
    let head_width = source.x - offset;
    let head_dest_width = (head_width as f32 * scale).round() as u32;
    let head = Rect::new(offset as i32, 0, head_width, source.y);
    store.draw(
        canvas,
        sprite.asset,
        Some(head),
        Rect::new(dest.x(), dest.y(), head_dest_width, dest.height()),
        sprite.rotated,
    )?;

    if offset > 0 {
        let tail = Rect::new(0, 0, offset, source.y);
        let tail_dest = Rect::new(
            dest.x() + head_dest_width as i32,
            dest.y(),
            (offset as f32 * scale).round() as u32,
            dest.height(),
        );
        store.draw(canvas, sprite.asset, Some(tail), tail_dest, sprite.rotated)?;
    }

    Ok(())
}

pub fn render_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    store: NonSend<TextureStore>,
    font: Res<BitmapFont>,
    sprites: Query<(&Position, &Sprite, Option<&TileScroll>)>,
    labels: Query<(&Position, &Label)>,
    mut errors: EventWriter<GameError>,
) {
    let mut items: Vec<DrawItem> = sprites
        .iter()
        .map(|(position, sprite, scroll)| DrawItem::Sprite {
            center: position.0,
            sprite,
            scroll,
        })
        .chain(labels.iter().map(|(position, label)| DrawItem::Text {
            center: position.0,
            label,
        }))
        .collect();

    // Stable, so equal layers keep query order
    items.sort_by_key(|item| item.layer());

    let canvas = &mut *canvas;
    canvas.set_draw_color(Color::BLACK);
    canvas.clear();

    for item in items {
        let result = match item {
            DrawItem::Sprite { center, sprite, scroll } => {
                let size = sprite.size();
                let dest = Rect::from_center(
                    Point::new(center.x.round() as i32, center.y.round() as i32),
                    size.x.round().max(1.0) as u32,
                    size.y.round().max(1.0) as u32,
                );
                match scroll {
                    Some(scroll) => draw_tiled(canvas, &store, sprite, dest, scroll),
                    None => store.draw(canvas, sprite.asset, None, dest, sprite.rotated),
                }
            }
            DrawItem::Text { center, label } => draw_text(canvas, &store, &font, &label.text, label.size, center),
        };

        if let Err(e) = result {
            errors.write(e.into());
        }
    }

    canvas.present();
}
