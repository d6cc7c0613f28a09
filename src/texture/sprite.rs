use std::collections::HashMap;

use sdl2::image::LoadTexture;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, RenderTarget, Texture, TextureCreator};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::asset::Asset;
use crate::error::{GameError, TextureError};

/// Every image asset, loaded once as a texture.
pub struct TextureStore {
    textures: HashMap<Asset, Texture>,
}

impl TextureStore {
    /// Loads every image in the manifest. A missing or undecodable image is fatal.
    pub fn load<T>(texture_creator: &TextureCreator<T>) -> Result<Self, GameError> {
        let mut textures = HashMap::new();

        for asset in Asset::iter().filter(Asset::is_image) {
            let bytes = asset.get_bytes()?;
            let texture = texture_creator.load_texture_bytes(&bytes).map_err(|e| {
                TextureError::LoadFailed(format!("{}: {}", asset.path(), e))
            })?;

            let query = texture.query();
            debug!(asset = asset.path(), width = query.width, height = query.height, "Loaded texture");
            if (query.width, query.height) != (asset.size().x, asset.size().y) {
                return Err(TextureError::InvalidFormat(format!(
                    "{} is {}x{}, expected {}x{}",
                    asset.path(),
                    query.width,
                    query.height,
                    asset.size().x,
                    asset.size().y
                ))
                .into());
            }

            textures.insert(asset, texture);
        }

        Ok(Self { textures })
    }

    pub fn get(&self, asset: Asset) -> Result<&Texture, TextureError> {
        self.textures
            .get(&asset)
            .ok_or_else(|| TextureError::Missing(asset.path().to_string()))
    }

    /// Copies a region of `asset` into `dest`, optionally rotated by 180 degrees around its center.
    pub fn draw<C: RenderTarget>(
        &self,
        canvas: &mut Canvas<C>,
        asset: Asset,
        src: Option<Rect>,
        dest: Rect,
        rotated: bool,
    ) -> Result<(), TextureError> {
        let texture = self.get(asset)?;
        let angle = if rotated { 180.0 } else { 0.0 };
        canvas
            .copy_ex(texture, src, dest, angle, None, false, false)
            .map_err(TextureError::RenderFailed)
    }
}
