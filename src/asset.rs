//! Cross-platform asset loading abstraction.
//! On desktop, assets are embedded using include_bytes!; on Emscripten, assets are loaded from the filesystem.

use std::borrow::Cow;

use glam::UVec2;
use strum_macros::EnumIter;

use crate::error::AssetError;
use crate::platform;

/// The fixed manifest of files the scene is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Asset {
    Background,
    BirdMidFlap,
    BirdDownFlap,
    BirdUpFlap,
    BirdFall,
    Pipe,
    Base,
    GameOver,
    ScorePanel,
    Retry,
    Logo,
    FontImage,
    FontDescriptor,
}

impl Asset {
    /// Path of the asset relative to `assets/game/`.
    pub fn path(&self) -> &'static str {
        match self {
            Asset::Background => "background.png",
            Asset::BirdMidFlap => "bird-midflap.png",
            Asset::BirdDownFlap => "bird-downflap.png",
            Asset::BirdUpFlap => "bird-upflap.png",
            Asset::BirdFall => "bird-fall.png",
            Asset::Pipe => "pipe.png",
            Asset::Base => "base.png",
            Asset::GameOver => "gameover.png",
            Asset::ScorePanel => "score.png",
            Asset::Retry => "retry.png",
            Asset::Logo => "logo.png",
            Asset::FontImage => "font.png",
            Asset::FontDescriptor => "font.fnt",
        }
    }

    /// Pixel dimensions of an image asset.
    ///
    /// Gameplay needs these before any texture is loaded (colliders, hit boxes, gap geometry),
    /// so they are fixed here and checked against the files by the asset tests.
    pub fn size(&self) -> UVec2 {
        match self {
            Asset::Background => UVec2::new(288, 512),
            Asset::BirdMidFlap | Asset::BirdDownFlap | Asset::BirdUpFlap | Asset::BirdFall => UVec2::new(34, 24),
            Asset::Pipe => UVec2::new(52, 320),
            Asset::Base => UVec2::new(336, 112),
            Asset::GameOver => UVec2::new(192, 42),
            Asset::ScorePanel => UVec2::new(200, 90),
            Asset::Retry => UVec2::new(400, 140),
            Asset::Logo => UVec2::new(400, 80),
            Asset::FontImage => UVec2::new(144, 144),
            Asset::FontDescriptor => UVec2::ZERO,
        }
    }

    /// Whether the asset is loaded as a texture.
    pub fn is_image(&self) -> bool {
        !matches!(self, Asset::FontDescriptor)
    }

    pub fn get_bytes(&self) -> Result<Cow<'static, [u8]>, AssetError> {
        platform::get_asset_bytes(*self)
    }
}
