//! Desktop platform implementation.

use std::borrow::Cow;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::asset::Asset;
use crate::error::{AssetError, PlatformError};
use crate::formatter::CustomFormatter;

pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

/// Nothing to hand back to on desktop; the loop owns the thread.
pub fn yield_to_browser() {}

/// Installs the global tracing subscriber writing to stdout.
pub fn init_console() -> Result<(), PlatformError> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().event_format(CustomFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set tracing subscriber: {}", e)))
}

pub fn get_asset_bytes(asset: Asset) -> Result<Cow<'static, [u8]>, AssetError> {
    let bytes: &'static [u8] = match asset {
        Asset::Background => include_bytes!("../../assets/game/background.png"),
        Asset::BirdMidFlap => include_bytes!("../../assets/game/bird-midflap.png"),
        Asset::BirdDownFlap => include_bytes!("../../assets/game/bird-downflap.png"),
        Asset::BirdUpFlap => include_bytes!("../../assets/game/bird-upflap.png"),
        Asset::BirdFall => include_bytes!("../../assets/game/bird-fall.png"),
        Asset::Pipe => include_bytes!("../../assets/game/pipe.png"),
        Asset::Base => include_bytes!("../../assets/game/base.png"),
        Asset::GameOver => include_bytes!("../../assets/game/gameover.png"),
        Asset::ScorePanel => include_bytes!("../../assets/game/score.png"),
        Asset::Retry => include_bytes!("../../assets/game/retry.png"),
        Asset::Logo => include_bytes!("../../assets/game/logo.png"),
        Asset::FontImage => include_bytes!("../../assets/game/font.png"),
        Asset::FontDescriptor => include_bytes!("../../assets/game/font.fnt"),
    };
    Ok(Cow::Borrowed(bytes))
}

/// A generator seeded from the thread-local entropy source.
pub fn rng() -> SmallRng {
    SmallRng::from_rng(&mut rand::rng())
}
