pub mod font;
#[cfg(feature = "sdl")]
pub mod sprite;
#[cfg(feature = "sdl")]
pub mod text;
