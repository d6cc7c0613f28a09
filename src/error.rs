//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur during game operation.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // Only reachable on Emscripten, where assets are read from the packaged filesystem
    #[allow(dead_code)]
    #[error("Asset not found: {0}")]
    NotFound(String),
}

/// Platform-specific errors.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Console initialization failed: {0}")]
    ConsoleInit(String),
}

/// Errors raised while parsing a bitmap font descriptor.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FontError {
    #[error("Font descriptor is not valid UTF-8")]
    Encoding,

    #[error("Missing '{tag}' line in font descriptor")]
    MissingTag { tag: &'static str },

    #[error("Missing attribute '{attribute}' on '{tag}' line {line}")]
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
        line: usize,
    },

    #[error("Invalid value '{value}' for '{attribute}' on line {line}")]
    InvalidValue { attribute: String, value: String, line: usize },
}

/// Errors related to texture operations.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadFailed(String),

    #[error("Texture not loaded: {0}")]
    Missing(String),

    #[error("Invalid texture format: {0}")]
    InvalidFormat(String),

    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
