//! The speed-selection menu shown at the start of every round.

use bevy_ecs::system::Commands;
use glam::Vec2;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::asset::Asset;
use crate::constants::{layer, ui, CANVAS_SIZE};
use crate::systems::components::{Interactive, Label, MenuItem, Position, SceneEntity, SpeedButton, Sprite};
use crate::texture::font::BitmapFont;

/// The three selectable difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SpeedOption {
    Easy,
    Normal,
    Hard,
}

impl SpeedOption {
    pub fn multiplier(&self) -> f32 {
        match self {
            SpeedOption::Easy => 0.7,
            SpeedOption::Normal => 1.0,
            SpeedOption::Hard => 1.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedOption::Easy => "70 (Easy)",
            SpeedOption::Normal => "100 (Normal)",
            SpeedOption::Hard => "150 (Hard)",
        }
    }

    /// Center of the option's label; options are stacked top to bottom in declaration order.
    pub fn position(&self) -> Vec2 {
        let index = SpeedOption::iter().position(|option| option == *self).unwrap_or(0);
        Vec2::new(
            CANVAS_SIZE.x as f32 / 2.0,
            ui::OPTION_TOP + index as f32 * ui::OPTION_SPACING,
        )
    }
}

/// Spawns the logo, the title and one clickable label per speed option.
pub fn spawn_menu(commands: &mut Commands, font: &BitmapFont) {
    commands.spawn((
        Position(ui::LOGO_POSITION),
        Sprite::new(Asset::Logo, layer::UI).scaled(ui::LOGO_SCALE),
        MenuItem,
        SceneEntity,
    ));

    commands.spawn((
        Position(ui::TITLE_POSITION),
        Label {
            text: ui::TITLE_TEXT.to_string(),
            size: ui::TITLE_SIZE,
            layer: layer::UI_TEXT,
        },
        MenuItem,
        SceneEntity,
    ));

    for option in SpeedOption::iter() {
        commands.spawn((
            Position(option.position()),
            Label {
                text: option.label().to_string(),
                size: ui::OPTION_SIZE,
                layer: layer::UI_TEXT,
            },
            Interactive {
                size: font.measure(option.label(), ui::OPTION_SIZE),
            },
            SpeedButton(option),
            MenuItem,
            SceneEntity,
        ));
    }
}
