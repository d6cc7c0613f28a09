use bevy_ecs::prelude::*;

use crate::systems::menu::SpeedOption;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    /// Kick the bird upward.
    Flap,
    /// A speed option was picked from the menu; starts the round.
    SelectSpeed(SpeedOption),
    /// The retry control was tapped on the summary screen.
    Retry,
    Exit,
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Command(GameCommand),
    /// The bird overlapped another collider this frame: `(bird, other)`.
    Collision(Entity, Entity),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}
