use bevy_ecs::{
    event::EventWriter,
    query::With,
    system::{Query, Res, ResMut},
};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::trace;

use crate::events::{GameCommand, GameEvent};
use crate::systems::components::{Interactive, PointerQueue, Position, RetryButton, SpeedButton};
use crate::systems::stage::GameStage;

/// Finds the speed option under `point`, if any.
pub fn hit_speed_button<'a>(
    point: Vec2,
    buttons: impl IntoIterator<Item = (&'a Position, &'a Interactive, &'a SpeedButton)>,
) -> Option<SpeedButton> {
    buttons
        .into_iter()
        .find(|(position, interactive, _)| interactive.contains(position.0, point))
        .map(|(_, _, button)| *button)
}

/// Drains the pointer queue and turns each press into a command for the current stage.
///
/// Menu and game-over presses only count when they land on a control, and at most one
/// stage change is emitted per frame. Every press during play is a flap.
pub fn pointer_dispatch_system(
    mut queue: ResMut<PointerQueue>,
    stage: Res<GameStage>,
    speed_buttons: Query<(&Position, &Interactive, &SpeedButton)>,
    retry_buttons: Query<(&Position, &Interactive), With<RetryButton>>,
    mut writer: EventWriter<GameEvent>,
) {
    if queue.0.is_empty() {
        return;
    }

    let mut commands: SmallVec<[GameCommand; 4]> = SmallVec::new();

    // Breaking out of the drain still empties the queue; presses after a stage change are dropped
    for point in queue.0.drain(..) {
        trace!(x = point.x, y = point.y, stage = ?*stage, "Pointer down");
        match *stage {
            GameStage::Menu => {
                if let Some(SpeedButton(option)) = hit_speed_button(point, speed_buttons.iter()) {
                    commands.push(GameCommand::SelectSpeed(option));
                    break;
                }
            }
            GameStage::Playing => commands.push(GameCommand::Flap),
            GameStage::GameOver => {
                if retry_buttons
                    .iter()
                    .any(|(position, interactive)| interactive.contains(position.0, point))
                {
                    commands.push(GameCommand::Retry);
                    break;
                }
            }
        }
    }

    for command in commands {
        writer.write(command.into());
    }
}
