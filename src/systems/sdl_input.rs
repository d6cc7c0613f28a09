use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{NonSendMut, ResMut};
use glam::Vec2;
use sdl2::event::{Event, WindowEvent};
use sdl2::mouse::MouseButton;
use sdl2::EventPump;
use tracing::debug;

use crate::constants::CANVAS_SIZE;
use crate::events::{GameCommand, GameEvent};
use crate::systems::components::{GlobalState, PointerQueue};

/// Polls SDL and queues pointer presses in logical canvas coordinates.
///
/// Mouse coordinates arrive already mapped to the canvas logical size; touch coordinates are
/// normalized to the window and are scaled here.
pub fn sdl_input_system(
    mut pump: NonSendMut<EventPump>,
    mut queue: ResMut<PointerQueue>,
    mut state: ResMut<GlobalState>,
    mut writer: EventWriter<GameEvent>,
) {
    for event in pump.poll_iter() {
        match event {
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => queue.push(Vec2::new(x as f32, y as f32)),
            Event::FingerDown { x, y, .. } => queue.push(Vec2::new(x, y) * CANVAS_SIZE.as_vec2()),
            Event::Window { win_event, .. } => match win_event {
                WindowEvent::FocusLost => {
                    debug!("Window lost focus");
                    state.focus_lost = true;
                }
                WindowEvent::FocusGained => {
                    debug!("Window gained focus");
                    state.focus_lost = false;
                }
                _ => {}
            },
            Event::Quit { .. } => {
                writer.write(GameCommand::Exit.into());
            }
            _ => {}
        }
    }
}
