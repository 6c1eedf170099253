//! Keyboard and mouse collection for one rendered frame.

use macroquad::prelude::{
    KeyCode, MouseButton, is_key_down, is_key_pressed, is_mouse_button_down,
    is_mouse_button_pressed, is_mouse_button_released, mouse_position, screen_height, screen_width,
};

use crate::editor_loop::{EditorFrameInput, MouseButtonState, cell_at, grid_for_window};
use crate::viewer::ViewerInput;

const EDITOR_KEYS: [KeyCode; 22] = [
    KeyCode::Escape,
    KeyCode::S,
    KeyCode::Z,
    KeyCode::Y,
    KeyCode::Equal,
    KeyCode::Minus,
    KeyCode::G,
    KeyCode::LeftBracket,
    KeyCode::RightBracket,
    KeyCode::R,
    KeyCode::Key0,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
    KeyCode::KpAdd,
    KeyCode::KpSubtract,
];

/// Viewer-only window requests that never reach the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowRequests {
    pub quit: bool,
    pub toggle_fullscreen: bool,
}

/// Tracks the previous cursor position so mouse travel can be reported per frame.
#[derive(Default)]
pub struct MouseTracker {
    last: Option<(f32, f32)>,
}

impl MouseTracker {
    pub fn delta_x(&mut self) -> f32 {
        let current = mouse_position();
        let delta = self.last.map_or(0.0, |(x, _)| current.0 - x);
        self.last = Some(current);
        delta
    }
}

fn axis(positive: bool, negative: bool) -> f64 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

pub fn capture_viewer_input(mouse: &mut MouseTracker) -> (ViewerInput, WindowRequests) {
    let input = ViewerInput {
        forward: axis(is_key_down(KeyCode::W), is_key_down(KeyCode::S)),
        strafe: axis(is_key_down(KeyCode::D), is_key_down(KeyCode::A)),
        turn: axis(is_key_down(KeyCode::Right), is_key_down(KeyCode::Left)),
        mouse_dx: f64::from(mouse.delta_x()),
        regenerate: is_key_pressed(KeyCode::G),
    };
    let requests = WindowRequests {
        quit: is_key_pressed(KeyCode::Escape),
        toggle_fullscreen: is_key_pressed(KeyCode::F11),
    };
    (input, requests)
}

fn button_state(button: MouseButton) -> MouseButtonState {
    if is_mouse_button_pressed(button) {
        MouseButtonState::Pressed
    } else if is_mouse_button_released(button) {
        MouseButtonState::Released
    } else if is_mouse_button_down(button) {
        MouseButtonState::Held
    } else {
        MouseButtonState::Up
    }
}

pub fn capture_editor_input() -> EditorFrameInput {
    let mut keys_pressed = Vec::with_capacity(EDITOR_KEYS.len());
    for key in EDITOR_KEYS {
        if is_key_pressed(key) {
            keys_pressed.push(match key {
                KeyCode::KpAdd => KeyCode::Equal,
                KeyCode::KpSubtract => KeyCode::Minus,
                other => other,
            });
        }
    }

    let ctrl_down = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);
    let window_grid = grid_for_window(screen_width(), screen_height());
    let (mouse_x, mouse_y) = mouse_position();

    EditorFrameInput {
        keys_pressed,
        ctrl_down,
        hovered_cell: cell_at(mouse_x, mouse_y, window_grid),
        left: button_state(MouseButton::Left),
        right: button_state(MouseButton::Right),
        window_grid,
    }
}

#[cfg(test)]
mod tests {
    use super::axis;

    #[test]
    fn opposing_keys_cancel() {
        assert_eq!(axis(true, true), 0.0);
        assert_eq!(axis(true, false), 1.0);
        assert_eq!(axis(false, true), -1.0);
    }
}
