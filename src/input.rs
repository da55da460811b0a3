use std::collections::HashSet;

use winit::event::{ElementState, KeyboardInput, MouseButton, VirtualKeyCode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    None,
    /// Left click at a window position in physical pixels.
    Click { x: f64, y: f64 },
    /// Pan by whole tiles.
    Pan { columns: i32, rows: i32 },
    ZoomIn,
    ZoomOut,
    ResetView,
    Reseed,
    Exit,
}

pub struct InputHandler {
    pressed_keys: HashSet<VirtualKeyCode>,
    cursor: Option<(f64, f64)>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            cursor: None,
        }
    }

    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    pub fn handle_cursor_left(&mut self) {
        self.cursor = None;
    }

    pub fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) -> InputAction {
        match (state, button, self.cursor) {
            (ElementState::Pressed, MouseButton::Left, Some((x, y))) => InputAction::Click { x, y },
            _ => InputAction::None,
        }
    }

    pub fn handle_keyboard_input(&mut self, input: &KeyboardInput) -> InputAction {
        if let Some(key_code) = input.virtual_keycode {
            match input.state {
                ElementState::Pressed => {
                    // Ignore key repeat for everything but panning
                    let repeated = !self.pressed_keys.insert(key_code);
                    self.handle_key_press(key_code, repeated)
                }
                ElementState::Released => {
                    self.pressed_keys.remove(&key_code);
                    InputAction::None
                }
            }
        } else {
            InputAction::None
        }
    }

    fn handle_key_press(&self, key_code: VirtualKeyCode, repeated: bool) -> InputAction {
        match key_code {
            VirtualKeyCode::Up => InputAction::Pan { columns: 0, rows: -1 },
            VirtualKeyCode::Down => InputAction::Pan { columns: 0, rows: 1 },
            VirtualKeyCode::Left => InputAction::Pan { columns: -1, rows: 0 },
            VirtualKeyCode::Right => InputAction::Pan { columns: 1, rows: 0 },
            _ if repeated => InputAction::None,
            VirtualKeyCode::Plus | VirtualKeyCode::Equals | VirtualKeyCode::NumpadAdd => InputAction::ZoomIn,
            VirtualKeyCode::Minus | VirtualKeyCode::NumpadSubtract => InputAction::ZoomOut,
            VirtualKeyCode::Key0 | VirtualKeyCode::Numpad0 => InputAction::ResetView,
            VirtualKeyCode::R => InputAction::Reseed,
            VirtualKeyCode::Escape => InputAction::Exit,
            _ => InputAction::None,
        }
    }
}
