use super::orbit_controller::{KeyDirection, OrbitInput};
use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::input::mouse::MouseButtonInput;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::{CursorMoved, WindowEvent};

/// Tracks pointer context across window events so mouse and single-touch
/// input collapse into one drag stream.
#[derive(Debug, Default)]
pub struct PointerTracker {
    cursor_x: Option<f64>,
    touch_id: Option<u64>,
}

impl PointerTracker {
    /// Translate one window event, in delivery order. Unrelated events yield `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<OrbitInput> {
        match event {
            WindowEvent::CursorMoved(moved) => self.cursor_moved(moved),
            WindowEvent::MouseButtonInput(button) => self.mouse_button(button),
            WindowEvent::TouchInput(touch) => self.touch(touch),
            WindowEvent::KeyboardInput(key) => key_input(key),
            WindowEvent::KeyboardFocusLost(_) => self.focus_lost(),
            WindowEvent::WindowFocused(focus) if !focus.focused => self.focus_lost(),
            _ => None,
        }
    }

    fn cursor_moved(&mut self, moved: &CursorMoved) -> Option<OrbitInput> {
        let client_x = f64::from(moved.position.x);
        self.cursor_x = Some(client_x);
        if self.touch_id.is_some() {
            return None;
        }
        Some(OrbitInput::DragMove { client_x })
    }

    fn mouse_button(&mut self, button: &MouseButtonInput) -> Option<OrbitInput> {
        if button.button != MouseButton::Left || self.touch_id.is_some() {
            return None;
        }
        match button.state {
            ButtonState::Pressed => self
                .cursor_x
                .map(|client_x| OrbitInput::DragStart { client_x }),
            ButtonState::Released => Some(OrbitInput::DragEnd),
        }
    }

    fn touch(&mut self, touch: &TouchInput) -> Option<OrbitInput> {
        match touch.phase {
            TouchPhase::Started if self.touch_id.is_none() => {
                self.touch_id = Some(touch.id);
                Some(OrbitInput::DragStart {
                    client_x: f64::from(touch.position.x),
                })
            }
            TouchPhase::Moved if self.touch_id == Some(touch.id) => Some(OrbitInput::DragMove {
                client_x: f64::from(touch.position.x),
            }),
            TouchPhase::Ended | TouchPhase::Canceled if self.touch_id == Some(touch.id) => {
                self.touch_id = None;
                Some(OrbitInput::DragEnd)
            }
            // Secondary fingers are ignored.
            _ => None,
        }
    }

    // Releases that happen while unfocused are never delivered.
    fn focus_lost(&mut self) -> Option<OrbitInput> {
        self.touch_id = None;
        Some(OrbitInput::FocusLost)
    }
}

fn key_input(key: &KeyboardInput) -> Option<OrbitInput> {
    let direction = match key.key_code {
        KeyCode::ArrowLeft => KeyDirection::Left,
        KeyCode::ArrowRight => KeyDirection::Right,
        _ => return None,
    };
    match key.state {
        // Auto-repeat presses step again, like repeated keydown events.
        ButtonState::Pressed => Some(OrbitInput::KeyRotate(direction)),
        ButtonState::Released => Some(OrbitInput::KeyRelease(direction)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::keyboard::{Key, KeyboardFocusLost};
    use bevy::window::WindowFocused;

    fn cursor(x: f32) -> WindowEvent {
        WindowEvent::CursorMoved(CursorMoved {
            window: Entity::PLACEHOLDER,
            position: Vec2::new(x, 10.0),
            delta: None,
        })
    }

    fn left_button(state: ButtonState) -> WindowEvent {
        WindowEvent::MouseButtonInput(MouseButtonInput {
            button: MouseButton::Left,
            state,
            window: Entity::PLACEHOLDER,
        })
    }

    fn touch(id: u64, phase: TouchPhase, x: f32) -> WindowEvent {
        WindowEvent::TouchInput(TouchInput {
            phase,
            position: Vec2::new(x, 0.0),
            window: Entity::PLACEHOLDER,
            force: None,
            id,
        })
    }

    fn key(key_code: KeyCode, logical_key: Key, state: ButtonState) -> WindowEvent {
        WindowEvent::KeyboardInput(KeyboardInput {
            key_code,
            logical_key,
            state,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        })
    }

    #[test]
    fn mouse_drag_uses_last_cursor_position() {
        let mut tracker = PointerTracker::default();
        assert_eq!(
            tracker.translate(&cursor(40.0)),
            Some(OrbitInput::DragMove { client_x: 40.0 })
        );
        assert_eq!(
            tracker.translate(&left_button(ButtonState::Pressed)),
            Some(OrbitInput::DragStart { client_x: 40.0 })
        );
        assert_eq!(
            tracker.translate(&left_button(ButtonState::Released)),
            Some(OrbitInput::DragEnd)
        );
    }

    #[test]
    fn press_before_any_cursor_is_ignored() {
        let mut tracker = PointerTracker::default();
        assert_eq!(tracker.translate(&left_button(ButtonState::Pressed)), None);
    }

    #[test]
    fn only_first_touch_drives_the_drag() {
        let mut tracker = PointerTracker::default();
        assert_eq!(
            tracker.translate(&touch(1, TouchPhase::Started, 100.0)),
            Some(OrbitInput::DragStart { client_x: 100.0 })
        );
        assert_eq!(tracker.translate(&touch(2, TouchPhase::Started, 300.0)), None);
        assert_eq!(tracker.translate(&touch(2, TouchPhase::Moved, 320.0)), None);
        assert_eq!(
            tracker.translate(&touch(1, TouchPhase::Moved, 150.0)),
            Some(OrbitInput::DragMove { client_x: 150.0 })
        );
        assert_eq!(tracker.translate(&touch(2, TouchPhase::Ended, 320.0)), None);
        assert_eq!(
            tracker.translate(&touch(1, TouchPhase::Canceled, 150.0)),
            Some(OrbitInput::DragEnd)
        );
        assert_eq!(
            tracker.translate(&touch(2, TouchPhase::Started, 10.0)),
            Some(OrbitInput::DragStart { client_x: 10.0 })
        );
    }

    #[test]
    fn arrow_keys_map_to_steps_and_others_are_ignored() {
        let mut tracker = PointerTracker::default();
        assert_eq!(
            tracker.translate(&key(KeyCode::ArrowLeft, Key::ArrowLeft, ButtonState::Pressed)),
            Some(OrbitInput::KeyRotate(KeyDirection::Left))
        );
        assert_eq!(
            tracker.translate(&key(KeyCode::ArrowRight, Key::ArrowRight, ButtonState::Pressed)),
            Some(OrbitInput::KeyRotate(KeyDirection::Right))
        );
        assert_eq!(
            tracker.translate(&key(KeyCode::ArrowRight, Key::ArrowRight, ButtonState::Released)),
            Some(OrbitInput::KeyRelease(KeyDirection::Right))
        );
        assert_eq!(
            tracker.translate(&key(KeyCode::ArrowUp, Key::ArrowUp, ButtonState::Pressed)),
            None
        );
    }

    #[test]
    fn focus_loss_ends_manual_input_and_frees_the_touch() {
        let mut tracker = PointerTracker::default();
        tracker.translate(&touch(1, TouchPhase::Started, 100.0));
        assert_eq!(
            tracker.translate(&WindowEvent::KeyboardFocusLost(KeyboardFocusLost)),
            Some(OrbitInput::FocusLost)
        );
        assert_eq!(
            tracker.translate(&touch(2, TouchPhase::Started, 40.0)),
            Some(OrbitInput::DragStart { client_x: 40.0 })
        );

        assert_eq!(
            tracker.translate(&WindowEvent::WindowFocused(WindowFocused {
                window: Entity::PLACEHOLDER,
                focused: false,
            })),
            Some(OrbitInput::FocusLost)
        );
        assert_eq!(
            tracker.translate(&WindowEvent::WindowFocused(WindowFocused {
                window: Entity::PLACEHOLDER,
                focused: true,
            })),
            None
        );
    }
}
