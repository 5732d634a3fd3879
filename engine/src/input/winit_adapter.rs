//! Winit Adapter
//!
//! Translates winit `WindowEvent`s into [`PointerInput`]. Winit reports
//! modifier keys and viewport size as separate events, so the adapter keeps
//! both and stamps them onto the pointer events it produces.
//!
//! Touches are treated as a left button. A touch start only moves the
//! pointer; its press is held back in [`WinitPointer::take_deferred`] so the
//! picker can resolve the touched cell before the press lands. A touch
//! release that arrives while a press is still held back queues behind it.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{
    ElementState, MouseButton as WinitButton, MouseScrollDelta, TouchPhase, WindowEvent,
};
use winit::keyboard::ModifiersState;

use super::PointerInput;
use super::mouse::{Modifiers, MouseButton, ScreenPosition, ScrollDelta};

impl From<WinitButton> for MouseButton {
    fn from(button: WinitButton) -> Self {
        match button {
            WinitButton::Left => MouseButton::Left,
            WinitButton::Right => MouseButton::Right,
            WinitButton::Middle => MouseButton::Middle,
            WinitButton::Back => MouseButton::Other(4),
            WinitButton::Forward => MouseButton::Other(5),
            WinitButton::Other(id) => MouseButton::Other(id),
        }
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

/// Stateful winit-to-pointer translator for one window.
#[derive(Debug, Clone)]
pub struct WinitPointer {
    viewport: PhysicalSize<u32>,
    modifiers: Modifiers,
    deferred: Vec<PointerInput>,
}

impl WinitPointer {
    pub fn new(viewport: PhysicalSize<u32>) -> Self {
        Self {
            viewport,
            modifiers: Modifiers::default(),
            deferred: Vec::new(),
        }
    }

    pub fn viewport(&self) -> PhysicalSize<u32> {
        self.viewport
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Translates one window event. Events unrelated to the pointer (and
    /// resize/modifier events, which only update state) yield nothing.
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<PointerInput> {
        match event {
            WindowEvent::Resized(size) => {
                self.viewport = *size;
                Vec::new()
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state().into();
                Vec::new()
            }
            WindowEvent::CursorMoved { position, .. } => vec![self.cursor_moved(*position)],
            WindowEvent::MouseInput { state, button, .. } => vec![self.mouse_input(*state, *button)],
            WindowEvent::MouseWheel { delta, .. } => vec![self.wheel(*delta)],
            WindowEvent::Touch(touch) => self.touch(touch.phase, touch.location),
            _ => Vec::new(),
        }
    }

    pub fn cursor_moved(&self, position: PhysicalPosition<f64>) -> PointerInput {
        PointerInput::Move(ScreenPosition::from_pixels(
            position.x as f32,
            position.y as f32,
            self.viewport.width as f32,
            self.viewport.height as f32,
        ))
    }

    pub fn mouse_input(&self, state: ElementState, button: WinitButton) -> PointerInput {
        let button = MouseButton::from(button);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => PointerInput::Down { button, modifiers },
            ElementState::Released => PointerInput::Up { button, modifiers },
        }
    }

    pub fn wheel(&self, delta: MouseScrollDelta) -> PointerInput {
        let delta = match delta {
            MouseScrollDelta::LineDelta(x, y) => ScrollDelta::from_lines(x, y),
            MouseScrollDelta::PixelDelta(pos) => ScrollDelta::from_pixels(pos.x, pos.y),
        };
        PointerInput::Wheel(delta)
    }

    pub fn touch(&mut self, phase: TouchPhase, location: PhysicalPosition<f64>) -> Vec<PointerInput> {
        let modifiers = self.modifiers;
        let button = MouseButton::Left;
        match phase {
            TouchPhase::Started => {
                self.deferred.push(PointerInput::Down { button, modifiers });
                vec![self.cursor_moved(location)]
            }
            TouchPhase::Moved => vec![self.cursor_moved(location)],
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let up = PointerInput::Up { button, modifiers };
                if self.deferred.is_empty() {
                    vec![up]
                } else {
                    self.deferred.push(up);
                    Vec::new()
                }
            }
        }
    }

    /// Input held back from earlier touch events, oldest first.
    ///
    /// Call once per frame after `Picker::update`, and feed the result to
    /// the picker like any other input.
    pub fn take_deferred(&mut self) -> Vec<PointerInput> {
        std::mem::take(&mut self.deferred)
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }
}
