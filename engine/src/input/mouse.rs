//! Pointer Input Types
//!
//! Buttons, modifier keys, screen positions and wheel deltas, independent
//! of any windowing system.

use glam::Vec2;

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// Held state of the three main buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    /// Create a new button state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state for a specific button. Extra buttons are not tracked.
    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other(_) => {}
        }
    }

    /// Check if any of the three main buttons is pressed.
    pub fn any_pressed(&self) -> bool {
        self.left || self.middle || self.right
    }

    /// Check if a specific button is pressed.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create a modifier state with no keys held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only Shift held.
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    /// Only Ctrl held.
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    /// Check if no modifier key is held.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Pointer position on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPosition {
    /// Raw position in pixels, origin top-left.
    pub pixels: Vec2,
    /// Normalized device coordinates: x and y in `-1..=1`, y up.
    pub ndc: Vec2,
}

impl ScreenPosition {
    /// Builds a position from pixel coordinates inside a viewport.
    ///
    /// A zero-sized viewport maps everything to the center.
    pub fn from_pixels(x: f32, y: f32, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            pixels: Vec2::new(x, y),
            ndc: pixels_to_ndc(x, y, viewport_width, viewport_height),
        }
    }
}

/// Pixel coordinates (origin top-left) to NDC (origin center, y up).
pub fn pixels_to_ndc(x: f32, y: f32, viewport_width: f32, viewport_height: f32) -> Vec2 {
    if viewport_width <= 0.0 || viewport_height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (x / viewport_width) * 2.0 - 1.0,
        -(y / viewport_height) * 2.0 + 1.0,
    )
}

/// Scroll wheel delta, line-based.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollDelta {
    /// Horizontal scroll (positive = right)
    pub x: f32,
    /// Vertical scroll (positive = up/forward)
    pub y: f32,
}

impl ScrollDelta {
    /// Create from line delta (common for mouse wheels).
    pub fn from_lines(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create from pixel delta (common for trackpads).
    /// Normalizes by dividing by 100 to get approximate line equivalents.
    pub fn from_pixels(x: f64, y: f64) -> Self {
        Self {
            x: (x / 100.0) as f32,
            y: (y / 100.0) as f32,
        }
    }

    /// Check if there's any scroll movement.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_state_set() {
        let mut buttons = ButtonState::new();
        buttons.set(MouseButton::Left, true);
        assert!(buttons.any_pressed());
        assert!(buttons.is_pressed(MouseButton::Left));
        assert!(!buttons.is_pressed(MouseButton::Right));

        buttons.set(MouseButton::Other(4), true);
        assert!(!buttons.is_pressed(MouseButton::Other(4)));
    }

    #[test]
    fn test_pixels_to_ndc() {
        assert_eq!(pixels_to_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
        assert_eq!(pixels_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(pixels_to_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_zero_viewport() {
        assert_eq!(pixels_to_ndc(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    }

    #[test]
    fn test_modifiers() {
        assert!(Modifiers::new().is_empty());
        assert!(Modifiers::shift().shift);
        assert!(!Modifiers::ctrl().is_empty());
    }

    #[test]
    fn test_scroll_delta() {
        let scroll = ScrollDelta::from_pixels(0.0, -200.0);
        assert_eq!(scroll.y, -2.0);
        assert!(ScrollDelta::default().is_zero());
    }
}
