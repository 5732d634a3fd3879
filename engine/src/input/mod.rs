//! Input Module
//!
//! Platform-agnostic pointer input consumed by the
//! [`Picker`](crate::picking::Picker). The [`winit_adapter`] turns winit
//! window events into [`PointerInput`]; other front ends (a browser
//! bridge, tests) can build `PointerInput` values directly.

pub mod mouse;
pub mod winit_adapter;

pub use mouse::{ButtonState, Modifiers, MouseButton, ScreenPosition, ScrollDelta, pixels_to_ndc};
pub use winit_adapter::WinitPointer;

/// One raw pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Button (or touch) pressed.
    Down {
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// Button (or touch) released.
    Up {
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// Pointer moved to a new screen position.
    Move(ScreenPosition),
    /// Wheel scrolled.
    Wheel(ScrollDelta),
}
