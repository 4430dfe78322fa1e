//! Reusable form controls
//!
//! Each control keeps its state in `mod.rs` with input handling and
//! rendering beside it. Rendering returns a layout used for hit testing on
//! the next mouse event.

pub mod button;
pub mod text_input;
pub mod toggle;

pub use button::{render_button, ButtonColors, ButtonEvent, ButtonLayout, ButtonState};
pub use text_input::{render_text_input, TextInputColors, TextInputEvent, TextInputState};
pub use toggle::{render_toggle, ToggleColors, ToggleEvent, ToggleLayout, ToggleState};

/// Focus state of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Focused,
    /// The mouse is over the control
    Hovered,
    Disabled,
}
