//! Window events as the widget runtime sees them.
//!
//! Only what a single-window pointer-and-keyboard UI needs survives the
//! translation from winit. Coordinates stay in physical pixels.

use softgui_core::geometry::{Pos, Size};
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::{Key, NamedKey, SmolStr};

use winit::event::WindowEvent;

/// Events are handed to the app one at a time in the order winit delivered
/// them; nothing is reordered or coalesced.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Resized(Size<u32>),
    ScaleFactorChanged(f64),
    /// The window gained (`true`) or lost keyboard focus.
    Focused(bool),
    CloseRequested,
    /// Cursor position, in physical pixels.
    PointerMoved(Pos<f64>),
    /// A button was pressed at the last reported cursor position.
    PointerDown(MouseButton),
    PointerUp(MouseButton),
    /// The cursor left the window. Capture is not affected.
    PointerLeft,
    Key(KeyEvent),
}

/// A key press or release, reduced to what text entry needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Characters the key produced, if any.
    pub text: Option<SmolStr>,
    pub state: ElementState,
    pub repeat: bool,
}

impl KeyEvent {
    pub fn pressed(key: Key, text: Option<&str>) -> Self {
        Self {
            key,
            text: text.map(SmolStr::new),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    pub fn is_press(&self) -> bool {
        self.state == ElementState::Pressed
    }
}

bitflags::bitflags! {
    /// What the app did with an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HandleStatus: u8 {
        const HANDLED = 1;
        /// Skip the default handling (e.g. closing on `CloseRequested`).
        const CONSUMED = 1 << 1;
    }
}

impl HandleStatus {
    pub const fn ignored() -> Self {
        Self::empty()
    }

    pub const fn handled() -> Self {
        Self::HANDLED
    }

    pub const fn consumed() -> Self {
        Self::HANDLED.union(Self::CONSUMED)
    }

    pub const fn is_handled(&self) -> bool {
        self.contains(Self::HANDLED)
    }

    pub const fn is_consumed(&self) -> bool {
        self.contains(Self::CONSUMED)
    }
}

impl Event {
    /// Translates a winit event. Returns `None` for anything the runtime
    /// has no use for, and for redraws, which the loop handles itself.
    pub(crate) fn from_winit(event: WindowEvent) -> Option<Self> {
        let event = match event {
            WindowEvent::Resized(size) => Event::Resized(Size::new(size.width, size.height)),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                Event::ScaleFactorChanged(scale_factor)
            }
            WindowEvent::Focused(focused) => Event::Focused(focused),
            WindowEvent::CloseRequested => Event::CloseRequested,
            WindowEvent::CursorMoved { position, .. } => {
                Event::PointerMoved(Pos::new(position.x, position.y))
            }
            WindowEvent::CursorLeft { .. } => Event::PointerLeft,
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => Event::PointerDown(button),
                ElementState::Released => Event::PointerUp(button),
            },
            WindowEvent::KeyboardInput { event, .. } => Event::Key(KeyEvent {
                key: event.logical_key,
                text: event.text,
                state: event.state,
                repeat: event.repeat,
            }),
            WindowEvent::RedrawRequested | WindowEvent::Destroyed => return None,
            other => {
                tracing::trace!("ignoring window event {:?}", other);
                return None;
            }
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_status() {
        assert!(HandleStatus::consumed().is_consumed());
        assert!(HandleStatus::consumed().is_handled());
        assert!(!HandleStatus::handled().is_consumed());
        assert!(!HandleStatus::ignored().is_handled());
    }

    #[test]
    fn test_resize_keeps_physical_pixels() {
        let event = Event::from_winit(WindowEvent::Resized(winit::dpi::PhysicalSize::new(640, 480)));
        assert_eq!(event, Some(Event::Resized(Size::new(640, 480))));
    }

    #[test]
    fn test_redraw_is_not_forwarded() {
        assert_eq!(Event::from_winit(WindowEvent::CloseRequested), Some(Event::CloseRequested));
        assert_eq!(Event::from_winit(WindowEvent::RedrawRequested), None);
    }

    #[test]
    fn test_key_event_press() {
        let event = KeyEvent::pressed(Key::Character(SmolStr::new("a")), Some("a"));
        assert!(event.is_press());
        assert_eq!(event.text.as_deref(), Some("a"));
    }
}
