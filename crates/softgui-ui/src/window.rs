//! The windowed runtime.
//!
//! [`Window`] is a [`UiCore`] plus the OS window it will be shown in. Build
//! the widget tree through it, then call [`Window::run`] to open the window
//! and drive the event loop until the window is closed.

use std::ops::{Deref, DerefMut};
use std::time::Instant;

use softgui_core::geometry::{Pos, Size};
use softgui_core::profiling;
use softgui_render::{Compositor, FontContext, SoftbufferPresenter};
use softgui_winit::WindowId;
use softgui_winit::app::{App, AppCtx, LoopSettings, RunError, run_app};
use softgui_winit::event::{Event, HandleStatus, Key, KeyEvent, MouseButton, NamedKey};
use softgui_winit::window::WindowDescriptor;
use softgui_winit::FrameTime;

use crate::UiConfig;
use crate::host::UiCore;
use crate::input::KeyInput;

pub struct Window {
    core: UiCore,
    descriptor: WindowDescriptor,
}

impl Window {
    /// A window of `width` x `height` physical pixels titled `title`.
    pub fn new(width: u32, height: u32, title: &str) -> Self {
        Self::with_config(width, height, title, UiConfig::default())
    }

    pub fn with_config(width: u32, height: u32, title: &str, config: UiConfig) -> Self {
        let size = Size::new(width, height);
        let core = UiCore::new(config, Box::new(FontContext::new())).with_viewport(size);
        let descriptor = WindowDescriptor::new(title, size);
        Self { core, descriptor }
    }

    pub fn core(&self) -> &UiCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut UiCore {
        &mut self.core
    }

    /// Opens the window and runs until it is closed.
    pub fn run(self) -> Result<(), RunError> {
        let Window { core, descriptor } = self;
        let settings = LoopSettings {
            tick_interval: Some(core.config().tick_interval),
        };
        tracing::info!("opening window \"{}\"", descriptor.title);

        run_app(
            settings,
            Box::new(move |ctx: &mut AppCtx<'_>| {
                let window = ctx.create_window(descriptor)?;
                let presenter = SoftbufferPresenter::new(&window)
                    .map_err(|err| RunError::Startup(err.to_string()))?;
                let mut core = core;
                core.resize(window.physical_size());
                let app: Box<dyn App> = Box::new(HostApp {
                    core,
                    window,
                    presenter,
                    compositor: Compositor::new(),
                    cursor: Pos::new(0, 0),
                });
                Ok(app)
            }),
        )
    }
}

impl Deref for Window {
    type Target = UiCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl DerefMut for Window {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.core
    }
}

struct HostApp {
    core: UiCore,
    window: softgui_winit::window::Window,
    presenter: SoftbufferPresenter,
    compositor: Compositor,
    cursor: Pos<i32>,
}

impl HostApp {
    fn schedule_redraw(&mut self) {
        if self.core.take_repaint_request() {
            self.window.request_redraw();
        }
    }
}

impl App for HostApp {
    fn on_start(&mut self, _ctx: &mut AppCtx) {
        self.window.request_redraw();
    }

    fn tick(&mut self, _ctx: &mut AppCtx, time: &FrameTime) {
        profiling::new_frame();
        if time.frame_count > 1 && time.delta > self.core.config().tick_interval * 2 {
            tracing::debug!("tick {} late: {:?} since the previous one", time.frame_count, time.delta);
        }
        self.core.tick();
        self.schedule_redraw();
    }

    fn on_event(&mut self, _ctx: &mut AppCtx, window_id: WindowId, event: &Event) -> HandleStatus {
        if window_id != self.window.id() {
            return HandleStatus::ignored();
        }
        let status = match event {
            Event::Resized(size) => {
                self.core.resize(*size);
                self.core.request_repaint();
                HandleStatus::handled()
            }
            Event::PointerMoved(pos) => {
                self.cursor = Pos::new(pos.x.floor() as i32, pos.y.floor() as i32);
                self.core.pointer_move(self.cursor);
                HandleStatus::handled()
            }
            Event::PointerDown(MouseButton::Left) => {
                self.core.pointer_down(self.cursor);
                HandleStatus::consumed()
            }
            Event::PointerUp(MouseButton::Left) => {
                self.core.pointer_up(self.cursor);
                HandleStatus::consumed()
            }
            Event::Key(key) => {
                let mut handled = false;
                for input in translate_key(key) {
                    handled |= self.core.key_input(input);
                }
                if handled {
                    HandleStatus::consumed()
                } else {
                    HandleStatus::ignored()
                }
            }
            Event::Focused(_) | Event::ScaleFactorChanged(_) => {
                self.core.request_repaint();
                HandleStatus::handled()
            }
            _ => HandleStatus::ignored(),
        };
        self.schedule_redraw();
        status
    }

    fn render(&mut self, _ctx: &mut AppCtx, window_id: WindowId) {
        if window_id != self.window.id() {
            return;
        }
        if let Err(err) =
            self.core
                .render_frame(&mut self.compositor, &mut self.presenter, Instant::now())
        {
            tracing::error!("frame dropped: {}", err);
        }
    }

    fn on_exit(&mut self, _ctx: &mut AppCtx) {
        tracing::info!(
            "window closed after {} frames",
            self.compositor.frames_presented()
        );
    }
}

/// Converts a pressed key into widget key input.
///
/// Editing keys are matched by their logical name first; anything else is
/// delivered as the characters it produced.
pub(crate) fn translate_key(event: &KeyEvent) -> Vec<KeyInput> {
    if !event.is_press() {
        return Vec::new();
    }
    let named = match &event.key {
        Key::Named(NamedKey::ArrowLeft) => Some(KeyInput::Left),
        Key::Named(NamedKey::ArrowRight) => Some(KeyInput::Right),
        Key::Named(NamedKey::Home) => Some(KeyInput::Home),
        Key::Named(NamedKey::End) => Some(KeyInput::End),
        Key::Named(NamedKey::Backspace) => Some(KeyInput::Backspace),
        Key::Named(NamedKey::Delete) => Some(KeyInput::Delete),
        Key::Named(NamedKey::Enter) => Some(KeyInput::Enter),
        _ => None,
    };
    if let Some(input) = named {
        return vec![input];
    }
    event
        .text
        .as_ref()
        .map(|text| text.chars().map(KeyInput::from_char).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use softgui_winit::event::{ElementState, SmolStr};

    #[test]
    fn test_named_keys_win_over_text() {
        let event = KeyEvent::pressed(Key::Named(NamedKey::Enter), Some("\r"));
        assert_eq!(translate_key(&event), vec![KeyInput::Enter]);
    }

    #[test]
    fn test_text_becomes_chars() {
        let event = KeyEvent::pressed(Key::Character(SmolStr::new("a")), Some("a"));
        assert_eq!(translate_key(&event), vec![KeyInput::Char('a')]);
    }

    #[test]
    fn test_releases_are_ignored() {
        let mut event = KeyEvent::pressed(Key::Character(SmolStr::new("a")), Some("a"));
        event.state = ElementState::Released;
        assert!(translate_key(&event).is_empty());
    }
}
