//! winit integration for SoftGUI.
//!
//! [`app::run_app`] owns the event loop and drives an [`app::App`]: window
//! events arrive through [`app::App::on_event`] in delivery order, and a
//! fixed-period [`app::App::tick`] wakes the loop for animation.

pub mod app;
pub mod event;
pub mod time;
pub mod window;

pub use time::FrameTime;
pub use winit::window::WindowId;
