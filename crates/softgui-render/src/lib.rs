//! SoftGUI Render - CPU rasterization and presentation.
//!
//! Everything is drawn into an off-screen [`Surface`] and handed to a
//! [`Present`] implementation in one piece:
//!
//! ```rust,no_run
//! # use softgui_render::{Color, Compositor, Present, RenderError, Surface};
//! # use softgui_core::geometry::{Rect, Size};
//! # fn frame(presenter: &mut dyn Present) -> Result<(), RenderError> {
//! let mut compositor = Compositor::new();
//! let back = compositor.back_buffer(Size::new(320, 240))?;
//! back.clear(Color::WHITE);
//! back.fill_rect(Rect::new(10, 10, 50, 20), Color::BLACK);
//! compositor.present(presenter)?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod compositor;
pub mod error;
pub mod presenter;
pub mod surface;
pub mod text;

pub use color::Color;
pub use compositor::{Compositor, FrameOutcome, Present};
pub use error::RenderError;
pub use presenter::SoftbufferPresenter;
pub use surface::Surface;
pub use text::{FixedMetrics, FontContext, FontDescriptor, TextBackend};
