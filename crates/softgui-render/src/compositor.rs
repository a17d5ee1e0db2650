//! Double-buffered frame composition.
//!
//! A frame is drawn completely into the back buffer and only then handed to
//! the presenter; no widget ever draws to the visible surface.

use softgui_core::geometry::Size;
use softgui_core::profiling::profile_function;

use crate::{RenderError, Surface};

/// Copies a finished frame to wherever the user sees it.
pub trait Present {
    fn present(&mut self, frame: &Surface) -> Result<(), RenderError>;
}

/// What happened to a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// The target had zero area; nothing was drawn.
    Skipped,
}

/// Owns the back buffer, reallocating it only when the target size changes.
#[derive(Default)]
pub struct Compositor {
    back: Option<Surface>,
    frames_presented: u64,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the back buffer for a frame of `size`.
    pub fn back_buffer(&mut self, size: Size<u32>) -> Result<&mut Surface, RenderError> {
        let reuse = self.back.as_ref().is_some_and(|back| back.size() == size);
        if !reuse {
            // drop the old buffer first so a failed allocation leaves nothing stale
            self.back = None;
            tracing::debug!("allocating {}x{} back buffer", size.width, size.height);
            self.back = Some(Surface::new(size)?);
        }
        self.back
            .as_mut()
            .ok_or(RenderError::SurfaceAllocation {
                width: size.width,
                height: size.height,
            })
    }

    /// Hands the current back buffer to `presenter`.
    pub fn present(&mut self, presenter: &mut dyn Present) -> Result<(), RenderError> {
        let Some(back) = self.back.as_ref() else {
            return Err(RenderError::Present("no frame has been composed".to_string()));
        };
        presenter.present(back)?;
        self.frames_presented += 1;
        Ok(())
    }

    /// Draws a whole frame with `draw` and presents it.
    pub fn compose<F>(
        &mut self,
        size: Size<u32>,
        presenter: &mut dyn Present,
        draw: F,
    ) -> Result<FrameOutcome, RenderError>
    where
        F: FnOnce(&mut Surface),
    {
        profile_function!();
        if size.is_empty() {
            return Ok(FrameOutcome::Skipped);
        }
        let back = self.back_buffer(size)?;
        draw(back);
        self.present(presenter)?;
        Ok(FrameOutcome::Presented)
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// The most recently composed frame, if any.
    pub fn last_frame(&self) -> Option<&Surface> {
        self.back.as_ref()
    }
}
