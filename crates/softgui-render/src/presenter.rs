use std::num::NonZeroU32;
use std::sync::Arc;

use softgui_winit::window::{Window, WinitWindow};

use crate::{Present, RenderError, Surface};

/// Presents frames to a winit window through softbuffer.
pub struct SoftbufferPresenter {
    surface: softbuffer::Surface<Arc<WinitWindow>, Arc<WinitWindow>>,
    _context: softbuffer::Context<Arc<WinitWindow>>,
}

impl SoftbufferPresenter {
    pub fn new(window: &Window) -> Result<Self, RenderError> {
        let handle = window.handle();
        let context = softbuffer::Context::new(handle.clone())
            .map_err(|err| RenderError::Backend(err.to_string()))?;
        let surface = softbuffer::Surface::new(&context, handle)
            .map_err(|err| RenderError::Backend(err.to_string()))?;
        Ok(Self {
            surface,
            _context: context,
        })
    }
}

impl Present for SoftbufferPresenter {
    fn present(&mut self, frame: &Surface) -> Result<(), RenderError> {
        let size = frame.size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };
        self.surface
            .resize(width, height)
            .map_err(|err| RenderError::Present(err.to_string()))?;
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|err| RenderError::Present(err.to_string()))?;
        for (dst, src) in buffer.iter_mut().zip(frame.xrgb_pixels()) {
            *dst = src;
        }
        buffer
            .present()
            .map_err(|err| RenderError::Present(err.to_string()))
    }
}
