use softgui_core::geometry::Size;
use softgui_render::{Color, Present, RenderError, Surface};

/// A copy of one presented frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub size: Size<u32>,
    pub pixels: Vec<u32>,
}

impl CapturedFrame {
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let xrgb = self.pixels[(y * self.size.width + x) as usize];
        Some(Color::rgb(
            ((xrgb >> 16) & 0xFF) as u8,
            ((xrgb >> 8) & 0xFF) as u8,
            (xrgb & 0xFF) as u8,
        ))
    }
}

/// Captures frames instead of showing them.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    frames: Vec<CapturedFrame>,
    fail_next: Option<RenderError>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `present` call fail with `error`.
    pub fn fail_next(&mut self, error: RenderError) {
        self.fail_next = Some(error);
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&CapturedFrame> {
        self.frames.last()
    }
}

impl Present for RecordingPresenter {
    fn present(&mut self, frame: &Surface) -> Result<(), RenderError> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }
        self.frames.push(CapturedFrame {
            size: frame.size(),
            pixels: frame.xrgb_pixels().collect(),
        });
        Ok(())
    }
}
