use softgui_core::geometry::{Pos, Size};
use softgui_render::{Color, Surface, TextBackend};

use crate::widget::{PaintCx, Widget, WidgetBase};

/// Owns an off-screen pixel buffer that is stretched over the widget rect.
///
/// Writes go through [`WidgetTree::update`](crate::WidgetTree::update), which
/// marks the canvas dirty.
#[derive(Debug)]
pub struct Canvas {
    pixels: Option<Surface>,
}

impl Canvas {
    /// Creates a white buffer of `size`. A buffer that cannot be allocated
    /// leaves the canvas empty; it then draws nothing and ignores writes.
    pub fn new(size: Size<u32>) -> Self {
        let pixels = match Surface::new(size) {
            Ok(mut surface) => {
                surface.clear(Color::WHITE);
                Some(surface)
            }
            Err(err) => {
                tracing::warn!("canvas buffer unavailable: {}", err);
                None
            }
        };
        Self { pixels }
    }

    pub fn buffer_size(&self) -> Size<u32> {
        self.pixels
            .as_ref()
            .map_or(Size::new(0, 0), |pixels| pixels.size())
    }

    pub fn has_buffer(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(pixels) = self.pixels.as_mut() {
            pixels.put_pixel(x, y, color);
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.pixels.as_ref().and_then(|pixels| pixels.pixel(x, y))
    }

    pub fn fill(&mut self, color: Color) {
        if let Some(pixels) = self.pixels.as_mut() {
            pixels.clear(color);
        }
    }

    /// Resets the buffer to white.
    pub fn clear(&mut self) {
        self.fill(Color::WHITE);
    }

    pub fn draw_line(&mut self, from: Pos<f32>, to: Pos<f32>, color: Color) {
        if let Some(pixels) = self.pixels.as_mut() {
            pixels.draw_line(from, to, 1.0, color);
        }
    }

    /// Direct access to the buffer for anything the helpers above don't cover.
    pub fn surface_mut(&mut self) -> Option<&mut Surface> {
        self.pixels.as_mut()
    }
}

impl Widget for Canvas {
    fn debug_name(&self) -> &'static str {
        "Canvas"
    }

    fn measure(&self, _base: &WidgetBase, _text: &mut dyn TextBackend) -> Size<i32> {
        let size = self.buffer_size();
        Size::new(size.width as i32, size.height as i32)
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        if let Some(pixels) = self.pixels.as_ref() {
            cx.surface.draw_surface(pixels, base.rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_white() {
        let canvas = Canvas::new(Size::new(4, 3));
        assert_eq!(canvas.buffer_size(), Size::new(4, 3));
        assert_eq!(canvas.pixel(3, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_zero_sized_canvas_ignores_writes() {
        let mut canvas = Canvas::new(Size::new(0, 10));
        assert!(!canvas.has_buffer());
        canvas.put_pixel(0, 0, Color::BLACK);
        assert_eq!(canvas.pixel(0, 0), None);
    }

    #[test]
    fn test_put_pixel() {
        let mut canvas = Canvas::new(Size::new(2, 2));
        canvas.put_pixel(1, 1, Color::rgb(10, 20, 30));
        assert_eq!(canvas.pixel(1, 1), Some(Color::rgb(10, 20, 30)));
        canvas.fill(Color::BLACK);
        assert_eq!(canvas.pixel(1, 1), Some(Color::BLACK));
        canvas.clear();
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
    }
}
