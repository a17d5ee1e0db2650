//! Off-screen pixel surface backed by a tiny-skia pixmap.

use softgui_core::geometry::{Pos, Rect, Size};
use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pattern, Pixmap, PremultipliedColorU8,
    SpreadMode, Stroke, Transform,
};

use crate::{Color, RenderError};

/// A CPU pixel buffer that widgets draw into.
///
/// Coordinates are integer window pixels; anything outside the surface is
/// clipped.
pub struct Surface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl Surface {
    /// Allocates a transparent surface. Fails for zero-area or oversized requests.
    pub fn new(size: Size<u32>) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(size.width, size.height).ok_or(RenderError::SurfaceAllocation {
            width: size.width,
            height: size.height,
        })?;
        Ok(Self { pixmap })
    }

    pub fn size(&self) -> Size<u32> {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    pub fn fill_rect(&mut self, rect: Rect<i32>, color: Color) {
        let Some(rect) = skia_rect(rect) else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &solid(color), Transform::identity(), None);
    }

    /// One pixel border drawn inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect<i32>, color: Color) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1, rect.width, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.height), color);
        self.fill_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.height), color);
    }

    pub fn draw_line(&mut self, from: Pos<f32>, to: Pos<f32>, width: f32, color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
    }

    pub fn fill_circle(&mut self, center: Pos<f32>, radius: f32, color: Color) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &solid(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    pub fn stroke_circle(&mut self, center: Pos<f32>, radius: f32, color: Color) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &solid(color),
            &Stroke::default(),
            Transform::identity(),
            None,
        );
    }

    /// Source-over blend of a single pixel. Used by the glyph rasterizer.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        if color.a == 0 {
            return;
        }
        let pixels = self.pixmap.pixels_mut();
        let dst = pixels[index];
        let sa = color.a as u32;
        let inv = 255 - sa;
        let channel = |src: u8, dst: u8| -> u8 {
            ((src as u32 * sa + dst as u32 * inv + 127) / 255) as u8
        };
        let a = (sa + (dst.alpha() as u32 * inv + 127) / 255).min(255) as u8;
        let r = channel(color.r, dst.red()).min(a);
        let g = channel(color.g, dst.green()).min(a);
        let b = channel(color.b, dst.blue()).min(a);
        if let Some(blended) = PremultipliedColorU8::from_rgba(r, g, b, a) {
            pixels[index] = blended;
        }
    }

    /// Stretches `source` over `dest` using nearest-neighbour sampling.
    pub fn draw_surface(&mut self, source: &Surface, dest: Rect<i32>) {
        let Some(rect) = skia_rect(dest) else {
            return;
        };
        let src = source.size();
        let sx = dest.width as f32 / src.width as f32;
        let sy = dest.height as f32 / src.height as f32;
        let paint = Paint {
            shader: Pattern::new(
                source.pixmap.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Nearest,
                1.0,
                Transform::from_row(sx, 0.0, 0.0, sy, dest.x as f32, dest.y as f32),
            ),
            ..Paint::default()
        };
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Overwrites one pixel without blending.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        let premultiplied = color.to_skia().premultiply().to_color_u8();
        self.pixmap.pixels_mut()[index] = premultiplied;
    }

    /// Reads one pixel back as a straight (non-premultiplied) color.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let index = self.index(x, y)?;
        let c = self.pixmap.pixels()[index].demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Row-major `0x00RRGGBB` pixels, ready for a window framebuffer.
    pub fn xrgb_pixels(&self) -> impl Iterator<Item = u32> + '_ {
        self.pixmap.pixels().iter().map(|p| {
            let c = p.demultiply();
            Color::rgb(c.red(), c.green(), c.blue()).to_xrgb()
        })
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let size = self.size();
        if x < 0 || y < 0 || x as u32 >= size.width || y as u32 >= size.height {
            return None;
        }
        Some(y as usize * size.width as usize + x as usize)
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn skia_rect(rect: Rect<i32>) -> Option<tiny_skia::Rect> {
    if rect.width <= 0 || rect.height <= 0 {
        return None;
    }
    tiny_skia::Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_surface_fails() {
        let err = Surface::new(Size::new(0, 10)).err();
        assert_eq!(
            err,
            Some(RenderError::SurfaceAllocation {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut surface = Surface::new(Size::new(8, 8)).unwrap();
        surface.clear(Color::WHITE);
        surface.fill_rect(Rect::new(4, 4, 100, 100), Color::BLACK);

        assert_eq!(surface.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(surface.pixel(4, 4), Some(Color::BLACK));
        assert_eq!(surface.pixel(7, 7), Some(Color::BLACK));
        assert_eq!(surface.pixel(8, 8), None);
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut surface = Surface::new(Size::new(10, 10)).unwrap();
        surface.clear(Color::WHITE);
        surface.stroke_rect(Rect::new(0, 0, 10, 10), Color::BLACK);

        assert_eq!(surface.pixel(0, 5), Some(Color::BLACK));
        assert_eq!(surface.pixel(9, 9), Some(Color::BLACK));
        assert_eq!(surface.pixel(5, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_blend_pixel_opaque_and_transparent() {
        let mut surface = Surface::new(Size::new(2, 1)).unwrap();
        surface.clear(Color::WHITE);
        surface.blend_pixel(0, 0, Color::BLACK);
        surface.blend_pixel(1, 0, Color::TRANSPARENT);

        assert_eq!(surface.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(surface.pixel(1, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_draw_surface_stretches() {
        let mut source = Surface::new(Size::new(2, 1)).unwrap();
        source.put_pixel(0, 0, Color::rgb(255, 0, 0));
        source.put_pixel(1, 0, Color::rgb(0, 0, 255));

        let mut target = Surface::new(Size::new(8, 4)).unwrap();
        target.clear(Color::WHITE);
        target.draw_surface(&source, Rect::new(0, 0, 8, 4));

        assert_eq!(target.pixel(1, 1), Some(Color::rgb(255, 0, 0)));
        assert_eq!(target.pixel(6, 2), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn test_xrgb_pixels_row_major() {
        let mut surface = Surface::new(Size::new(2, 2)).unwrap();
        surface.clear(Color::BLACK);
        surface.put_pixel(1, 0, Color::rgb(0x11, 0x22, 0x33));

        let pixels: Vec<u32> = surface.xrgb_pixels().collect();
        assert_eq!(pixels, vec![0, 0x0011_2233, 0, 0]);
    }
}
