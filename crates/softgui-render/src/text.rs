//! Text measurement and rasterization.
//!
//! Widgets talk to a [`TextBackend`]. The windowed runtime uses
//! [`FontContext`] (cosmic-text shaping, swash rasterization); headless hosts
//! and tests use [`FixedMetrics`], which has a constant advance per byte.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use softgui_core::geometry::{Pos, Rect};

use crate::{Color, Surface};

/// Font family and size of a widget's text. Size is in points.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: String,
    pub size: f32,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Point size converted at 96 DPI.
    pub fn pixel_size(&self) -> f32 {
        self.size * 96.0 / 72.0
    }

    pub fn line_height(&self) -> f32 {
        (self.pixel_size() * 1.2).ceil()
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("sans-serif", 12.0)
    }
}

/// Measures and draws single-line text.
pub trait TextBackend {
    /// Advance width of `text` in pixels.
    fn measure(&mut self, font: &FontDescriptor, text: &str) -> f32;

    fn line_height(&mut self, font: &FontDescriptor) -> f32 {
        font.line_height()
    }

    /// Draws `text` with its line box's top-left corner at `origin`.
    fn draw(
        &mut self,
        surface: &mut Surface,
        font: &FontDescriptor,
        text: &str,
        origin: Pos<f32>,
        color: Color,
    );
}

/// Owns the font database and glyph cache for a window.
///
/// Fonts are discovered once on creation and released when the context is
/// dropped; nothing about fonts is process-global.
pub struct FontContext {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl FontContext {
    pub fn new() -> Self {
        let font_system = FontSystem::new();
        tracing::info!(
            "font context ready ({} faces)",
            font_system.db().faces().count()
        );
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    fn shape(&mut self, font: &FontDescriptor, text: &str) -> Buffer {
        let metrics = Metrics::new(font.pixel_size(), font.line_height());
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(
            &mut self.font_system,
            text,
            Attrs::new().family(family(font)),
            Shaping::Basic,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FontContext {
    fn drop(&mut self) {
        tracing::debug!("font context released");
    }
}

impl TextBackend for FontContext {
    fn measure(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let buffer = self.shape(font, text);
        buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0, f32::max)
    }

    fn draw(
        &mut self,
        surface: &mut Surface,
        font: &FontDescriptor,
        text: &str,
        origin: Pos<f32>,
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }
        let buffer = self.shape(font, text);
        let ox = origin.x.round() as i32;
        let oy = origin.y.round() as i32;
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            cosmic_text::Color::rgba(color.r, color.g, color.b, color.a),
            |x, y, w, h, glyph_color| {
                let paint = Color::rgba(
                    glyph_color.r(),
                    glyph_color.g(),
                    glyph_color.b(),
                    glyph_color.a(),
                );
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        surface.blend_pixel(ox + x + dx, oy + y + dy, paint);
                    }
                }
            },
        );
    }
}

fn family(font: &FontDescriptor) -> Family<'_> {
    match font.family.as_str() {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        name => Family::Name(name),
    }
}

/// Deterministic metrics: every byte advances by the same amount.
///
/// Drawing paints one solid box per non-space byte so that rendered text is
/// still visible in captured frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub advance: f32,
}

impl FixedMetrics {
    pub const fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl TextBackend for FixedMetrics {
    fn measure(&mut self, _font: &FontDescriptor, text: &str) -> f32 {
        text.len() as f32 * self.advance
    }

    fn draw(
        &mut self,
        surface: &mut Surface,
        font: &FontDescriptor,
        text: &str,
        origin: Pos<f32>,
        color: Color,
    ) {
        let glyph_w = (self.advance - 2.0).max(1.0) as i32;
        let glyph_h = (font.pixel_size() * 0.7).max(1.0) as i32;
        let top = (origin.y + (font.line_height() - glyph_h as f32) / 2.0) as i32;
        for (i, byte) in text.bytes().enumerate() {
            if byte.is_ascii_whitespace() {
                continue;
            }
            let left = (origin.x + i as f32 * self.advance) as i32 + 1;
            surface.fill_rect(Rect::new(left, top, glyph_w, glyph_h), color);
        }
    }
}
