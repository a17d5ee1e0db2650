use softgui_core::geometry::Size;
use softgui_render::TextBackend;

use crate::widget::{PaintCx, TextAlign, Widget, WidgetBase};

const TEXT_INSET: i32 = 2;

/// Static text.
#[derive(Debug, Default)]
pub struct Label;

impl Label {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Label {
    fn debug_name(&self) -> &'static str {
        "Label"
    }

    fn measure(&self, base: &WidgetBase, text: &mut dyn TextBackend) -> Size<i32> {
        let width = text.measure(&base.font, &base.text).ceil() as i32;
        let height = text.line_height(&base.font).ceil() as i32;
        Size::new(width + 2 * TEXT_INSET, height + 4)
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        // labels own their background so replaced text never leaves ghosts
        cx.surface.fill_rect(base.rect, cx.palette.window);
        let text_rect = base.rect.inset(TEXT_INSET, 0);
        cx.draw_text(&base.font, &base.text, text_rect, TextAlign::Left, cx.palette.text);
    }
}
