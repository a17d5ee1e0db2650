use softgui_core::geometry::{Pos, Size};
use softgui_render::TextBackend;

use crate::widget::{
    Draggable, EventCx, Notification, PaintCx, TextAlign, Widget, WidgetBase,
};

/// Push button. Shows a sunken face while the pointer is held on it.
#[derive(Debug, Default)]
pub struct Button {
    pressed: bool,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl Widget for Button {
    fn debug_name(&self) -> &'static str {
        "Button"
    }

    fn measure(&self, base: &WidgetBase, text: &mut dyn TextBackend) -> Size<i32> {
        let width = text.measure(&base.font, &base.text).ceil() as i32;
        let height = text.line_height(&base.font).ceil() as i32;
        Size::new(width + 16, height + 8)
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        let face = if self.pressed {
            cx.palette.face_pressed
        } else {
            cx.palette.face
        };
        cx.surface.fill_rect(base.rect, face);
        cx.bevel(base.rect, self.pressed);

        let mut text_rect = base.rect;
        if self.pressed {
            text_rect.x += 1;
            text_rect.y += 1;
        }
        cx.draw_text(&base.font, &base.text, text_rect, TextAlign::Center, cx.palette.text);
    }

    fn pointer_down(&mut self, base: &mut WidgetBase, _local: Pos<i32>, cx: &mut EventCx<'_>) {
        self.pressed = true;
        base.mark_dirty();
        cx.emit(Notification::Click);
    }
}

impl Draggable for Button {
    fn drag(&mut self, _base: &mut WidgetBase, _local: Pos<i32>, _cx: &mut EventCx<'_>) {}

    fn release(&mut self, base: &mut WidgetBase, _local: Pos<i32>, _cx: &mut EventCx<'_>) {
        if self.pressed {
            self.pressed = false;
            base.mark_dirty();
        }
    }
}
