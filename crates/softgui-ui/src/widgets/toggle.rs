use softgui_core::geometry::{Pos, Rect, Size};
use softgui_render::TextBackend;

use crate::widget::{EventCx, Notification, PaintCx, TextAlign, Widget, WidgetBase};

const INDICATOR: i32 = 13;
const INDICATOR_LEFT: i32 = 2;
const TEXT_GAP: i32 = 6;

fn indicator_rect(rect: Rect<i32>) -> Rect<i32> {
    Rect::new(
        rect.x + INDICATOR_LEFT,
        rect.y + (rect.height - INDICATOR) / 2,
        INDICATOR,
        INDICATOR,
    )
}

fn caption_rect(rect: Rect<i32>) -> Rect<i32> {
    let left = INDICATOR_LEFT + INDICATOR + TEXT_GAP;
    Rect::new(rect.x + left, rect.y, (rect.width - left).max(0), rect.height)
}

fn measure_toggle(base: &WidgetBase, text: &mut dyn TextBackend) -> Size<i32> {
    let width = text.measure(&base.font, &base.text).ceil() as i32;
    let height = text.line_height(&base.font).ceil() as i32;
    Size::new(
        INDICATOR_LEFT + INDICATOR + TEXT_GAP + width + 2,
        (height + 4).max(INDICATOR + 4),
    )
}

/// Two-state box with a caption. Every press flips the state.
#[derive(Debug, Default)]
pub struct Checkbox {
    checked: bool,
}

impl Checkbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the state without notifying anyone.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Widget for Checkbox {
    fn debug_name(&self) -> &'static str {
        "Checkbox"
    }

    fn measure(&self, base: &WidgetBase, text: &mut dyn TextBackend) -> Size<i32> {
        measure_toggle(base, text)
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        cx.surface.fill_rect(base.rect, cx.palette.window);
        let indicator = indicator_rect(base.rect);
        cx.surface.fill_rect(indicator, cx.palette.field);
        cx.surface.stroke_rect(indicator, cx.palette.border);
        if self.checked {
            let x = indicator.x as f32;
            let y = indicator.y as f32;
            let s = INDICATOR as f32;
            let mid = Pos::new(x + s * 0.4, y + s * 0.75);
            cx.surface
                .draw_line(Pos::new(x + s * 0.2, y + s * 0.5), mid, 2.0, cx.palette.text);
            cx.surface
                .draw_line(mid, Pos::new(x + s * 0.8, y + s * 0.25), 2.0, cx.palette.text);
        }
        cx.draw_text(
            &base.font,
            &base.text,
            caption_rect(base.rect),
            TextAlign::Left,
            cx.palette.text,
        );
    }

    fn pointer_down(&mut self, base: &mut WidgetBase, _local: Pos<i32>, cx: &mut EventCx<'_>) {
        self.checked = !self.checked;
        base.mark_dirty();
        cx.emit(Notification::ValueChanged);
        cx.emit(Notification::Click);
    }
}

/// Mutually exclusive choice within a group of siblings.
///
/// Selecting one radio button deselects the others sharing its group id under
/// the same container; the tree enforces that after every selection.
#[derive(Debug)]
pub struct RadioButton {
    selected: bool,
    group: u32,
}

impl RadioButton {
    pub fn new(group: u32) -> Self {
        Self {
            selected: false,
            group,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn group(&self) -> u32 {
        self.group
    }

    pub(crate) fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }
}

impl Widget for RadioButton {
    fn debug_name(&self) -> &'static str {
        "RadioButton"
    }

    fn measure(&self, base: &WidgetBase, text: &mut dyn TextBackend) -> Size<i32> {
        measure_toggle(base, text)
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        cx.surface.fill_rect(base.rect, cx.palette.window);
        let indicator = indicator_rect(base.rect);
        let radius = INDICATOR as f32 / 2.0;
        let center = Pos::new(indicator.x as f32 + radius, indicator.y as f32 + radius);
        cx.surface.fill_circle(center, radius, cx.palette.field);
        cx.surface.stroke_circle(center, radius - 0.5, cx.palette.border);
        if self.selected {
            cx.surface.fill_circle(center, radius * 0.45, cx.palette.text);
        }
        cx.draw_text(
            &base.font,
            &base.text,
            caption_rect(base.rect),
            TextAlign::Left,
            cx.palette.text,
        );
    }

    fn pointer_down(&mut self, base: &mut WidgetBase, _local: Pos<i32>, cx: &mut EventCx<'_>) {
        if self.set_selected(true) {
            base.mark_dirty();
            cx.emit(Notification::ValueChanged);
        }
        cx.emit(Notification::Click);
    }
}
