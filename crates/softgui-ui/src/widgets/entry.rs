use std::time::Instant;

use softgui_core::geometry::{Pos, Rect};

use crate::editor::TextEditor;
use crate::input::KeyInput;
use crate::widget::{EventCx, Notification, PaintCx, TextAlign, Widget, WidgetBase};

/// Single-line text field. The text itself lives in [`WidgetBase::text`].
#[derive(Debug)]
pub struct Entry {
    editor: TextEditor,
}

impl Entry {
    pub fn new(now: Instant) -> Self {
        Self {
            editor: TextEditor::new(now),
        }
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    pub(crate) fn editor_mut(&mut self) -> &mut TextEditor {
        &mut self.editor
    }

    pub fn caret(&self) -> usize {
        self.editor.caret()
    }

    pub fn is_focused(&self) -> bool {
        self.editor.is_focused()
    }
}

impl Widget for Entry {
    fn debug_name(&self) -> &'static str {
        "Entry"
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        let rect = base.rect;
        cx.surface.fill_rect(rect, cx.palette.field);
        let border = if self.editor.is_focused() {
            cx.palette.accent
        } else {
            cx.palette.border
        };
        cx.surface.stroke_rect(rect, border);

        let inset = cx.config.entry_inset;
        let text_rect = Rect::new(rect.x + inset, rect.y, (rect.width - inset).max(0), rect.height);
        cx.draw_text(&base.font, &base.text, text_rect, TextAlign::Left, cx.palette.text);

        if self.editor.is_focused() && self.editor.caret_visible(cx.now, cx.config.blink_interval) {
            let caret = self.editor.caret().min(base.text.len());
            let prefix = base.text.get(..caret).unwrap_or(&base.text);
            let x = (text_rect.x as f32 + cx.measure_text(&base.font, prefix)).floor() + 0.5;
            let top = (rect.y + 4) as f32;
            let bottom = (rect.bottom() - 4) as f32;
            cx.surface
                .draw_line(Pos::new(x, top), Pos::new(x, bottom), 1.0, cx.palette.text);
        }
    }

    fn pointer_down(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>) {
        let offset = (local.x - cx.config().entry_inset) as f32;
        let font = &base.font;
        let index = TextEditor::index_at(&base.text, offset, |prefix| cx.text().measure(font, prefix));
        self.editor.set_caret(&base.text, index);
        self.editor.restart_blink(cx.now());
        base.mark_dirty();
    }

    fn key(&mut self, base: &mut WidgetBase, key: KeyInput, cx: &mut EventCx<'_>) {
        let edited = match key {
            KeyInput::Char(ch) => {
                cx.emit(Notification::Key(ch));
                self.editor.insert(&mut base.text, ch)
            }
            KeyInput::Backspace => self.editor.backspace(&mut base.text),
            KeyInput::Delete => self.editor.delete(&mut base.text),
            KeyInput::Left => {
                self.editor.move_left(&base.text);
                false
            }
            KeyInput::Right => {
                self.editor.move_right(&base.text);
                false
            }
            KeyInput::Home => {
                self.editor.move_home();
                false
            }
            KeyInput::End => {
                self.editor.move_end(&base.text);
                false
            }
            KeyInput::Enter => {
                self.editor.set_focused(false, cx.now());
                // committing reports the value even when nothing was typed
                true
            }
        };
        if edited {
            cx.emit(Notification::ValueChanged);
        }
        self.editor.restart_blink(cx.now());
        base.mark_dirty();
    }
}
