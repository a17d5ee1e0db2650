use softgui_core::geometry::{Pos, Rect};

use super::row_at;
use crate::widget::{
    Draggable, EventCx, Notification, PaintCx, TextAlign, Widget, WidgetBase,
};

const TEXT_INSET: i32 = 4;
const ARROW_WIDTH: i32 = 16;

/// Drop-down selector.
///
/// Pressing the header opens a list painted over every other widget. The row
/// under the pointer becomes the tentative choice and is committed when the
/// button is released over the list, or anywhere else once a drag has
/// highlighted a row. A press-and-release on the header just leaves the list
/// open for a second click.
#[derive(Debug)]
pub struct ComboBox {
    items: Vec<String>,
    selected: Option<usize>,
    expanded: bool,
    tentative: Option<usize>,
    opened_by_press: bool,
    /// A drag in the current press highlighted a row.
    dragged_over_row: bool,
    row_height: i32,
}

impl ComboBox {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            selected: None,
            expanded: false,
            tentative: None,
            opened_by_press: false,
            dragged_over_row: false,
            row_height: 20,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        let len = self.items.len();
        self.selected = self.selected.filter(|&index| index < len);
        self.tentative = self.tentative.filter(|&index| index < len);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.items.get(index))
            .map(String::as_str)
    }

    /// Selects without notifying. Out-of-range indices clear the selection.
    pub fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&index| index < self.items.len());
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Row highlighted in the open list.
    pub fn tentative(&self) -> Option<usize> {
        self.tentative
    }

    /// Closes the list and forgets the tentative choice.
    pub(crate) fn collapse(&mut self) {
        self.expanded = false;
        self.tentative = None;
        self.opened_by_press = false;
        self.dragged_over_row = false;
    }

    fn popup_rect(&self, rect: Rect<i32>) -> Rect<i32> {
        Rect::new(
            rect.x,
            rect.bottom(),
            rect.width,
            self.items.len() as i32 * self.row_height,
        )
    }

    /// Row of the open list under a widget-local position.
    fn popup_row(&self, rect: Rect<i32>, local: Pos<i32>) -> Option<usize> {
        let popup_bottom = rect.height + self.items.len() as i32 * self.row_height;
        if !self.expanded
            || local.y < rect.height
            || local.y >= popup_bottom
            || local.x < 0
            || local.x >= rect.width
        {
            return None;
        }
        row_at(local.y - rect.height, self.row_height, self.items.len())
    }

    fn commit(&mut self, cx: &mut EventCx<'_>) {
        self.selected = self.tentative;
        self.collapse();
        cx.emit(Notification::ValueChanged);
    }
}

impl Widget for ComboBox {
    fn debug_name(&self) -> &'static str {
        "ComboBox"
    }

    fn hit_rect(&self, base: &WidgetBase) -> Rect<i32> {
        if !self.expanded {
            return base.rect;
        }
        let popup = self.popup_rect(base.rect);
        Rect::new(
            base.rect.x,
            base.rect.y,
            base.rect.width,
            base.rect.height + popup.height,
        )
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        let rect = base.rect;
        cx.surface.fill_rect(rect, cx.palette.field);
        cx.surface.stroke_rect(rect, cx.palette.border);

        let text = self.selected_text().unwrap_or("");
        let text_rect = Rect::new(
            rect.x + TEXT_INSET,
            rect.y,
            (rect.width - TEXT_INSET - ARROW_WIDTH).max(0),
            rect.height,
        );
        cx.draw_text(&base.font, text, text_rect, TextAlign::Left, cx.palette.text);

        let cx_mid = (rect.right() - ARROW_WIDTH / 2) as f32;
        let cy_mid = rect.y as f32 + rect.height as f32 / 2.0;
        cx.surface.draw_line(
            Pos::new(cx_mid - 4.0, cy_mid - 2.0),
            Pos::new(cx_mid, cy_mid + 2.0),
            1.5,
            cx.palette.text,
        );
        cx.surface.draw_line(
            Pos::new(cx_mid, cy_mid + 2.0),
            Pos::new(cx_mid + 4.0, cy_mid - 2.0),
            1.5,
            cx.palette.text,
        );
    }

    fn render_overlay(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        if !self.expanded {
            return;
        }
        let popup = self.popup_rect(base.rect);
        cx.surface.fill_rect(popup, cx.palette.field);
        for (index, item) in self.items.iter().enumerate() {
            let row = Rect::new(
                popup.x,
                popup.y + index as i32 * self.row_height,
                popup.width,
                self.row_height,
            );
            if self.tentative == Some(index) {
                cx.surface.fill_rect(row, cx.palette.selection);
            }
            let text_rect = Rect::new(row.x + TEXT_INSET, row.y, row.width, row.height);
            cx.draw_text(&base.font, item, text_rect, TextAlign::Left, cx.palette.text);
        }
        cx.surface.stroke_rect(popup, cx.palette.border);
    }

    fn pointer_down(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>) {
        self.dragged_over_row = false;
        if self.expanded {
            self.opened_by_press = false;
            if let Some(row) = self.popup_row(base.rect, local) {
                self.tentative = Some(row);
            }
        } else {
            self.row_height = cx.config().list_row_height.max(1);
            self.expanded = true;
            self.opened_by_press = true;
            self.tentative = self.selected;
        }
        base.mark_dirty();
        cx.emit(Notification::Click);
    }
}

impl Draggable for ComboBox {
    fn drag(&mut self, base: &mut WidgetBase, local: Pos<i32>, _cx: &mut EventCx<'_>) {
        let Some(row) = self.popup_row(base.rect, local) else {
            return;
        };
        self.dragged_over_row = true;
        if self.tentative != Some(row) {
            self.tentative = Some(row);
            base.mark_dirty();
        }
    }

    fn release(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>) {
        if !self.expanded {
            return;
        }
        match self.popup_row(base.rect, local) {
            Some(row) => {
                self.tentative = Some(row);
                self.commit(cx);
            }
            None if self.dragged_over_row => self.commit(cx),
            None if self.opened_by_press => self.opened_by_press = false,
            None => self.collapse(),
        }
        base.mark_dirty();
    }
}
