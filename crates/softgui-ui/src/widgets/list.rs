use std::collections::BTreeSet;

use softgui_core::geometry::{Pos, Rect, Size};
use softgui_render::TextBackend;

use super::row_at;
use crate::widget::{EventCx, Notification, PaintCx, TextAlign, Widget, WidgetBase};

const LIST_PADDING: i32 = 2;
const ROW_TEXT_INSET: i32 = 4;
const NATURAL_ROW_HEIGHT: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Exactly one row at a time.
    Single,
    /// Each press toggles the row under the pointer.
    Multiple,
}

/// Vertical list of text rows with single or multiple selection.
#[derive(Debug)]
pub struct ListBox {
    items: Vec<String>,
    mode: SelectionMode,
    selection: BTreeSet<usize>,
}

impl ListBox {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            items: Vec::new(),
            mode,
            selection: BTreeSet::new(),
        }
    }

    pub fn with_items<I, S>(mode: SelectionMode, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new(mode);
        list.set_items(items);
        list
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replaces the rows. Selected indices past the new end are dropped.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        let len = self.items.len();
        self.selection.retain(|&index| index < len);
    }

    pub fn push_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// The lowest selected row.
    pub fn selected(&self) -> Option<usize> {
        self.selection.first().copied()
    }

    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selection.iter().copied()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Selects `index` without notifying. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        if self.mode == SelectionMode::Single {
            self.selection.clear();
        }
        self.selection.insert(index);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn press_row(&mut self, row: usize) -> bool {
        match self.mode {
            SelectionMode::Single => {
                if self.selection.len() == 1 && self.selection.contains(&row) {
                    return false;
                }
                self.selection.clear();
                self.selection.insert(row);
            }
            SelectionMode::Multiple => {
                if !self.selection.remove(&row) {
                    self.selection.insert(row);
                }
            }
        }
        true
    }
}

impl Widget for ListBox {
    fn debug_name(&self) -> &'static str {
        "ListBox"
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        let rect = base.rect;
        cx.surface.fill_rect(rect, cx.palette.field);
        cx.surface.stroke_rect(rect, cx.palette.border);

        let row_height = cx.config.list_row_height.max(1);
        let inner = rect.inset(LIST_PADDING, LIST_PADDING);
        for (index, item) in self.items.iter().enumerate() {
            let top = inner.y + index as i32 * row_height;
            if top >= inner.bottom() {
                break;
            }
            let height = row_height.min(inner.bottom() - top);
            let row = Rect::new(inner.x, top, inner.width, height);
            if self.selection.contains(&index) {
                cx.surface.fill_rect(row, cx.palette.selection);
            }
            let text_rect = Rect::new(row.x + ROW_TEXT_INSET, row.y, row.width, row_height);
            cx.draw_text(&base.font, item, text_rect, TextAlign::Left, cx.palette.text);
        }
    }

    fn measure(&self, base: &WidgetBase, text: &mut dyn TextBackend) -> Size<i32> {
        let widest = self
            .items
            .iter()
            .map(|item| text.measure(&base.font, item).ceil() as i32)
            .max()
            .unwrap_or(0);
        let rows = self.items.len().max(1) as i32;
        Size::new(
            widest + 2 * (LIST_PADDING + ROW_TEXT_INSET),
            rows * NATURAL_ROW_HEIGHT + 2 * LIST_PADDING,
        )
    }

    fn pointer_down(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>) {
        let row_height = cx.config().list_row_height;
        if let Some(row) = row_at(local.y - LIST_PADDING, row_height, self.items.len())
            && self.press_row(row)
        {
            base.mark_dirty();
            cx.emit(Notification::ValueChanged);
        }
        cx.emit(Notification::Click);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_selection_replaces() {
        let mut list = ListBox::with_items(SelectionMode::Single, ["a", "b", "c"]);
        assert!(list.press_row(1));
        assert!(!list.press_row(1));
        assert!(list.press_row(2));
        assert_eq!(list.selected_indices().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_multiple_selection_toggles() {
        let mut list = ListBox::with_items(SelectionMode::Multiple, ["a", "b", "c"]);
        list.press_row(0);
        list.press_row(2);
        list.press_row(0);
        assert_eq!(list.selected_indices().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_set_items_drops_stale_selection() {
        let mut list = ListBox::with_items(SelectionMode::Multiple, ["a", "b", "c"]);
        list.select(0);
        list.select(2);
        list.set_items(["x", "y"]);
        assert_eq!(list.selected_indices().collect::<Vec<_>>(), vec![0]);
        list.select(5);
        assert!(!list.is_selected(5));
    }
}
