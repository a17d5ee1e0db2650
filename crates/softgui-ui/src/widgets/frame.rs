use crate::widget::{PaintCx, Widget, WidgetBase, WidgetId};

/// Container that groups explicitly placed children.
///
/// A frame paints nothing itself; the render pass visits its visible children
/// in the order they were added.
#[derive(Debug, Default)]
pub struct Frame {
    children: Vec<WidgetId>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: WidgetId) -> bool {
        if self.children.contains(&child) {
            return false;
        }
        self.children.push(child);
        true
    }

    pub(crate) fn remove_child(&mut self, child: WidgetId) {
        self.children.retain(|&id| id != child);
    }
}

impl Widget for Frame {
    fn debug_name(&self) -> &'static str {
        "Frame"
    }

    fn render(&self, _base: &WidgetBase, _cx: &mut PaintCx<'_>) {}
}
