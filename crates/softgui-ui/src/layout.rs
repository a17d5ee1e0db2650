//! Edge-stacking pack layout.
//!
//! Packed top-level widgets are stacked in registration order: `Top` widgets
//! from the top edge downward, `Left` widgets from the left edge rightward.
//! Both stacks start at the window margin and keep a fixed gap between
//! widgets. Widgets that are not packed keep whatever rectangle they were
//! given.

use softgui_core::geometry::{Rect, Size};
use softgui_core::profiling::profile_function;

use crate::UiConfig;
use crate::dirty::DirtyFlags;
use crate::tree::WidgetTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Top,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    #[default]
    None,
    X,
    Y,
    Both,
}

impl Fill {
    pub fn fills_x(self) -> bool {
        matches!(self, Fill::X | Fill::Both)
    }

    pub fn fills_y(self) -> bool {
        matches!(self, Fill::Y | Fill::Both)
    }
}

/// How a packed widget is stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackOptions {
    pub side: Side,
    pub fill: Fill,
    /// Extra space left and right of the widget.
    pub pad_x: i32,
    /// Extra space above and below the widget.
    pub pad_y: i32,
}

impl PackOptions {
    pub fn top() -> Self {
        Self::default()
    }

    pub fn left() -> Self {
        Self {
            side: Side::Left,
            ..Self::default()
        }
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn pad(mut self, pad_x: i32, pad_y: i32) -> Self {
        self.pad_x = pad_x;
        self.pad_y = pad_y;
        self
    }
}

/// Who decides a widget's rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Position set explicitly (or never set).
    #[default]
    Placed,
    Packed(PackOptions),
}

/// Recomputes the rectangles of all packed top-level widgets.
///
/// Running the pass twice without changes in between yields identical
/// rectangles.
pub fn pack(tree: &mut WidgetTree, viewport: Size<u32>, config: &UiConfig) {
    profile_function!();
    let margin = config.layout_margin;
    let gap = config.layout_gap;
    let avail_width = i32::try_from(viewport.width).unwrap_or(i32::MAX) - 2 * margin;
    let avail_height = i32::try_from(viewport.height).unwrap_or(i32::MAX) - 2 * margin;

    let mut cursor_top = margin;
    let mut cursor_left = margin;

    let order = tree.top_level().to_vec();
    for id in order {
        let Some(node) = tree.node_mut(id) else {
            continue;
        };
        let Placement::Packed(options) = node.base.placement else {
            continue;
        };

        let old = node.base.rect;
        let mut rect = old;
        match options.side {
            Side::Top => {
                rect.x = margin + options.pad_x;
                if options.fill.fills_x() {
                    rect.width = (avail_width - 2 * options.pad_x).max(0);
                } else if rect.width == 0 {
                    rect.width = config.default_size.width;
                }
                if rect.height == 0 {
                    rect.height = config.default_size.height;
                }
                rect.y = cursor_top + options.pad_y;
                cursor_top += rect.height + options.pad_y + gap;
            }
            Side::Left => {
                rect.y = margin + options.pad_y;
                if options.fill.fills_y() {
                    rect.height = (avail_height - 2 * options.pad_y).max(0);
                } else if rect.height == 0 {
                    rect.height = config.default_size.height;
                }
                if rect.width == 0 {
                    rect.width = config.default_size.width;
                }
                rect.x = cursor_left + options.pad_x;
                cursor_left += rect.width + options.pad_x + gap;
            }
        }

        if rect != old {
            tracing::trace!("packed {:?}: {:?} -> {:?}", id, old, rect);
            node.base.rect = rect;
            tree.mark_dirty(id, DirtyFlags::PAINT);
        }
    }
    tree.clear_layout_flags();
}

/// Natural size clamped away from zero, used when sizing a widget to content.
pub(crate) fn content_size(measured: Size<i32>, fallback: Size<i32>) -> Size<i32> {
    Size::new(
        if measured.width > 0 { measured.width } else { fallback.width },
        if measured.height > 0 { measured.height } else { fallback.height },
    )
}

pub(crate) fn with_size(rect: Rect<i32>, size: Size<i32>) -> Rect<i32> {
    Rect::new(rect.x, rect.y, size.width, size.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetBase;
    use crate::widgets::Label;

    fn packed(tree: &mut WidgetTree, height: i32, options: PackOptions) -> crate::WidgetId {
        let mut base = WidgetBase::new("", Size::new(100, height));
        base.placement = Placement::Packed(options);
        let id = tree.insert(Label::new(), base).id();
        tree.register_top_level(id);
        id
    }

    #[test]
    fn test_top_stack_offsets() {
        let mut tree = WidgetTree::new();
        let a = packed(&mut tree, 24, PackOptions::top());
        let b = packed(&mut tree, 40, PackOptions::top());
        let c = packed(&mut tree, 24, PackOptions::top());
        pack(&mut tree, Size::new(400, 300), &UiConfig::default());

        let ys: Vec<i32> = [a, b, c]
            .iter()
            .filter_map(|&id| tree.rect(id))
            .map(|rect| rect.y)
            .collect();
        assert_eq!(ys, vec![10, 42, 90]);
        assert!([a, b, c].iter().all(|&id| tree.rect(id).map(|r| r.x) == Some(10)));
    }

    #[test]
    fn test_fill_x_spans_window() {
        let mut tree = WidgetTree::new();
        let id = packed(&mut tree, 24, PackOptions::top().fill(Fill::X).pad(5, 3));
        pack(&mut tree, Size::new(400, 300), &UiConfig::default());
        assert_eq!(tree.rect(id), Some(Rect::new(15, 13, 370, 24)));
    }

    #[test]
    fn test_left_stack() {
        let mut tree = WidgetTree::new();
        let a = packed(&mut tree, 24, PackOptions::left());
        let b = packed(&mut tree, 24, PackOptions::left().fill(Fill::Y));
        pack(&mut tree, Size::new(400, 300), &UiConfig::default());
        assert_eq!(tree.rect(a), Some(Rect::new(10, 10, 100, 24)));
        assert_eq!(tree.rect(b), Some(Rect::new(118, 10, 100, 280)));
    }

    #[test]
    fn test_pack_is_idempotent() {
        let mut tree = WidgetTree::new();
        packed(&mut tree, 24, PackOptions::top().fill(Fill::Both));
        packed(&mut tree, 30, PackOptions::left().pad(4, 4));
        let config = UiConfig::default();
        pack(&mut tree, Size::new(320, 200), &config);
        let first: Vec<_> = tree.ids().filter_map(|id| tree.rect(id)).collect();
        tree.clear_dirty();
        pack(&mut tree, Size::new(320, 200), &config);
        let second: Vec<_> = tree.ids().filter_map(|id| tree.rect(id)).collect();
        assert_eq!(first, second);
        assert!(!tree.any_dirty());
    }

    #[test]
    fn test_tiny_window_never_produces_negative_sizes() {
        let mut tree = WidgetTree::new();
        let id = packed(&mut tree, 24, PackOptions::top().fill(Fill::X).pad(30, 0));
        pack(&mut tree, Size::new(10, 10), &UiConfig::default());
        assert_eq!(tree.rect(id).map(|r| r.width), Some(0));
    }
}
