//! Widget storage and the relationships between widgets.

use indexmap::IndexMap;
use softgui_core::geometry::{Rect, Size};
use softgui_render::FontDescriptor;

use crate::callbacks::{ChangeCallback, ClickCallback, FocusCallback, KeyCallback};
use crate::dirty::DirtyFlags;
use crate::widget::{
    Notification, WidgetBase, WidgetHandle, WidgetId, WidgetKind, WidgetNode, WidgetVariant,
};
use crate::widgets::{Frame, RadioButton};

/// Runs the callback in `$slot` of widget `$id` with the tree borrowed mutably.
macro_rules! invoke_slot {
    ($tree:expr, $id:expr, $slot:ident $(, $arg:expr)*) => {{
        let taken = $tree
            .nodes
            .get_mut(&$id)
            .and_then(|node| node.callbacks.$slot.take());
        if let Some(mut callback) = taken {
            callback(&mut *$tree, $id $(, $arg)*);
            if let Some(node) = $tree.nodes.get_mut(&$id)
                && node.callbacks.$slot.is_none()
            {
                node.callbacks.$slot = Some(callback);
            }
        }
    }};
}

/// Owns every widget.
///
/// Widgets live as long as the tree. Top-level widgets are kept in
/// registration order, which is also their paint order; a widget added to a
/// frame leaves the top-level list and is painted by the frame instead.
#[derive(Default)]
pub struct WidgetTree {
    nodes: IndexMap<WidgetId, WidgetNode>,
    top_level: Vec<WidgetId>,
    next_id: u64,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert<T: WidgetVariant>(
        &mut self,
        widget: T,
        base: WidgetBase,
    ) -> WidgetHandle<T> {
        let id = WidgetId::from_raw(self.next_id);
        self.next_id += 1;
        tracing::trace!("created {} {:?}", widget.debug_name(), id);
        self.nodes.insert(id, WidgetNode::new(base, widget.into_kind()));
        WidgetHandle::new(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: impl Into<WidgetId>) -> bool {
        self.nodes.contains_key(&id.into())
    }

    /// All widgets in creation order.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.nodes.keys().copied()
    }

    /// Registered top-level widgets in paint order.
    pub fn top_level(&self) -> &[WidgetId] {
        &self.top_level
    }

    pub fn node(&self, id: impl Into<WidgetId>) -> Option<&WidgetNode> {
        self.nodes.get(&id.into())
    }

    pub(crate) fn node_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(&id)
    }

    pub fn base(&self, id: impl Into<WidgetId>) -> Option<&WidgetBase> {
        self.node(id).map(|node| &node.base)
    }

    pub fn kind(&self, id: impl Into<WidgetId>) -> Option<&WidgetKind> {
        self.node(id).map(|node| &node.kind)
    }

    pub fn get<T: WidgetVariant>(&self, handle: WidgetHandle<T>) -> Option<&T> {
        self.kind(handle).and_then(T::from_kind)
    }

    /// Mutates a widget's variant state and schedules a repaint.
    pub fn update<T, R>(
        &mut self,
        handle: WidgetHandle<T>,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R>
    where
        T: WidgetVariant,
    {
        let id = handle.id();
        let node = self.nodes.get_mut(&id)?;
        let widget = T::from_kind_mut(&mut node.kind)?;
        let result = f(widget);
        self.mark_dirty(id, DirtyFlags::PAINT);
        Some(result)
    }

    /// Adds a widget to the top-level paint order. Repeated calls are no-ops.
    pub(crate) fn register_top_level(&mut self, id: WidgetId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        self.detach(id);
        if !self.top_level.contains(&id) {
            self.top_level.push(id);
        }
        self.mark_dirty(id, DirtyFlags::LAYOUT);
        true
    }

    /// Moves `child` into `frame`. The child keeps its explicit geometry.
    pub fn add_to_frame(
        &mut self,
        frame: WidgetHandle<Frame>,
        child: impl Into<WidgetId>,
    ) -> bool {
        let frame_id = frame.id();
        let child = child.into();
        if frame_id == child
            || !self.nodes.contains_key(&child)
            || self.is_ancestor(child, frame_id)
        {
            tracing::warn!("refusing to add {:?} to frame {:?}", child, frame_id);
            return false;
        }
        if !self.kind(frame_id).is_some_and(WidgetKind::is_frame) {
            return false;
        }
        self.detach(child);
        if let Some(frame_widget) = self
            .nodes
            .get_mut(&frame_id)
            .and_then(|node| Frame::from_kind_mut(&mut node.kind))
        {
            frame_widget.push_child(child);
        }
        self.top_level.retain(|&id| id != child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.base.parent = Some(frame_id);
            node.base.placement = crate::layout::Placement::Placed;
        }
        self.mark_dirty(child, DirtyFlags::PAINT);
        true
    }

    /// Removes `id` from whatever frame currently holds it.
    pub(crate) fn detach(&mut self, id: WidgetId) {
        let Some(parent) = self.nodes.get_mut(&id).and_then(|node| node.base.parent.take()) else {
            return;
        };
        if let Some(frame) = self
            .nodes
            .get_mut(&parent)
            .and_then(|node| Frame::from_kind_mut(&mut node.kind))
        {
            frame.remove_child(id);
        }
        self.mark_dirty(parent, DirtyFlags::PAINT);
    }

    fn is_ancestor(&self, candidate: WidgetId, of: WidgetId) -> bool {
        let mut current = self.base(of).and_then(|base| base.parent);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.base(id).and_then(|base| base.parent);
        }
        false
    }

    /// Flags `id` and every container above it.
    pub fn mark_dirty(&mut self, id: impl Into<WidgetId>, flags: DirtyFlags) {
        let mut current = Some(id.into());
        while let Some(id) = current {
            let Some(node) = self.nodes.get_mut(&id) else {
                break;
            };
            node.base.dirty |= flags | DirtyFlags::PAINT;
            current = node.base.parent;
        }
    }

    /// Copies the flags a handler left on `id` up to its containers.
    pub(crate) fn propagate_dirty(&mut self, id: WidgetId) {
        let flags = self.base(id).map(|base| base.dirty).unwrap_or_default();
        if flags.needs_paint() {
            self.mark_dirty(id, flags);
        }
    }

    pub fn is_dirty(&self, id: impl Into<WidgetId>) -> bool {
        self.base(id).is_some_and(WidgetBase::is_dirty)
    }

    pub fn any_dirty(&self) -> bool {
        self.nodes.values().any(|node| node.base.is_dirty())
    }

    pub(crate) fn needs_layout(&self) -> bool {
        self.nodes.values().any(|node| node.base.dirty.needs_layout())
    }

    pub(crate) fn clear_dirty(&mut self) {
        for node in self.nodes.values_mut() {
            node.base.dirty = DirtyFlags::empty();
        }
    }

    pub(crate) fn clear_layout_flags(&mut self) {
        for node in self.nodes.values_mut() {
            node.base.dirty.remove(DirtyFlags::LAYOUT);
        }
    }

    pub fn text(&self, id: impl Into<WidgetId>) -> Option<&str> {
        self.base(id).map(|base| base.text.as_str())
    }

    /// Replaces a widget's text. An entry's caret is kept inside the new text.
    pub fn set_text(&mut self, id: impl Into<WidgetId>, text: impl Into<String>) {
        let id = id.into();
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        node.base.text = text.into();
        if let WidgetKind::Entry(entry) = &mut node.kind {
            entry.editor_mut().clamp(&node.base.text);
        }
        self.mark_dirty(id, DirtyFlags::PAINT);
    }

    pub fn set_font(&mut self, id: impl Into<WidgetId>, font: FontDescriptor) {
        let id = id.into();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.base.font = font;
            self.mark_dirty(id, DirtyFlags::PAINT);
        }
    }

    pub fn set_visible(&mut self, id: impl Into<WidgetId>, visible: bool) {
        let id = id.into();
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if node.base.visible != visible {
            node.base.visible = visible;
            self.mark_dirty(id, DirtyFlags::LAYOUT);
        }
    }

    pub fn rect(&self, id: impl Into<WidgetId>) -> Option<Rect<i32>> {
        self.base(id).map(|base| base.rect)
    }

    /// Sets a widget's size. Negative sizes are clamped to zero.
    pub fn set_size(&mut self, id: impl Into<WidgetId>, size: Size<i32>) {
        let id = id.into();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.base.rect.width = size.width.max(0);
            node.base.rect.height = size.height.max(0);
            self.mark_dirty(id, DirtyFlags::LAYOUT);
        }
    }

    /// Sets a widget's full rectangle in window coordinates.
    pub fn set_rect(&mut self, id: impl Into<WidgetId>, rect: Rect<i32>) {
        let id = id.into();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.base.rect = Rect::new(rect.x, rect.y, rect.width.max(0), rect.height.max(0));
            self.mark_dirty(id, DirtyFlags::LAYOUT);
        }
    }

    /// Ids sharing `id`'s container: the same frame, or the top level.
    pub fn siblings(&self, id: impl Into<WidgetId>) -> Vec<WidgetId> {
        let id = id.into();
        let Some(base) = self.base(id) else {
            return Vec::new();
        };
        let container: &[WidgetId] = match base.parent {
            Some(parent) => self.kind(parent).map(WidgetKind::children).unwrap_or_default(),
            None => &self.top_level,
        };
        container.iter().copied().filter(|&other| other != id).collect()
    }

    /// Selects `radio` and deselects the other members of its group.
    pub fn select_radio(&mut self, radio: WidgetHandle<RadioButton>) {
        let changed = self.update(radio, |button| button.set_selected(true));
        if changed.is_some() {
            self.enforce_radio_group(radio.id());
        }
    }

    /// Deselects every sibling radio button sharing `id`'s group.
    pub(crate) fn enforce_radio_group(&mut self, id: WidgetId) {
        let Some(group) = self
            .kind(id)
            .and_then(RadioButton::from_kind)
            .filter(|radio| radio.is_selected())
            .map(RadioButton::group)
        else {
            return;
        };
        for sibling in self.siblings(id) {
            let Some(node) = self.nodes.get_mut(&sibling) else {
                continue;
            };
            if let WidgetKind::RadioButton(radio) = &mut node.kind
                && radio.group() == group
                && radio.set_selected(false)
            {
                self.mark_dirty(sibling, DirtyFlags::PAINT);
            }
        }
    }

    pub fn on_click(
        &mut self,
        id: impl Into<WidgetId>,
        callback: impl FnMut(&mut WidgetTree, WidgetId) + 'static,
    ) {
        if let Some(node) = self.nodes.get_mut(&id.into()) {
            node.callbacks.click = Some(Box::new(callback) as ClickCallback);
        }
    }

    pub fn on_key(
        &mut self,
        id: impl Into<WidgetId>,
        callback: impl FnMut(&mut WidgetTree, WidgetId, char) + 'static,
    ) {
        if let Some(node) = self.nodes.get_mut(&id.into()) {
            node.callbacks.key = Some(Box::new(callback) as KeyCallback);
        }
    }

    pub fn on_focus(
        &mut self,
        id: impl Into<WidgetId>,
        callback: impl FnMut(&mut WidgetTree, WidgetId, bool) + 'static,
    ) {
        if let Some(node) = self.nodes.get_mut(&id.into()) {
            node.callbacks.focus = Some(Box::new(callback) as FocusCallback);
        }
    }

    pub fn on_change(
        &mut self,
        id: impl Into<WidgetId>,
        callback: impl FnMut(&mut WidgetTree, WidgetId) + 'static,
    ) {
        if let Some(node) = self.nodes.get_mut(&id.into()) {
            node.callbacks.change = Some(Box::new(callback) as ChangeCallback);
        }
    }

    /// Invokes the callbacks matching `notifications`, in order.
    pub(crate) fn dispatch(&mut self, id: WidgetId, notifications: &[Notification]) {
        for notification in notifications {
            match *notification {
                Notification::Click => invoke_slot!(self, id, click),
                Notification::Key(ch) => invoke_slot!(self, id, key, ch),
                Notification::Focus(gained) => invoke_slot!(self, id, focus, gained),
                Notification::ValueChanged => invoke_slot!(self, id, change),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Button, Label};
    use softgui_core::geometry::Size;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn base() -> WidgetBase {
        WidgetBase::new("", Size::new(100, 24))
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Label::new(), base());
        let b = tree.insert(Label::new(), base());
        assert_ne!(a.id(), b.id());
        assert_eq!(tree.ids().collect::<Vec<_>>(), vec![a.id(), b.id()]);
    }

    #[test]
    fn test_typed_get_rejects_wrong_variant() {
        let mut tree = WidgetTree::new();
        let label = tree.insert(Label::new(), base());
        let forged: WidgetHandle<Button> = WidgetHandle::new(label.id());
        assert!(tree.get(label).is_some());
        assert!(tree.get(forged).is_none());
    }

    #[test]
    fn test_mark_dirty_reaches_frame() {
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new(), base());
        let child = tree.insert(Label::new(), base());
        tree.register_top_level(frame.id());
        tree.add_to_frame(frame, child);
        tree.clear_dirty();

        tree.mark_dirty(child, DirtyFlags::PAINT);
        assert!(tree.is_dirty(child));
        assert!(tree.is_dirty(frame));
    }

    #[test]
    fn test_add_to_frame_leaves_top_level() {
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new(), base());
        let child = tree.insert(Label::new(), base());
        tree.register_top_level(frame.id());
        tree.register_top_level(child.id());
        assert!(tree.add_to_frame(frame, child));
        assert_eq!(tree.top_level(), &[frame.id()]);
        assert_eq!(tree.kind(frame).map(WidgetKind::children), Some(&[child.id()][..]));
        assert_eq!(tree.base(child).and_then(WidgetBase::parent), Some(frame.id()));
    }

    #[test]
    fn test_frame_cycles_are_refused() {
        let mut tree = WidgetTree::new();
        let outer = tree.insert(Frame::new(), base());
        let inner = tree.insert(Frame::new(), base());
        assert!(tree.add_to_frame(outer, inner));
        assert!(!tree.add_to_frame(inner, outer));
        assert!(!tree.add_to_frame(outer, outer));
    }

    #[test]
    fn test_callback_may_replace_itself() {
        let mut tree = WidgetTree::new();
        let button = tree.insert(Button::new(), base());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let first = calls.clone();
        tree.on_click(button, move |tree, id| {
            first.borrow_mut().push("first");
            let second = first.clone();
            tree.on_click(id, move |_, _| second.borrow_mut().push("second"));
        });

        tree.dispatch(button.id(), &[Notification::Click]);
        tree.dispatch(button.id(), &[Notification::Click]);
        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_set_text_clamps_entry_caret() {
        let mut tree = WidgetTree::new();
        let entry = tree.insert(crate::widgets::Entry::new(std::time::Instant::now()), base());
        tree.set_text(entry, "hello");
        if let Some(WidgetKind::Entry(widget)) = tree.node_mut(entry.id()).map(|node| &mut node.kind) {
            widget.editor_mut().move_end("hello");
        }
        tree.set_text(entry, "hi");
        assert_eq!(tree.get(entry).map(|e| e.caret()), Some(2));
    }
}
