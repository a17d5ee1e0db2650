//! Pointer and keyboard routing.
//!
//! A press goes to the topmost visible widget under the pointer and captures
//! the pointer for that widget until release, so drags keep reaching it even
//! outside its rectangle. Keys go to the focused entry only. Every event is
//! handled to completion, callbacks included, before the next one starts.

use std::time::Instant;

use softgui_core::geometry::{Pos, Rect};
use softgui_core::profiling::profile_function;

use crate::host::UiCore;
use crate::widget::{
    EventCx, Notification, WidgetBase, WidgetHandle, WidgetId, WidgetKind,
};
use crate::widgets::Entry;

/// Keyboard input understood by the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
    Enter,
}

impl KeyInput {
    /// Maps a character, turning the classic control characters into keys.
    pub fn from_char(ch: char) -> Self {
        match ch {
            '\u{8}' => KeyInput::Backspace,
            '\u{7f}' => KeyInput::Delete,
            '\r' | '\n' => KeyInput::Enter,
            ch => KeyInput::Char(ch),
        }
    }
}

impl UiCore {
    /// Topmost visible widget whose hit area contains `pos`.
    ///
    /// Frames are never targets themselves; their children are searched in
    /// place of the frame. An open drop-down list sits above everything.
    pub fn hit_test(&self, pos: Pos<i32>) -> Option<WidgetId> {
        if let Some(popup) = self.popup
            && self.hit_rect(popup).is_some_and(|rect| rect.contains(pos))
        {
            return Some(popup);
        }
        self.tree
            .top_level()
            .iter()
            .rev()
            .find_map(|&id| self.hit_node(id, pos))
    }

    fn hit_node(&self, id: WidgetId, pos: Pos<i32>) -> Option<WidgetId> {
        let node = self.tree.node(id)?;
        if !node.base.visible {
            return None;
        }
        if node.kind.is_frame() {
            return node
                .kind
                .children()
                .iter()
                .rev()
                .find_map(|&child| self.hit_node(child, pos));
        }
        node.kind
            .as_widget()
            .hit_rect(&node.base)
            .contains(pos)
            .then_some(id)
    }

    fn hit_rect(&self, id: WidgetId) -> Option<Rect<i32>> {
        let node = self.tree.node(id)?;
        Some(node.kind.as_widget().hit_rect(&node.base))
    }

    /// Runs a widget handler and collects what it wants reported.
    fn run_handler<F>(&mut self, id: WidgetId, handler: F) -> Vec<Notification>
    where
        F: FnOnce(&mut WidgetKind, &mut WidgetBase, &mut EventCx<'_>),
    {
        let Some(node) = self.tree.node_mut(id) else {
            return Vec::new();
        };
        let mut cx = EventCx::new(self.text.as_mut(), &self.config, Instant::now());
        handler(&mut node.kind, &mut node.base, &mut cx);
        let notifications = cx.into_notifications();
        self.tree.propagate_dirty(id);
        notifications
    }

    /// Primary button pressed at `pos` (window pixels).
    ///
    /// Returns true if a widget was hit.
    pub fn pointer_down(&mut self, pos: Pos<i32>) -> bool {
        profile_function!();
        if let Some(popup) = self.popup
            && !self.hit_rect(popup).is_some_and(|rect| rect.contains(pos))
        {
            self.close_popup();
            self.request_repaint();
        }

        let Some(target) = self.hit_test(pos) else {
            tracing::trace!("press at {:?} hit nothing", pos);
            return false;
        };
        let Some(local) = self.cursor_local(target, pos) else {
            return false;
        };
        let is_entry = self.tree.kind(target).is_some_and(WidgetKind::is_entry);
        tracing::trace!("press at {:?} -> {:?}", pos, target);

        if let Some(previous) = self.focused
            && previous != target
        {
            self.blur_entry(previous);
        }

        let notifications = self.run_handler(target, |kind, base, cx| {
            kind.as_widget_mut().pointer_down(base, local, cx);
        });
        self.tree.enforce_radio_group(target);
        if let Some(WidgetKind::ComboBox(combo)) = self.tree.kind(target)
            && combo.is_expanded()
        {
            self.popup = Some(target);
        }
        self.tree.dispatch(target, &notifications);

        if is_entry {
            self.focus_entry(target);
        }
        tracing::debug!("capture -> {:?}", target);
        self.capture = Some(target);
        self.request_repaint();
        true
    }

    /// Pointer moved to `pos`. Only the captured widget hears about it.
    pub fn pointer_move(&mut self, pos: Pos<i32>) -> bool {
        let Some(target) = self.capture else {
            return false;
        };
        let Some(local) = self.cursor_local(target, pos) else {
            self.capture = None;
            return false;
        };
        let notifications = self.run_handler(target, |kind, base, cx| {
            if let Some(draggable) = kind.as_draggable_mut() {
                draggable.drag(base, local, cx);
            }
        });
        self.tree.dispatch(target, &notifications);
        if self.tree.is_dirty(target) {
            self.request_repaint();
        }
        true
    }

    /// Primary button released at `pos`. Ends pointer capture.
    pub fn pointer_up(&mut self, pos: Pos<i32>) -> bool {
        let Some(target) = self.capture.take() else {
            return false;
        };
        tracing::debug!("capture released by {:?}", target);
        let Some(local) = self.cursor_local(target, pos) else {
            return false;
        };
        let notifications = self.run_handler(target, |kind, base, cx| {
            if let Some(draggable) = kind.as_draggable_mut() {
                draggable.release(base, local, cx);
            }
        });
        if self.popup == Some(target)
            && !matches!(self.tree.kind(target), Some(WidgetKind::ComboBox(combo)) if combo.is_expanded())
        {
            self.popup = None;
        }
        self.tree.dispatch(target, &notifications);
        self.request_repaint();
        true
    }

    /// Delivers a key to the focused entry. Returns false if nothing has focus.
    pub fn key_input(&mut self, key: KeyInput) -> bool {
        let Some(entry) = self.focused else {
            tracing::trace!("{:?} dropped: no focused entry", key);
            return false;
        };
        let notifications = self.run_handler(entry, |kind, base, cx| {
            kind.as_widget_mut().key(base, key, cx);
        });
        let still_focused = self
            .tree
            .get(WidgetHandle::<Entry>::new(entry))
            .is_some_and(Entry::is_focused);
        self.tree.dispatch(entry, &notifications);

        if !still_focused && self.focused == Some(entry) {
            self.focused = None;
            self.tree.dispatch(entry, &[Notification::Focus(false)]);
        }
        self.request_repaint();
        true
    }

    /// Feeds every character of `text` as key input.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.key_input(KeyInput::from_char(ch));
        }
    }
}
