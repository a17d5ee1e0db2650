//! Headless widget runtime.
//!
//! [`UiCore`] owns the widget tree plus the per-window interaction state
//! (keyboard focus, pointer capture, the open drop-down) and the text backend.
//! It has no window of its own: the windowed [`Window`](crate::Window) feeds
//! it events and frames, and tests drive it directly.

use std::time::Instant;

use softgui_core::geometry::{Pos, Size};
use softgui_render::{FixedMetrics, TextBackend};

use crate::dirty::DirtyFlags;
use crate::layout::{self, PackOptions, Placement};
use crate::theme::Palette;
use crate::tree::WidgetTree;
use crate::widget::{Notification, WidgetBase, WidgetHandle, WidgetId, WidgetVariant};
use crate::widgets::{
    Button, Canvas, Checkbox, ComboBox, Entry, Frame, Label, ListBox, Orientation, RadioButton,
    SelectionMode, Slider,
};
use crate::UiConfig;

pub struct UiCore {
    pub(crate) tree: WidgetTree,
    pub(crate) config: UiConfig,
    pub(crate) palette: Palette,
    pub(crate) text: Box<dyn TextBackend>,
    pub(crate) viewport: Size<u32>,
    pub(crate) focused: Option<WidgetId>,
    pub(crate) capture: Option<WidgetId>,
    pub(crate) popup: Option<WidgetId>,
    pub(crate) repaint_requested: bool,
}

impl UiCore {
    pub fn new(config: UiConfig, text: Box<dyn TextBackend>) -> Self {
        Self {
            tree: WidgetTree::new(),
            config,
            palette: Palette::default(),
            text,
            viewport: Size::new(0, 0),
            focused: None,
            capture: None,
            popup: None,
            repaint_requested: true,
        }
    }

    /// Default configuration with fixed-advance text metrics.
    pub fn headless(width: u32, height: u32) -> Self {
        Self::new(UiConfig::default(), Box::new(FixedMetrics::default()))
            .with_viewport(Size::new(width, height))
    }

    pub fn with_viewport(mut self, viewport: Size<u32>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn viewport(&self) -> Size<u32> {
        self.viewport
    }

    /// The entry holding keyboard focus.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// The widget receiving pointer moves until the button is released.
    pub fn captured(&self) -> Option<WidgetId> {
        self.capture
    }

    /// The drop-down whose list is currently open.
    pub fn open_popup(&self) -> Option<WidgetId> {
        self.popup
    }

    pub fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    pub fn needs_repaint(&self) -> bool {
        self.repaint_requested || self.tree.any_dirty()
    }

    /// Returns and clears the pending repaint request.
    pub fn take_repaint_request(&mut self) -> bool {
        let requested = self.needs_repaint();
        self.repaint_requested = false;
        requested
    }

    fn create<T: WidgetVariant>(&mut self, widget: T, text: &str, size: Size<i32>) -> WidgetHandle<T> {
        self.tree.insert(widget, WidgetBase::new(text, size))
    }

    pub fn create_label(&mut self, text: &str) -> WidgetHandle<Label> {
        self.create(Label::new(), text, self.config.default_size)
    }

    pub fn create_button(&mut self, text: &str) -> WidgetHandle<Button> {
        self.create(Button::new(), text, self.config.default_size)
    }

    pub fn create_entry(&mut self) -> WidgetHandle<Entry> {
        self.create(Entry::new(Instant::now()), "", self.config.default_size)
    }

    /// Canvas whose widget size matches its pixel buffer.
    pub fn create_canvas(&mut self, width: u32, height: u32) -> WidgetHandle<Canvas> {
        let size = Size::new(
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
        self.create(Canvas::new(Size::new(width, height)), "", size)
    }

    pub fn create_frame(&mut self) -> WidgetHandle<Frame> {
        self.create(Frame::new(), "", self.config.default_size)
    }

    pub fn create_checkbox(&mut self, text: &str) -> WidgetHandle<Checkbox> {
        self.create(Checkbox::new(), text, self.config.default_size)
    }

    pub fn create_radio_button(&mut self, text: &str, group: u32) -> WidgetHandle<RadioButton> {
        self.create(RadioButton::new(group), text, self.config.default_size)
    }

    pub fn create_hslider(&mut self, min: i32, max: i32) -> WidgetHandle<Slider> {
        self.create(Slider::new(Orientation::Horizontal, min, max), "", self.config.default_size)
    }

    pub fn create_vslider(&mut self, min: i32, max: i32) -> WidgetHandle<Slider> {
        let size = Size::new(self.config.default_size.height, self.config.default_size.width);
        self.create(Slider::new(Orientation::Vertical, min, max), "", size)
    }

    pub fn create_listbox<I, S>(&mut self, items: I) -> WidgetHandle<ListBox>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = ListBox::with_items(SelectionMode::Single, items);
        self.create(list, "", self.config.default_size)
    }

    pub fn create_multi_listbox<I, S>(&mut self, items: I) -> WidgetHandle<ListBox>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = ListBox::with_items(SelectionMode::Multiple, items);
        self.create(list, "", self.config.default_size)
    }

    pub fn create_combobox<I, S>(&mut self, items: I) -> WidgetHandle<ComboBox>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.create(ComboBox::new(items), "", self.config.default_size)
    }

    /// Registers a widget for painting and hit testing at the top level.
    pub fn add_child(&mut self, id: impl Into<WidgetId>) -> bool {
        let added = self.tree.register_top_level(id.into());
        if added {
            self.request_repaint();
        }
        added
    }

    pub fn add_to_frame(&mut self, frame: WidgetHandle<Frame>, child: impl Into<WidgetId>) -> bool {
        let added = self.tree.add_to_frame(frame, child);
        if added {
            self.request_repaint();
        }
        added
    }

    /// Hands a widget's position to the pack layout and lays out immediately.
    ///
    /// Packing also registers the widget at the top level, taking it out of
    /// any frame.
    pub fn pack(&mut self, id: impl Into<WidgetId>, options: PackOptions) {
        let id = id.into();
        if !self.tree.register_top_level(id) {
            tracing::warn!("pack: unknown widget {:?}", id);
            return;
        }
        if let Some(node) = self.tree.node_mut(id) {
            node.base.placement = Placement::Packed(options);
        }
        self.layout();
    }

    /// Moves a widget to an explicit window position, taking it out of the pack layout.
    pub fn place(&mut self, id: impl Into<WidgetId>, x: i32, y: i32) {
        let id = id.into();
        let Some(node) = self.tree.node_mut(id) else {
            return;
        };
        node.base.placement = Placement::Placed;
        node.base.rect.x = x;
        node.base.rect.y = y;
        self.tree.mark_dirty(id, DirtyFlags::LAYOUT);
        self.request_repaint();
    }

    pub fn set_size(&mut self, id: impl Into<WidgetId>, width: i32, height: i32) {
        self.tree.set_size(id, Size::new(width, height));
        self.request_repaint();
    }

    /// Natural size of a widget's content as reported by its variant.
    pub fn measure(&mut self, id: impl Into<WidgetId>) -> Option<Size<i32>> {
        let node = self.tree.node(id)?;
        Some(node.kind.as_widget().measure(&node.base, self.text.as_mut()))
    }

    /// Resizes a widget to its natural size.
    pub fn size_to_content(&mut self, id: impl Into<WidgetId>) {
        let id = id.into();
        let Some(measured) = self.measure(id) else {
            return;
        };
        let size = layout::content_size(measured, self.config.default_size);
        if let Some(rect) = self.tree.rect(id) {
            self.tree.set_rect(id, layout::with_size(rect, size));
        }
    }

    /// Recomputes the rectangles of every packed widget.
    pub fn layout(&mut self) {
        layout::pack(&mut self.tree, self.viewport, &self.config);
        self.request_repaint();
    }

    /// New window size: re-layout and repaint.
    pub fn resize(&mut self, viewport: Size<u32>) {
        if self.viewport == viewport {
            return;
        }
        tracing::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.layout();
    }

    pub fn get<T: WidgetVariant>(&self, handle: WidgetHandle<T>) -> Option<&T> {
        self.tree.get(handle)
    }

    pub fn update<T: WidgetVariant, R>(
        &mut self,
        handle: WidgetHandle<T>,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        self.tree.update(handle, f)
    }

    pub fn text(&self, id: impl Into<WidgetId>) -> Option<&str> {
        self.tree.text(id)
    }

    pub fn set_text(&mut self, id: impl Into<WidgetId>, text: impl Into<String>) {
        self.tree.set_text(id, text);
    }

    pub fn set_visible(&mut self, id: impl Into<WidgetId>, visible: bool) {
        self.tree.set_visible(id, visible);
    }

    pub fn on_click(
        &mut self,
        id: impl Into<WidgetId>,
        callback: impl FnMut(&mut WidgetTree, WidgetId) + 'static,
    ) {
        self.tree.on_click(id, callback);
    }

    pub fn on_key(
        &mut self,
        id: impl Into<WidgetId>,
        callback: impl FnMut(&mut WidgetTree, WidgetId, char) + 'static,
    ) {
        self.tree.on_key(id, callback);
    }

    pub fn on_focus(
        &mut self,
        id: impl Into<WidgetId>,
        callback: impl FnMut(&mut WidgetTree, WidgetId, bool) + 'static,
    ) {
        self.tree.on_focus(id, callback);
    }

    pub fn on_change(
        &mut self,
        id: impl Into<WidgetId>,
        callback: impl FnMut(&mut WidgetTree, WidgetId) + 'static,
    ) {
        self.tree.on_change(id, callback);
    }

    /// Moves keyboard focus to `entry`, or clears it.
    pub fn set_focus(&mut self, entry: Option<WidgetHandle<Entry>>) {
        match entry {
            Some(entry) => self.focus_entry(entry.id()),
            None => {
                if let Some(current) = self.focused {
                    self.blur_entry(current);
                }
            }
        }
    }

    fn entry_mut(&mut self, id: WidgetId) -> Option<&mut Entry> {
        self.tree
            .node_mut(id)
            .and_then(|node| Entry::from_kind_mut(&mut node.kind))
    }

    pub(crate) fn focus_entry(&mut self, id: WidgetId) {
        if self.focused == Some(id) {
            return;
        }
        let now = Instant::now();
        let Some(entry) = self.entry_mut(id) else {
            return;
        };
        entry.editor_mut().set_focused(true, now);
        if let Some(previous) = self.focused {
            self.blur_entry(previous);
        }
        tracing::debug!("focus -> {:?}", id);
        self.focused = Some(id);
        self.tree.mark_dirty(id, DirtyFlags::PAINT);
        self.tree.dispatch(id, &[Notification::Focus(true)]);
    }

    pub(crate) fn blur_entry(&mut self, id: WidgetId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
        let now = Instant::now();
        if let Some(entry) = self.entry_mut(id) {
            entry.editor_mut().set_focused(false, now);
        }
        tracing::debug!("focus lost by {:?}", id);
        self.tree.mark_dirty(id, DirtyFlags::PAINT);
        self.tree.dispatch(id, &[Notification::Focus(false)]);
    }

    /// Closes the open drop-down without committing anything.
    pub(crate) fn close_popup(&mut self) {
        let Some(id) = self.popup.take() else {
            return;
        };
        if let Some(combo) = self
            .tree
            .node_mut(id)
            .and_then(|node| ComboBox::from_kind_mut(&mut node.kind))
        {
            combo.collapse();
        }
        if self.capture == Some(id) {
            self.capture = None;
        }
        self.tree.mark_dirty(id, DirtyFlags::PAINT);
    }

    pub(crate) fn cursor_local(&self, id: WidgetId, pos: Pos<i32>) -> Option<Pos<i32>> {
        self.tree.rect(id).map(|rect| rect.to_local(pos))
    }
}
