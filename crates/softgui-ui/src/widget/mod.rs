//! The widget model.
//!
//! Every widget is a [`WidgetNode`]: shared [`WidgetBase`] state (rectangle,
//! visibility, text, font, dirty flags) plus one [`WidgetKind`] variant that
//! holds the kind-specific state and behavior.

mod capability;
mod handle;

use std::time::Instant;

pub use capability::{Animatable, Draggable, TickOutcome};
pub use handle::WidgetHandle;

use softgui_core::geometry::{Pos, Rect, Size};
use softgui_render::{Color, FontDescriptor, Surface, TextBackend};

use crate::callbacks::CallbackSlots;
use crate::dirty::DirtyFlags;
use crate::input::KeyInput;
use crate::layout::Placement;
use crate::theme::Palette;
use crate::widgets::{
    Button, Canvas, Checkbox, ComboBox, Entry, Frame, Label, ListBox, RadioButton, Slider,
};
use crate::UiConfig;

/// Stable identifier of a widget within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// State every widget has regardless of its kind.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    /// Position and size in window coordinates.
    pub rect: Rect<i32>,
    pub visible: bool,
    pub text: String,
    pub font: FontDescriptor,
    pub(crate) dirty: DirtyFlags,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) placement: Placement,
}

impl WidgetBase {
    pub fn new(text: impl Into<String>, size: Size<i32>) -> Self {
        Self {
            rect: Rect::new(0, 0, size.width, size.height),
            visible: true,
            text: text.into(),
            font: FontDescriptor::default(),
            dirty: DirtyFlags::NEW,
            parent: None,
            placement: Placement::Placed,
        }
    }

    /// Requests a repaint of this widget.
    pub fn mark_dirty(&mut self) {
        self.dirty |= DirtyFlags::PAINT;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.needs_paint()
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// The frame this widget was added to, if any.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }
}

/// Something a widget handler wants the host to tell the application about.
///
/// Handlers only record notifications; the host invokes the matching
/// callbacks once the handler has returned, in the recorded order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Click,
    Key(char),
    /// Keyboard focus gained (`true`) or lost (`false`).
    Focus(bool),
    ValueChanged,
}

/// Context handed to pointer and key handlers.
pub struct EventCx<'a> {
    text: &'a mut dyn TextBackend,
    config: &'a UiConfig,
    now: Instant,
    notifications: Vec<Notification>,
}

impl<'a> EventCx<'a> {
    pub(crate) fn new(text: &'a mut dyn TextBackend, config: &'a UiConfig, now: Instant) -> Self {
        Self {
            text,
            config,
            now,
            notifications: Vec::new(),
        }
    }

    pub fn emit(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn text(&mut self) -> &mut dyn TextBackend {
        self.text
    }

    pub fn config(&self) -> &UiConfig {
        self.config
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub(crate) fn into_notifications(self) -> Vec<Notification> {
        self.notifications
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Context handed to widget painters.
pub struct PaintCx<'a> {
    pub surface: &'a mut Surface,
    pub text: &'a mut dyn TextBackend,
    pub palette: &'a Palette,
    pub config: &'a UiConfig,
    /// Time of the frame being painted.
    pub now: Instant,
}

impl PaintCx<'_> {
    pub fn measure_text(&mut self, font: &FontDescriptor, text: &str) -> f32 {
        self.text.measure(font, text)
    }

    /// Draws a single line vertically centered in `rect`.
    pub fn draw_text(
        &mut self,
        font: &FontDescriptor,
        text: &str,
        rect: Rect<i32>,
        align: TextAlign,
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }
        let line_height = self.text.line_height(font);
        let y = rect.y as f32 + (rect.height as f32 - line_height) / 2.0;
        let x = match align {
            TextAlign::Left => rect.x as f32,
            TextAlign::Center => {
                let width = self.text.measure(font, text);
                rect.x as f32 + (rect.width as f32 - width) / 2.0
            }
        };
        self.text
            .draw(&mut *self.surface, font, text, Pos::new(x.floor(), y.floor()), color);
    }

    /// Raised (or sunken, when `pressed`) 3D frame around `rect`.
    pub fn bevel(&mut self, rect: Rect<i32>, pressed: bool) {
        let (light, dark) = if pressed {
            (self.palette.shadow, self.palette.highlight)
        } else {
            (self.palette.highlight, self.palette.shadow)
        };
        let (x0, y0) = (rect.x as f32 + 0.5, rect.y as f32 + 0.5);
        let (x1, y1) = (rect.right() as f32 - 0.5, rect.bottom() as f32 - 0.5);
        self.surface.draw_line(Pos::new(x0, y0), Pos::new(x1, y0), 1.0, light);
        self.surface.draw_line(Pos::new(x0, y0), Pos::new(x0, y1), 1.0, light);
        self.surface.draw_line(Pos::new(x0, y1), Pos::new(x1, y1), 1.0, dark);
        self.surface.draw_line(Pos::new(x1, y0), Pos::new(x1, y1), 1.0, dark);
    }
}

/// Behavior shared by every widget variant.
///
/// Handlers receive the widget's [`WidgetBase`] next to the variant state so
/// they can read geometry and flag themselves dirty.
pub trait Widget {
    fn debug_name(&self) -> &'static str;

    /// Area that receives pointer presses, in window coordinates.
    fn hit_rect(&self, base: &WidgetBase) -> Rect<i32> {
        base.rect
    }

    /// Natural size of the widget's content.
    fn measure(&self, base: &WidgetBase, text: &mut dyn TextBackend) -> Size<i32> {
        let _ = text;
        base.rect.size()
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>);

    /// Painted after every widget, on top of everything else.
    fn render_overlay(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        let _ = (base, cx);
    }

    /// Pointer pressed at `local`, relative to the widget origin.
    fn pointer_down(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>) {
        let _ = (base, local);
        cx.emit(Notification::Click);
    }

    fn key(&mut self, base: &mut WidgetBase, key: KeyInput, cx: &mut EventCx<'_>) {
        let _ = base;
        if let KeyInput::Char(ch) = key {
            cx.emit(Notification::Key(ch));
        }
    }
}

/// A concrete widget type stored inside [`WidgetKind`].
pub trait WidgetVariant: Widget + Sized + 'static {
    fn from_kind(kind: &WidgetKind) -> Option<&Self>;
    fn from_kind_mut(kind: &mut WidgetKind) -> Option<&mut Self>;
    fn into_kind(self) -> WidgetKind;
}

macro_rules! widget_kinds {
    ($($variant:ident),* $(,)?) => {
        /// Closed set of widget variants.
        #[derive(Debug)]
        pub enum WidgetKind {
            $($variant($variant),)*
        }

        impl WidgetKind {
            pub fn as_widget(&self) -> &dyn Widget {
                match self {
                    $(WidgetKind::$variant(widget) => widget,)*
                }
            }

            pub fn as_widget_mut(&mut self) -> &mut dyn Widget {
                match self {
                    $(WidgetKind::$variant(widget) => widget,)*
                }
            }
        }

        $(
            impl WidgetVariant for $variant {
                fn from_kind(kind: &WidgetKind) -> Option<&Self> {
                    match kind {
                        WidgetKind::$variant(widget) => Some(widget),
                        _ => None,
                    }
                }

                fn from_kind_mut(kind: &mut WidgetKind) -> Option<&mut Self> {
                    match kind {
                        WidgetKind::$variant(widget) => Some(widget),
                        _ => None,
                    }
                }

                fn into_kind(self) -> WidgetKind {
                    WidgetKind::$variant(self)
                }
            }
        )*
    };
}

widget_kinds!(
    Frame,
    Label,
    Entry,
    Button,
    Canvas,
    Checkbox,
    RadioButton,
    Slider,
    ListBox,
    ComboBox,
);

impl WidgetKind {
    pub fn as_animatable(&self) -> Option<&dyn Animatable> {
        match self {
            WidgetKind::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    pub fn as_animatable_mut(&mut self) -> Option<&mut dyn Animatable> {
        match self {
            WidgetKind::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    pub fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        match self {
            WidgetKind::Slider(slider) => Some(slider),
            WidgetKind::Button(button) => Some(button),
            WidgetKind::ComboBox(combo) => Some(combo),
            _ => None,
        }
    }

    /// Children of a frame, in paint order. Empty for other variants.
    pub fn children(&self) -> &[WidgetId] {
        match self {
            WidgetKind::Frame(frame) => frame.children(),
            _ => &[],
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, WidgetKind::Entry(_))
    }

    pub fn is_frame(&self) -> bool {
        matches!(self, WidgetKind::Frame(_))
    }
}

/// One widget as stored in the tree.
pub struct WidgetNode {
    pub base: WidgetBase,
    pub kind: WidgetKind,
    pub(crate) callbacks: CallbackSlots,
}

impl WidgetNode {
    pub(crate) fn new(base: WidgetBase, kind: WidgetKind) -> Self {
        Self {
            base,
            kind,
            callbacks: CallbackSlots::default(),
        }
    }

    pub fn debug_name(&self) -> &'static str {
        self.kind.as_widget().debug_name()
    }
}
