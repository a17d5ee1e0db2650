//! Optional widget behaviors.
//!
//! Only some variants animate or follow a dragging pointer. The runtime asks a
//! [`WidgetKind`](super::WidgetKind) for these capabilities instead of giving
//! every widget empty implementations.

use softgui_core::geometry::Pos;

use super::{EventCx, WidgetBase};
use crate::UiConfig;

/// Result of advancing an animation by one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Animated state moved; the widget needs repainting.
    pub moved: bool,
    /// The published integer value changed.
    pub value_changed: bool,
}

/// Widgets with state that eases toward a target over several ticks.
pub trait Animatable {
    fn tick(&mut self, config: &UiConfig) -> TickOutcome;

    /// True once no further tick will move the widget.
    fn is_settled(&self) -> bool;
}

/// Widgets that keep reacting while they hold pointer capture.
pub trait Draggable {
    /// Pointer moved while captured. `local` may lie outside the widget.
    fn drag(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>);

    /// Pointer released; capture ends after this call.
    fn release(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>);
}
