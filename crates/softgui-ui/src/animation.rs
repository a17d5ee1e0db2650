//! Periodic animation tick.
//!
//! The host calls [`UiCore::tick`] once per `tick_interval`. Sliders ease
//! toward their targets and publish integer value changes; entries need the
//! tick only to keep the caret blinking.

use softgui_core::profiling::profile_function;

use crate::host::UiCore;
use crate::dirty::DirtyFlags;
use crate::widget::{Notification, WidgetKind};

impl UiCore {
    /// Advances every animation by one step.
    ///
    /// Returns true when a repaint is wanted: something moved, or an entry
    /// exists whose caret may need to blink.
    pub fn tick(&mut self) -> bool {
        profile_function!();
        let ids: Vec<_> = self.tree.ids().collect();
        let mut moved = false;
        let mut has_entry = false;

        for id in ids {
            let Some(node) = self.tree.node_mut(id) else {
                continue;
            };
            if matches!(node.kind, WidgetKind::Entry(_)) {
                has_entry = true;
                continue;
            }
            let Some(animatable) = node.kind.as_animatable_mut() else {
                continue;
            };
            let outcome = animatable.tick(&self.config);
            if outcome.moved {
                moved = true;
                self.tree.mark_dirty(id, DirtyFlags::PAINT);
            }
            if outcome.value_changed {
                self.tree.dispatch(id, &[Notification::ValueChanged]);
            }
        }

        let repaint = moved || has_entry;
        if repaint {
            self.request_repaint();
        }
        repaint
    }

    /// True while some widget is still easing toward its target.
    pub fn is_animating(&self) -> bool {
        self.tree.ids().any(|id| {
            self.tree
                .kind(id)
                .and_then(WidgetKind::as_animatable)
                .is_some_and(|animatable| !animatable.is_settled())
        })
    }
}
