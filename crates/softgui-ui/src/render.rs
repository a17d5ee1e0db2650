//! Frame painting.
//!
//! A frame is the window background, then every visible top-level widget in
//! registration order (frames paint their children in place), then overlays
//! such as an open drop-down list. All of it goes into the compositor's back
//! buffer and is presented in one piece.

use std::time::Instant;

use softgui_core::profiling::{profile_function, profile_scope};
use softgui_render::compositor::FrameOutcome;
use softgui_render::{Compositor, Present, RenderError, Surface};

use crate::host::UiCore;
use crate::tree::WidgetTree;
use crate::widget::{PaintCx, WidgetId};

impl UiCore {
    /// Paints a complete frame into `surface` and clears all dirty flags.
    pub fn paint(&mut self, surface: &mut Surface, now: Instant) {
        profile_function!();
        if self.tree.needs_layout() {
            self.layout();
        }
        surface.clear(self.palette.window);

        let mut cx = PaintCx {
            surface,
            text: self.text.as_mut(),
            palette: &self.palette,
            config: &self.config,
            now,
        };
        {
            profile_scope!("widgets");
            for &id in self.tree.top_level() {
                paint_node(&self.tree, id, &mut cx);
            }
        }
        if let Some(popup) = self.popup
            && let Some(node) = self.tree.node(popup)
            && node.base.visible
        {
            profile_scope!("overlay");
            node.kind.as_widget().render_overlay(&node.base, &mut cx);
        }

        self.tree.clear_dirty();
        self.repaint_requested = false;
    }

    /// Composes a frame off-screen and presents it.
    ///
    /// A zero-sized window skips the frame. Errors leave the UI untouched so
    /// the next frame can try again.
    pub fn render_frame(
        &mut self,
        compositor: &mut Compositor,
        presenter: &mut dyn Present,
        now: Instant,
    ) -> Result<FrameOutcome, RenderError> {
        let viewport = self.viewport;
        let outcome = compositor.compose(viewport, presenter, |surface| self.paint(surface, now))?;
        if outcome == FrameOutcome::Skipped {
            tracing::trace!("skipping frame for empty viewport");
        }
        Ok(outcome)
    }
}

fn paint_node(tree: &WidgetTree, id: WidgetId, cx: &mut PaintCx<'_>) {
    let Some(node) = tree.node(id) else {
        return;
    };
    if !node.base.visible {
        return;
    }
    node.kind.as_widget().render(&node.base, cx);
    for &child in node.kind.children() {
        paint_node(tree, child, cx);
    }
}
