use std::time::Duration;

use softgui_core::geometry::Size;

/// Tunables of the widget runtime.
///
/// The defaults reproduce the classic look and feel: a ~60 Hz animation tick,
/// a 20% exponential approach for sliders and a 500 ms caret blink.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Period of the animation tick.
    pub tick_interval: Duration,
    /// Fraction of the remaining distance a slider covers per tick.
    pub smoothing: f64,
    /// Distance below which a slider snaps onto its target.
    pub epsilon: f64,
    /// Caret on/off phase length.
    pub blink_interval: Duration,
    /// Distance of packed widgets from the window edge.
    pub layout_margin: i32,
    /// Gap between consecutive packed widgets.
    pub layout_gap: i32,
    /// Size given to widgets whose size was never set.
    pub default_size: Size<i32>,
    pub list_row_height: i32,
    /// Horizontal (or vertical) inset of a slider track.
    pub slider_padding: i32,
    /// Left inset of the text inside an entry.
    pub entry_inset: i32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            smoothing: 0.20,
            epsilon: 0.01,
            blink_interval: Duration::from_millis(500),
            layout_margin: 10,
            layout_gap: 8,
            default_size: Size::new(100, 24),
            list_row_height: 20,
            slider_padding: 8,
            entry_inset: 4,
        }
    }
}

impl UiConfig {
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing.clamp(f64::EPSILON, 1.0);
        self
    }

    pub fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.blink_interval = interval;
        self
    }

    pub fn with_layout_spacing(mut self, margin: i32, gap: i32) -> Self {
        self.layout_margin = margin;
        self.layout_gap = gap;
        self
    }

    pub fn with_list_row_height(mut self, height: i32) -> Self {
        self.list_row_height = height.max(1);
        self
    }
}
