use softgui_core::geometry::{Pos, Rect};

use crate::UiConfig;
use crate::widget::{
    Animatable, Draggable, EventCx, Notification, PaintCx, TickOutcome, Widget, WidgetBase,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    /// The top end of the track is the maximum.
    Vertical,
}

/// Integer slider whose thumb eases toward the last pointer position.
///
/// `target` is where the pointer put the thumb, `current` is where the thumb is
/// drawn, and `value` is the last integer published to callbacks.
#[derive(Debug)]
pub struct Slider {
    orientation: Orientation,
    min: i32,
    max: i32,
    value: i32,
    current: f64,
    target: f64,
}

impl Slider {
    pub fn new(orientation: Orientation, min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            orientation,
            min,
            max,
            value: min,
            current: min as f64,
            target: min as f64,
        }
    }

    pub fn horizontal(min: i32, max: i32) -> Self {
        Self::new(Orientation::Horizontal, min, max)
    }

    pub fn vertical(min: i32, max: i32) -> Self {
        Self::new(Orientation::Vertical, min, max)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// The last published integer value.
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Jumps straight to `value` without animating or notifying.
    pub fn set_value(&mut self, value: i32) {
        let value = value.clamp(self.min, self.max);
        self.value = value;
        self.current = value as f64;
        self.target = value as f64;
    }

    /// Starts easing toward `target`. Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        self.target = target.clamp(self.min as f64, self.max as f64);
    }

    /// Changes the range, clamping every position into it.
    pub fn set_range(&mut self, min: i32, max: i32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min = min;
        self.max = max;
        self.value = self.value.clamp(min, max);
        self.current = self.current.clamp(min as f64, max as f64);
        self.target = self.target.clamp(min as f64, max as f64);
    }

    fn span(&self) -> f64 {
        (self.max - self.min) as f64
    }

    /// Maps a widget-local pointer position to a value in `[min, max]`.
    pub fn value_at(&self, rect: Rect<i32>, local: Pos<i32>, padding: i32) -> f64 {
        let (offset, length) = match self.orientation {
            Orientation::Horizontal => (local.x - padding, rect.width - 2 * padding),
            Orientation::Vertical => (local.y - padding, rect.height - 2 * padding),
        };
        let mut t = (offset as f64 / length.max(1) as f64).clamp(0.0, 1.0);
        if self.orientation == Orientation::Vertical {
            t = 1.0 - t;
        }
        self.min as f64 + t * self.span()
    }

    /// Moves the thumb onto the target. Returns true if the published value changed.
    pub(crate) fn snap_to_target(&mut self) -> bool {
        self.current = self.target;
        self.publish()
    }

    fn publish(&mut self) -> bool {
        let value = self.current.round() as i32;
        let changed = value != self.value;
        self.value = value;
        changed
    }

    fn thumb_center(&self, rect: Rect<i32>, padding: i32) -> Pos<f32> {
        let t = if self.span() > 0.0 {
            ((self.current - self.min as f64) / self.span()).clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self.orientation {
            Orientation::Horizontal => {
                let length = (rect.width - 2 * padding).max(0) as f64;
                Pos::new(
                    (rect.x as f64 + padding as f64 + t * length) as f32,
                    rect.y as f32 + rect.height as f32 / 2.0,
                )
            }
            Orientation::Vertical => {
                let length = (rect.height - 2 * padding).max(0) as f64;
                Pos::new(
                    rect.x as f32 + rect.width as f32 / 2.0,
                    (rect.y as f64 + padding as f64 + (1.0 - t) * length) as f32,
                )
            }
        }
    }
}

impl Widget for Slider {
    fn debug_name(&self) -> &'static str {
        "Slider"
    }

    fn render(&self, base: &WidgetBase, cx: &mut PaintCx<'_>) {
        let rect = base.rect;
        let padding = cx.config.slider_padding;
        cx.surface.fill_rect(rect, cx.palette.window);

        let (from, to) = match self.orientation {
            Orientation::Horizontal => {
                let y = rect.y as f32 + rect.height as f32 / 2.0;
                (
                    Pos::new((rect.x + padding) as f32, y),
                    Pos::new((rect.right() - padding) as f32, y),
                )
            }
            Orientation::Vertical => {
                let x = rect.x as f32 + rect.width as f32 / 2.0;
                (
                    Pos::new(x, (rect.y + padding) as f32),
                    Pos::new(x, (rect.bottom() - padding) as f32),
                )
            }
        };
        cx.surface.draw_line(from, to, 3.0, cx.palette.shadow);

        let center = self.thumb_center(rect, padding);
        let radius = (padding as f32 - 1.0).max(2.0);
        cx.surface.fill_circle(center, radius, cx.palette.accent);
        cx.surface.stroke_circle(center, radius, cx.palette.border);
    }

    fn pointer_down(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>) {
        let target = self.value_at(base.rect, local, cx.config().slider_padding);
        self.set_target(target);
        base.mark_dirty();
    }
}

impl Animatable for Slider {
    fn tick(&mut self, config: &UiConfig) -> TickOutcome {
        let diff = self.target - self.current;
        if diff == 0.0 {
            return TickOutcome::default();
        }
        if diff.abs() <= config.epsilon {
            self.current = self.target;
        } else {
            let next = self.current + diff * config.smoothing;
            let remaining = self.target - next;
            // never overshoot, and land exactly once close enough
            if remaining.signum() != diff.signum() || remaining.abs() <= config.epsilon {
                self.current = self.target;
            } else {
                self.current = next;
            }
        }
        TickOutcome {
            moved: true,
            value_changed: self.publish(),
        }
    }

    fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

impl Draggable for Slider {
    fn drag(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>) {
        let target = self.value_at(base.rect, local, cx.config().slider_padding);
        self.set_target(target);
        base.mark_dirty();
    }

    fn release(&mut self, base: &mut WidgetBase, local: Pos<i32>, cx: &mut EventCx<'_>) {
        let target = self.value_at(base.rect, local, cx.config().slider_padding);
        self.set_target(target);
        if self.snap_to_target() {
            cx.emit(Notification::ValueChanged);
        }
        base.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(slider: &mut Slider, config: &UiConfig) -> (usize, usize) {
        let mut ticks = 0;
        let mut changes = 0;
        while !slider.is_settled() {
            let outcome = slider.tick(config);
            ticks += 1;
            if outcome.value_changed {
                changes += 1;
            }
            assert!(ticks < 1000, "slider never settled");
        }
        (ticks, changes)
    }

    #[test]
    fn test_value_at_horizontal() {
        let slider = Slider::horizontal(0, 100);
        let rect = Rect::new(0, 0, 116, 24);
        assert_eq!(slider.value_at(rect, Pos::new(88, 12), 8), 80.0);
        assert_eq!(slider.value_at(rect, Pos::new(-40, 12), 8), 0.0);
        assert_eq!(slider.value_at(rect, Pos::new(400, 12), 8), 100.0);
    }

    #[test]
    fn test_value_at_vertical_top_is_max() {
        let slider = Slider::vertical(0, 10);
        let rect = Rect::new(0, 0, 24, 116);
        assert_eq!(slider.value_at(rect, Pos::new(12, 8), 8), 10.0);
        assert_eq!(slider.value_at(rect, Pos::new(12, 108), 8), 0.0);
    }

    #[test]
    fn test_degenerate_track_does_not_divide_by_zero() {
        let slider = Slider::horizontal(0, 100);
        let rect = Rect::new(0, 0, 10, 24);
        let value = slider.value_at(rect, Pos::new(9, 0), 8);
        assert!(value.is_finite());
        assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn test_tick_eases_and_converges() {
        let config = UiConfig::default();
        let mut slider = Slider::horizontal(0, 100);
        slider.set_target(80.0);

        let first = slider.tick(&config);
        assert!(first.moved);
        assert!((slider.current() - 16.0).abs() < 1e-9);

        let (_, _) = settle(&mut slider, &config);
        assert_eq!(slider.current(), 80.0);
        assert_eq!(slider.value(), 80);
        assert_eq!(slider.tick(&config), TickOutcome::default());
    }

    #[test]
    fn test_tick_publishes_each_integer_change_once() {
        let config = UiConfig::default();
        let mut slider = Slider::horizontal(0, 100);
        slider.set_target(3.0);
        let mut seen = Vec::new();
        while !slider.is_settled() {
            if slider.tick(&config).value_changed {
                seen.push(slider.value());
            }
        }
        let mut deduped = seen.clone();
        deduped.dedup();
        assert_eq!(seen, deduped);
        assert_eq!(seen.last(), Some(&3));
    }

    #[test]
    fn test_set_value_is_immediate() {
        let config = UiConfig::default();
        let mut slider = Slider::horizontal(0, 10);
        slider.set_value(7);
        assert_eq!(slider.value(), 7);
        assert!(slider.is_settled());
        assert!(!slider.tick(&config).moved);
        slider.set_value(99);
        assert_eq!(slider.value(), 10);
    }

    #[test]
    fn test_set_range_clamps() {
        let mut slider = Slider::horizontal(0, 100);
        slider.set_value(90);
        slider.set_range(50, 0);
        assert_eq!((slider.min(), slider.max()), (0, 50));
        assert_eq!(slider.value(), 50);
        assert_eq!(slider.target(), 50.0);
    }

    #[test]
    fn test_non_finite_target_is_ignored() {
        let config = UiConfig::default();
        let mut slider = Slider::horizontal(10, 20);
        slider.set_target(15.0);
        for target in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            slider.set_target(target);
            assert_eq!(slider.target(), 15.0);
        }

        for _ in 0..200 {
            slider.tick(&config);
        }
        assert!(slider.is_settled());
        assert_eq!(slider.value(), 15);
        assert!(!slider.tick(&config).moved);
    }
}
