//! Animation scheduler tests.

use std::time::Instant;

use softgui_core::geometry::Size;
use softgui_render::Surface;
use softgui_test_utils::CallbackLog;
use softgui_ui::UiCore;

fn paint(ui: &mut UiCore) {
    let mut surface = Surface::new(Size::new(200, 100)).expect("surface");
    ui.paint(&mut surface, Instant::now());
}

fn settle(ui: &mut UiCore) -> usize {
    let mut ticks = 0;
    while ui.is_animating() {
        ui.tick();
        ticks += 1;
        assert!(ticks < 1000, "animation never settled");
    }
    ticks
}

#[test]
fn test_idle_tick_requests_nothing() {
    let mut ui = UiCore::headless(200, 100);
    let label = ui.create_label("static");
    ui.add_child(label);
    paint(&mut ui);

    assert!(!ui.tick());
    assert!(!ui.take_repaint_request());
}

#[test]
fn test_entries_keep_the_caret_blinking() {
    let mut ui = UiCore::headless(200, 100);
    let entry = ui.create_entry();
    ui.add_child(entry);
    paint(&mut ui);
    assert!(!ui.needs_repaint());

    assert!(ui.tick());
    assert!(ui.take_repaint_request());
}

#[test]
fn test_slider_publishes_each_integer_once_up_to_the_target() {
    let mut ui = UiCore::headless(200, 100);
    let slider = ui.create_hslider(0, 100);
    ui.add_child(slider);

    let log = CallbackLog::new();
    let recorder = log.clone();
    ui.on_change(slider, move |tree, _| {
        recorder.push(tree.get(slider).map(|s| s.value()).unwrap_or(-1));
    });

    ui.update(slider, |s| s.set_target(50.0));
    let ticks = settle(&mut ui);
    assert!(ticks > 1);

    let values = log.take();
    assert_eq!(values.last(), Some(&50));
    assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(ui.get(slider).map(|s| s.current()), Some(50.0));
}

#[test]
fn test_slider_never_overshoots_downward() {
    let mut ui = UiCore::headless(200, 100);
    let slider = ui.create_hslider(0, 100);
    ui.add_child(slider);
    ui.update(slider, |s| s.set_value(100));
    ui.update(slider, |s| s.set_target(0.0));

    let mut previous = 100.0;
    while ui.is_animating() {
        ui.tick();
        let current = ui.get(slider).map(|s| s.current()).unwrap_or(f64::NAN);
        assert!(current <= previous);
        assert!(current >= 0.0);
        previous = current;
    }
    assert_eq!(ui.get(slider).map(|s| s.value()), Some(0));
}

#[test]
fn test_settled_slider_stops_requesting_frames() {
    let mut ui = UiCore::headless(200, 100);
    let slider = ui.create_hslider(0, 10);
    ui.add_child(slider);
    ui.update(slider, |s| s.set_target(10.0));
    assert!(ui.tick());

    settle(&mut ui);
    assert!(!ui.tick());
}

#[test]
fn test_set_value_is_silent() {
    let mut ui = UiCore::headless(200, 100);
    let slider = ui.create_hslider(0, 10);
    ui.add_child(slider);

    let log = CallbackLog::new();
    let recorder = log.clone();
    ui.on_change(slider, move |_, _| recorder.push(()));

    ui.update(slider, |s| s.set_value(7));
    for _ in 0..10 {
        ui.tick();
    }
    assert!(log.is_empty());
    assert_eq!(ui.get(slider).map(|s| s.value()), Some(7));
}

#[test]
fn test_value_change_callback_can_read_the_tree() {
    let mut ui = UiCore::headless(200, 100);
    let slider = ui.create_vslider(0, 4);
    let label = ui.create_label("0");
    ui.add_child(slider);
    ui.add_child(label);

    ui.on_change(slider, move |tree, _| {
        let value = tree.get(slider).map(|s| s.value()).unwrap_or_default();
        tree.set_text(label, value.to_string());
    });
    ui.update(slider, |s| s.set_target(4.0));
    settle(&mut ui);
    assert_eq!(ui.text(label), Some("4"));
}
