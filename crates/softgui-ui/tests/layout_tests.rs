//! Pack layout tests (headless, fixed text metrics).

use softgui_core::geometry::{Rect, Size};
use softgui_ui::{Fill, PackOptions, Placement, UiCore};

fn rect_of(ui: &UiCore, id: impl Into<softgui_ui::WidgetId>) -> Rect<i32> {
    ui.tree().rect(id).expect("widget exists")
}

#[test]
fn test_top_stack_uses_margin_and_gap() {
    let mut ui = UiCore::headless(400, 300);
    let a = ui.create_label("a");
    let b = ui.create_label("b");
    let c = ui.create_label("c");
    ui.set_size(b, 100, 40);

    ui.pack(a, PackOptions::top());
    ui.pack(b, PackOptions::top());
    ui.pack(c, PackOptions::top());

    assert_eq!(rect_of(&ui, a), Rect::new(10, 10, 100, 24));
    assert_eq!(rect_of(&ui, b), Rect::new(10, 42, 100, 40));
    assert_eq!(rect_of(&ui, c), Rect::new(10, 90, 100, 24));
}

#[test]
fn test_fill_x_spans_the_window_minus_margins_and_padding() {
    let mut ui = UiCore::headless(400, 300);
    let entry = ui.create_entry();
    ui.pack(entry, PackOptions::top().fill(Fill::X).pad(6, 2));

    assert_eq!(rect_of(&ui, entry), Rect::new(16, 12, 368, 24));
}

#[test]
fn test_left_stack_with_fill_y() {
    let mut ui = UiCore::headless(400, 300);
    let first = ui.create_button("one");
    let second = ui.create_button("two");
    ui.set_size(first, 60, 30);
    ui.pack(first, PackOptions::left());
    ui.pack(second, PackOptions::left().fill(Fill::Y).pad(4, 0));

    assert_eq!(rect_of(&ui, first), Rect::new(10, 10, 60, 30));
    assert_eq!(rect_of(&ui, second), Rect::new(82, 10, 100, 280));
}

#[test]
fn test_layout_is_idempotent() {
    let mut ui = UiCore::headless(320, 240);
    let label = ui.create_label("title");
    let entry = ui.create_entry();
    let button = ui.create_button("go");
    ui.pack(label, PackOptions::top());
    ui.pack(entry, PackOptions::top().fill(Fill::X).pad(3, 3));
    ui.pack(button, PackOptions::left().fill(Fill::Both));

    let before: Vec<_> = ui.tree().ids().map(|id| rect_of(&ui, id)).collect();
    ui.layout();
    ui.layout();
    let after: Vec<_> = ui.tree().ids().map(|id| rect_of(&ui, id)).collect();
    assert_eq!(before, after);
}

#[test]
fn test_resize_reflows_filled_widgets() {
    let mut ui = UiCore::headless(400, 300);
    let entry = ui.create_entry();
    ui.pack(entry, PackOptions::top().fill(Fill::X));
    assert_eq!(rect_of(&ui, entry).width, 380);

    ui.resize(Size::new(600, 300));
    assert_eq!(rect_of(&ui, entry).width, 580);
    assert!(ui.needs_repaint());
}

#[test]
fn test_placed_widgets_are_left_alone() {
    let mut ui = UiCore::headless(400, 300);
    let packed = ui.create_label("packed");
    let placed = ui.create_button("placed");
    ui.add_child(placed);
    ui.place(placed, 50, 60);
    ui.pack(packed, PackOptions::top());
    ui.layout();

    assert_eq!(rect_of(&ui, placed), Rect::new(50, 60, 100, 24));
    assert_eq!(
        ui.tree().base(placed).map(|base| base.placement()),
        Some(Placement::Placed)
    );
}

#[test]
fn test_place_takes_a_widget_out_of_the_pack() {
    let mut ui = UiCore::headless(400, 300);
    let a = ui.create_label("a");
    let b = ui.create_label("b");
    ui.pack(a, PackOptions::top());
    ui.pack(b, PackOptions::top());
    ui.place(a, 200, 200);
    ui.layout();

    assert_eq!(rect_of(&ui, a), Rect::new(200, 200, 100, 24));
    // `b` is now the first packed widget
    assert_eq!(rect_of(&ui, b).y, 10);
}

#[test]
fn test_packing_a_frame_child_moves_it_to_the_top_level() {
    let mut ui = UiCore::headless(400, 300);
    let frame = ui.create_frame();
    let label = ui.create_label("inside");
    ui.add_child(frame);
    ui.add_to_frame(frame, label);
    assert_eq!(ui.tree().top_level(), &[frame.id()]);

    ui.pack(label, PackOptions::top());
    assert_eq!(ui.tree().top_level(), &[frame.id(), label.id()]);
    assert_eq!(ui.tree().base(label).and_then(|base| base.parent()), None);
    assert!(ui.tree().kind(frame).is_some_and(|kind| kind.children().is_empty()));
}

#[test]
fn test_size_to_content_uses_text_metrics() {
    let mut ui = UiCore::headless(400, 300);
    let label = ui.create_label("Hello");
    ui.size_to_content(label);
    // 5 glyphs * 8px + 2px inset each side; 20px line + 4
    assert_eq!(rect_of(&ui, label).size(), Size::new(44, 24));
}
