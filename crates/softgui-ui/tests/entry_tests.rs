//! Text entry editing and focus tests.
//!
//! The headless core measures text at a fixed 8 pixels per character.

use softgui_core::geometry::Pos;
use softgui_test_utils::CallbackLog;
use softgui_ui::{Entry, KeyInput, UiCore, WidgetHandle};

fn focused_entry(ui: &mut UiCore, text: &str) -> WidgetHandle<Entry> {
    let entry = ui.create_entry();
    ui.add_child(entry);
    ui.place(entry, 10, 10);
    ui.set_text(entry, text);
    ui.set_focus(Some(entry));
    entry
}

fn caret(ui: &UiCore, entry: WidgetHandle<Entry>) -> usize {
    ui.get(entry).map(Entry::caret).unwrap_or(usize::MAX)
}

#[test]
fn test_typing_inserts_at_the_caret() {
    let mut ui = UiCore::headless(200, 100);
    let entry = focused_entry(&mut ui, "");

    ui.type_text("hllo");
    ui.key_input(KeyInput::Home);
    ui.key_input(KeyInput::Right);
    ui.key_input(KeyInput::Char('e'));
    ui.key_input(KeyInput::End);
    ui.type_text("!");

    assert_eq!(ui.text(entry), Some("hello!"));
    assert_eq!(caret(&ui, entry), 6);
}

#[test]
fn test_backspace_delete_home_end() {
    let mut ui = UiCore::headless(200, 100);
    let entry = focused_entry(&mut ui, "abcd");

    ui.key_input(KeyInput::End);
    ui.key_input(KeyInput::Backspace);
    assert_eq!(ui.text(entry), Some("abc"));

    ui.key_input(KeyInput::Home);
    ui.key_input(KeyInput::Delete);
    assert_eq!(ui.text(entry), Some("bc"));
    assert_eq!(caret(&ui, entry), 0);

    // nothing before the caret
    ui.key_input(KeyInput::Backspace);
    assert_eq!(ui.text(entry), Some("bc"));
}

#[test]
fn test_every_edit_reports_a_change() {
    let mut ui = UiCore::headless(200, 100);
    let entry = focused_entry(&mut ui, "");
    let log = CallbackLog::new();
    let recorder = log.clone();
    ui.on_change(entry, move |tree, id| {
        recorder.push(tree.text(id).unwrap_or_default().to_string());
    });

    ui.type_text("ab");
    ui.key_input(KeyInput::Left);
    ui.key_input(KeyInput::Backspace);

    assert_eq!(log.take(), vec!["a", "ab", "b"]);
}

#[test]
fn test_enter_commits_then_drops_focus() {
    let mut ui = UiCore::headless(200, 100);
    let entry = focused_entry(&mut ui, "done");
    let log = CallbackLog::new();
    let on_change = log.clone();
    let on_focus = log.clone();
    ui.on_change(entry, move |_, _| on_change.push("change"));
    ui.on_focus(entry, move |_, _, gained| {
        on_focus.push(if gained { "focus" } else { "blur" })
    });

    assert!(ui.key_input(KeyInput::Enter));
    assert_eq!(log.take(), vec!["change", "blur"]);
    assert_eq!(ui.focused(), None);
    assert_eq!(ui.get(entry).map(Entry::is_focused), Some(false));

    // keys after the commit go nowhere
    assert!(!ui.key_input(KeyInput::Char('x')));
    assert_eq!(ui.text(entry), Some("done"));
}

#[test]
fn test_click_places_the_caret() {
    let mut ui = UiCore::headless(200, 100);
    let entry = ui.create_entry();
    ui.add_child(entry);
    ui.place(entry, 10, 10);
    ui.set_text(entry, "hello");

    // 17 px into the text reaches the end of the third character
    ui.pointer_down(Pos::new(10 + 4 + 17, 20));
    ui.pointer_up(Pos::new(10 + 4 + 17, 20));
    assert_eq!(caret(&ui, entry), 3);
    assert_eq!(ui.focused(), Some(entry.id()));

    ui.pointer_down(Pos::new(10 + 2, 20));
    assert_eq!(caret(&ui, entry), 0);

    ui.pointer_down(Pos::new(100, 20));
    assert_eq!(caret(&ui, entry), 5);
}

#[test]
fn test_unfocused_entry_ignores_keys() {
    let mut ui = UiCore::headless(200, 100);
    let entry = ui.create_entry();
    ui.add_child(entry);
    ui.set_text(entry, "keep");

    ui.type_text("zz");
    assert_eq!(ui.text(entry), Some("keep"));
}

#[test]
fn test_non_ascii_reaches_key_callback_only() {
    let mut ui = UiCore::headless(200, 100);
    let entry = focused_entry(&mut ui, "");
    let keys = CallbackLog::new();
    let recorder = keys.clone();
    ui.on_key(entry, move |_, _, ch| recorder.push(ch));

    ui.type_text("aé\u{7}b");
    assert_eq!(ui.text(entry), Some("ab"));
    assert_eq!(keys.take(), vec!['a', 'é', '\u{7}', 'b']);
}

#[test]
fn test_insert_then_backspace_is_a_no_op() {
    let mut ui = UiCore::headless(200, 100);
    let entry = focused_entry(&mut ui, "text");
    ui.key_input(KeyInput::Home);
    ui.key_input(KeyInput::Right);

    ui.key_input(KeyInput::Char('Q'));
    ui.key_input(KeyInput::Backspace);
    assert_eq!(ui.text(entry), Some("text"));
    assert_eq!(caret(&ui, entry), 1);
}

#[test]
fn test_replacing_text_keeps_caret_inside() {
    let mut ui = UiCore::headless(200, 100);
    let entry = focused_entry(&mut ui, "a long value");
    ui.key_input(KeyInput::End);
    assert_eq!(caret(&ui, entry), 12);

    ui.set_text(entry, "short");
    assert_eq!(caret(&ui, entry), 5);
    ui.key_input(KeyInput::Char('!'));
    assert_eq!(ui.text(entry), Some("short!"));
}

#[test]
fn test_focus_callbacks_follow_the_pointer() {
    let mut ui = UiCore::headless(300, 100);
    let first = ui.create_entry();
    let second = ui.create_entry();
    ui.add_child(first);
    ui.add_child(second);
    ui.place(first, 0, 0);
    ui.place(second, 150, 0);

    let log = CallbackLog::new();
    for (name, entry) in [("first", first), ("second", second)] {
        let recorder = log.clone();
        ui.on_focus(entry, move |_, _, gained| recorder.push((name, gained)));
    }

    ui.pointer_down(Pos::new(5, 5));
    ui.pointer_up(Pos::new(5, 5));
    ui.pointer_down(Pos::new(155, 5));
    ui.pointer_up(Pos::new(155, 5));

    assert_eq!(
        log.take(),
        vec![("first", true), ("first", false), ("second", true)]
    );
}
