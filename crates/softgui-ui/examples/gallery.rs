//! Every widget in one window.
//!
//! Run with `cargo run -p softgui-ui --example gallery`. Set `RUST_LOG=trace`
//! to watch input routing.

use softgui_core::geometry::Pos;
use softgui_core::logging;
use softgui_ui::{Color, Fill, PackOptions, Window};

fn main() {
    logging::init();

    let mut window = Window::new(480, 560, "SoftGUI gallery");

    let title = window.create_label("Pick a volume, type a name, press Enter");
    window.pack(title, PackOptions::top());

    let volume = window.create_hslider(0, 100);
    window.pack(volume, PackOptions::top().fill(Fill::X));
    let volume_label = window.create_label("Volume: 0");
    window.pack(volume_label, PackOptions::top());
    window.on_change(volume, move |tree, _| {
        let value = tree.get(volume).map(|s| s.value()).unwrap_or_default();
        tree.set_text(volume_label, format!("Volume: {}", value));
    });

    let name = window.create_entry();
    window.pack(name, PackOptions::top().fill(Fill::X));
    let greeting = window.create_label("");
    window.pack(greeting, PackOptions::top().fill(Fill::X));
    window.on_change(name, move |tree, id| {
        let text = tree.text(id).unwrap_or_default().to_string();
        tree.set_text(greeting, format!("Hello, {}", text));
    });

    let mute = window.create_checkbox("Mute");
    window.pack(mute, PackOptions::top());

    let quality = window.create_frame();
    window.pack(quality, PackOptions::top().fill(Fill::X));
    // frame children use window coordinates
    let row_y = window.tree().rect(quality).map_or(0, |rect| rect.y);
    for (i, text) in ["Low", "Medium", "High"].into_iter().enumerate() {
        let radio = window.create_radio_button(text, 0);
        window.add_to_frame(quality, radio);
        window.place(radio, 10 + i as i32 * 110, row_y);
    }

    let fruits = window.create_listbox(["Apple", "Banana", "Cherry", "Date"]);
    window.pack(fruits, PackOptions::top());
    window.set_size(fruits, 160, 84);

    let colors = window.create_combobox(["Red", "Green", "Blue"]);
    window.pack(colors, PackOptions::top());

    let canvas = window.create_canvas(160, 80);
    window.pack(canvas, PackOptions::top());
    window.update(canvas, |c| {
        c.draw_line(Pos::new(0.0, 0.0), Pos::new(159.0, 79.0), Color::rgb(0, 120, 215));
    });
    window.on_change(colors, move |tree, _| {
        let color = match tree.get(colors).and_then(|c| c.selected()) {
            Some(0) => Color::rgb(220, 40, 40),
            Some(1) => Color::rgb(40, 160, 40),
            _ => Color::rgb(40, 40, 220),
        };
        tree.update(canvas, |c| c.fill(color));
    });

    let depth = window.create_vslider(0, 10);
    window.place(depth, 420, 10);
    window.add_child(depth);

    let reset = window.create_button("Reset");
    window.pack(reset, PackOptions::top());
    window.on_click(reset, move |tree, _| {
        tree.update(volume, |s| s.set_target(0.0));
        tree.set_text(name, "");
        tree.update(mute, |c| c.set_checked(false));
    });

    if let Err(err) = window.run() {
        tracing::error!("gallery failed: {}", err);
    }
}
