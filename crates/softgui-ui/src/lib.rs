//! SoftGUI UI - a retained-mode widget runtime with software rendering.
//!
//! Widgets live in a [`WidgetTree`] owned by a [`UiCore`]. Applications create
//! widgets through typed factory methods, position them with the pack layout
//! or explicit placement, and register callbacks for clicks, keys, focus and
//! value changes. The runtime routes pointer input with capture, eases
//! sliders on a fixed tick, and paints whole frames off-screen before
//! presenting them.
//!
//! # Example
//!
//! ```rust
//! use softgui_core::geometry::Pos;
//! use softgui_ui::{Fill, PackOptions, UiCore};
//!
//! let mut ui = UiCore::headless(320, 200);
//! let title = ui.create_label("Volume");
//! let slider = ui.create_hslider(0, 100);
//! ui.pack(title, PackOptions::top());
//! ui.pack(slider, PackOptions::top().fill(Fill::X));
//!
//! ui.on_change(slider, |_tree, _id| {});
//! let rect = ui.tree().rect(slider).unwrap();
//! ui.pointer_down(Pos::new(rect.x + rect.width / 2, rect.y + 5));
//! ui.pointer_up(Pos::new(rect.x + rect.width / 2, rect.y + 5));
//! assert_eq!(ui.get(slider).map(|s| s.value()), Some(50));
//! ```
//!
//! For a real window use [`Window`], which derefs to [`UiCore`].

mod animation;
pub mod callbacks;
mod config;
pub mod dirty;
pub mod editor;
mod host;
pub mod input;
pub mod layout;
mod render;
pub mod theme;
pub mod tree;
pub mod widget;
pub mod widgets;
mod window;

pub use config::UiConfig;
pub use host::UiCore;
pub use dirty::DirtyFlags;
pub use input::KeyInput;
pub use layout::{Fill, PackOptions, Placement, Side};
pub use theme::Palette;
pub use tree::WidgetTree;
pub use widget::{
    Animatable, Draggable, Notification, TickOutcome, Widget, WidgetBase, WidgetHandle, WidgetId,
    WidgetKind,
};
pub use widgets::{
    Button, Canvas, Checkbox, ComboBox, Entry, Frame, Label, ListBox, Orientation, RadioButton,
    SelectionMode, Slider,
};
pub use window::Window;

pub use softgui_render::{Color, FontDescriptor};
