//! Built-in widget variants.

mod button;
mod canvas;
mod combo;
mod entry;
mod frame;
mod label;
mod list;
mod slider;
mod toggle;

pub use button::Button;
pub use canvas::Canvas;
pub use combo::ComboBox;
pub use entry::Entry;
pub use frame::Frame;
pub use label::Label;
pub use list::{ListBox, SelectionMode};
pub use slider::{Orientation, Slider};
pub use toggle::{Checkbox, RadioButton};

/// Row under `offset` pixels into a list of `len` rows, clamped to the last row.
pub(crate) fn row_at(offset: i32, row_height: i32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let row = (offset.max(0) / row_height.max(1)) as usize;
    Some(row.min(len - 1))
}
