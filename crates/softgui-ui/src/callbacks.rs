//! Per-widget application callbacks.
//!
//! Callbacks receive the tree so they can read and change other widgets. A
//! callback that is running is temporarily taken out of its slot; if it
//! registers a replacement for itself, the replacement wins.

use crate::tree::WidgetTree;
use crate::widget::WidgetId;

pub type ClickCallback = Box<dyn FnMut(&mut WidgetTree, WidgetId)>;
pub type KeyCallback = Box<dyn FnMut(&mut WidgetTree, WidgetId, char)>;
/// Called with `true` when focus is gained and `false` when it is lost.
pub type FocusCallback = Box<dyn FnMut(&mut WidgetTree, WidgetId, bool)>;
pub type ChangeCallback = Box<dyn FnMut(&mut WidgetTree, WidgetId)>;

#[derive(Default)]
pub(crate) struct CallbackSlots {
    pub click: Option<ClickCallback>,
    pub key: Option<KeyCallback>,
    pub focus: Option<FocusCallback>,
    pub change: Option<ChangeCallback>,
}
