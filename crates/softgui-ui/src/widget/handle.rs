//! Type-safe widget handles.
//!
//! A [`WidgetHandle<T>`] is a [`WidgetId`] that remembers which widget variant
//! it was created for, so typed lookups cannot hit the wrong kind of widget.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::WidgetId;

/// Handle to a widget of variant `T`.
///
/// Handles are plain copies of the id. Widgets are never destroyed while the
/// tree lives, so a handle stays valid for the tree that issued it.
pub struct WidgetHandle<T> {
    id: WidgetId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> WidgetHandle<T> {
    pub(crate) fn new(id: WidgetId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }
}

impl<T> Clone for WidgetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WidgetHandle<T> {}

impl<T> PartialEq for WidgetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for WidgetHandle<T> {}

impl<T> Hash for WidgetHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for WidgetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<T>().rsplit("::").next().unwrap_or("?");
        write!(f, "WidgetHandle<{}>({})", name, self.id.raw())
    }
}

impl<T> From<WidgetHandle<T>> for WidgetId {
    fn from(handle: WidgetHandle<T>) -> Self {
        handle.id
    }
}

impl<T> From<&WidgetHandle<T>> for WidgetId {
    fn from(handle: &WidgetHandle<T>) -> Self {
        handle.id
    }
}
