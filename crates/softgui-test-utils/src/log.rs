use std::sync::Arc;

use parking_lot::Mutex;

/// Shared append-only log. Clones refer to the same storage.
#[derive(Debug)]
pub struct CallbackLog<E> {
    entries: Arc<Mutex<Vec<E>>>,
}

impl<E> Clone for CallbackLog<E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<E> Default for CallbackLog<E> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<E> CallbackLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: E) {
        self.entries.lock().push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl<E: Clone> CallbackLog<E> {
    pub fn entries(&self) -> Vec<E> {
        self.entries.lock().clone()
    }
}
