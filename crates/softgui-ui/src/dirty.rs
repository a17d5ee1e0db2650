//! Dirty flag tracking for widgets.

use bitflags::bitflags;

bitflags! {
    /// What changed about a widget since the last composed frame.
    ///
    /// Both flags propagate to the owning container chain.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// Appearance changed; the next frame must repaint.
        const PAINT  = 1 << 0;
        /// Size, visibility or placement changed; packed widgets need a layout pass.
        const LAYOUT = 1 << 1;
    }
}

impl DirtyFlags {
    /// Flags a freshly created widget starts with.
    pub const NEW: Self = Self::PAINT.union(Self::LAYOUT);

    #[inline]
    pub fn needs_paint(&self) -> bool {
        !self.is_empty()
    }

    #[inline]
    pub fn needs_layout(&self) -> bool {
        self.contains(Self::LAYOUT)
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        Self::empty()
    }
}
