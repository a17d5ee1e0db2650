use std::sync::Arc;

use softgui_core::geometry::Size;
pub use winit::window::Window as WinitWindow;
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

/// How the OS window should be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDescriptor {
    pub title: String,
    /// Requested inner size in physical pixels. `None` lets the OS choose.
    pub size: Option<Size<u32>>,
    pub resizable: bool,
    pub visible: bool,
}

impl Default for WindowDescriptor {
    fn default() -> Self {
        Self {
            title: "SoftGUI".to_string(),
            size: None,
            resizable: true,
            visible: true,
        }
    }
}

impl WindowDescriptor {
    pub fn new(title: impl Into<String>, size: Size<u32>) -> Self {
        Self {
            title: title.into(),
            size: Some(size),
            ..Self::default()
        }
    }
}

/// An open OS window. Cloning the handle is cheap; the window closes when
/// the last handle is dropped.
#[derive(Debug, Clone)]
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub(crate) fn open(
        event_loop: &ActiveEventLoop,
        descriptor: WindowDescriptor,
    ) -> Result<Self, OsError> {
        let mut attributes = WinitWindow::default_attributes()
            .with_title(descriptor.title)
            .with_resizable(descriptor.resizable)
            .with_visible(descriptor.visible);
        if let Some(size) = descriptor.size {
            attributes = attributes.with_inner_size(PhysicalSize::new(size.width, size.height));
        }
        let inner = event_loop.create_window(attributes)?;
        tracing::debug!("opened window {:?}", inner.id());
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn id(&self) -> WindowId {
        self.inner.id()
    }

    /// Drawable area in physical pixels.
    pub fn physical_size(&self) -> Size<u32> {
        let size = self.inner.inner_size();
        Size::new(size.width, size.height)
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// The shared winit window, for backends that must own a handle to it.
    pub fn handle(&self) -> Arc<WinitWindow> {
        Arc::clone(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_new_sets_size() {
        let descriptor = WindowDescriptor::new("demo", Size::new(320, 200));
        assert_eq!(descriptor.title, "demo");
        assert_eq!(descriptor.size, Some(Size::new(320, 200)));
        assert!(descriptor.resizable);
    }
}
