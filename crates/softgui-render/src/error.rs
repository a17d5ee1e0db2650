use std::fmt;

/// Errors that abort a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The back buffer (or another pixel buffer) could not be allocated.
    SurfaceAllocation { width: u32, height: u32 },

    /// Copying the finished frame to the window failed.
    Present(String),

    /// The presentation backend could not be created.
    Backend(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceAllocation { width, height } => {
                write!(f, "failed to allocate a {}x{} surface", width, height)
            }
            RenderError::Present(msg) => write!(f, "failed to present frame: {}", msg),
            RenderError::Backend(msg) => write!(f, "presentation backend error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}
