//! Test utilities for the SoftGUI runtime.
//!
//! - [`RecordingPresenter`] - a [`Present`] implementation that keeps a copy
//!   of every presented frame instead of showing it.
//! - [`CallbackLog`] - a cloneable, shared event log for asserting on
//!   callback order from inside `'static` closures.
//!
//! # Example
//!
//! ```rust
//! use softgui_test_utils::CallbackLog;
//!
//! let log = CallbackLog::new();
//! let recorder = log.clone();
//! let on_click = move |id: u32| recorder.push(("click", id));
//!
//! on_click(7);
//! assert_eq!(log.take(), vec![("click", 7)]);
//! ```

mod log;
mod presenter;

pub use log::CallbackLog;
pub use presenter::{CapturedFrame, RecordingPresenter};
