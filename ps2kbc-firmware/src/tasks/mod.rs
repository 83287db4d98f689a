//! Embassy async tasks
//!
//! The line task runs on the high-priority interrupt executor, the
//! foreground on the thread-mode executor.

pub mod foreground;
pub mod line;

pub use foreground::{foreground_task, FirmwareKeyboard};
pub use line::line_task;
