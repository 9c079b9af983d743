//! Embassy tasks

pub mod display;
pub mod tick;

pub use display::display_task;
pub use tick::tick_task;
