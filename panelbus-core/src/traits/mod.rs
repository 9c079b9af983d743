//! Driver traits
//!
//! These are the seams between the GUI side of the firmware and the panel
//! drivers: a place to flush rendered pixels and a pointer to poll.

pub mod display;
pub mod input;

pub use display::{FlushStats, FlushTarget};
pub use input::TouchInput;
