//! LCD controller drivers

pub mod ssd1963;

pub use ssd1963::Ssd1963;
