//! Peripheral page effects. Each module pairs a small pure core with the
//! web-sys wiring that attaches it to the document.

pub mod counter;
pub mod easter_egg;
pub mod fallback;
pub mod page;
pub mod parallax;
pub mod performance;
pub mod reveal;
pub mod scroll;
pub mod touch;
