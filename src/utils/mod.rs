//! Terminal output helpers and number formatting

mod format;
mod progress;
mod styling;

pub use format::*;
pub use progress::*;
pub use styling::*;
