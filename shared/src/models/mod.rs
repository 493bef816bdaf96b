//! Domain models for the planting advisor

mod progress;
mod suitability;
mod vegetable;
mod weather;

pub use progress::*;
pub use suitability::*;
pub use vegetable::*;
pub use weather::*;
