//! HTTP handlers for the planting advisor API

pub mod advice;
pub mod health;
pub mod progress;
pub mod vegetables;

pub use advice::get_advice;
pub use health::health_check;
pub use progress::get_progress;
pub use vegetables::{get_vegetable, list_vegetable_names, list_vegetables};
