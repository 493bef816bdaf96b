//! Services for the planting advisor

pub mod advisor;
pub mod catalog;
pub mod forecast;
pub mod progress;

pub use advisor::AdvisorService;
pub use catalog::Catalog;
pub use forecast::ForecastService;
pub use progress::ProgressService;
