//! Pipeline module - loading, statistics, cleaning steps and chart data

pub mod charts;
pub mod config;
pub mod correlation;
pub mod error;
pub mod features;
pub mod loader;
pub mod missing;
pub mod outliers;
pub mod session;
pub mod stats;
pub mod summary;
pub mod synthetic;

pub use charts::*;
pub use config::*;
pub use correlation::*;
pub use error::{AnalysisError, Result};
pub use features::*;
pub use loader::*;
pub use missing::*;
pub use outliers::*;
pub use session::*;
pub use summary::*;
pub use synthetic::*;
