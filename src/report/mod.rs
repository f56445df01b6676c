//! Report module - JSON payloads, run summary and exports

pub mod pipeline_report;
pub mod response;
pub mod summary;

pub use pipeline_report::*;
pub use response::*;
pub use summary::*;
