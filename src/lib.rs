//! Housestat: House Price Analysis Library
//!
//! Loads a house-sales table (falling back to a seeded synthetic one),
//! computes summary, missing-value and correlation reports, removes extreme
//! prices and a fixed list of features, and builds chart data.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
