//! Summary statistics and scatter plots of Anscombe's quartet.

pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod manager;
pub mod stats;
