pub mod chart;
pub mod completions;
pub mod config;
pub mod estimate;
pub mod profile;
pub mod sweep;
