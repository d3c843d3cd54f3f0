//! CLI library components for the dosimetry toolkit.

pub mod logging;
pub mod runner;
