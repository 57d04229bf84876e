//! Data dependence analysis
//!
//! Action traces on CFG nodes → live definitions → def→use edges

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
