//! Control flow graph input: the model DDG construction consumes

pub mod domain;
pub mod infrastructure;
pub mod ports;
