//! Flow graph infrastructure

pub mod cfg;

pub use cfg::{CfgBlock, InMemoryCfg};
