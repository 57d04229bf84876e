//! Common test utilities for codegraph-ddg
//!
//! Shared CFG builders and fixtures for integration tests.

#![allow(dead_code)]

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
