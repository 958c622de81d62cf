//! Common test utilities for codechat-analysis
//!
//! Source fixtures and document builders shared by the integration and
//! property tests.

#![allow(dead_code)]

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
