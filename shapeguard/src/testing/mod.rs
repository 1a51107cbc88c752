//! Testing utilities for code that validates against contracts.
//!
//! This module provides:
//! - Assertions over validation results
//! - A tracing subscriber for test output

mod assertions;
mod logging;

pub use assertions::{
    assert_invalid, assert_valid, assert_violation, assert_violation_at, assert_violation_count,
};
pub use logging::init_test_tracing;
