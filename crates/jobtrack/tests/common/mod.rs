//! Shared test utilities for jobtrack integration tests.
//!
//! This module provides:
//! - `TestHarness` for trackers backed by an isolated temp directory
//! - Builder patterns for creating records and configurations

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
