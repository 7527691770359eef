//! Test utilities for Shelf services.
//!
//! Provides catalog fixtures and a test-writer tracing subscriber.
//! Import from tests only — never in production code.

pub mod fixture;
pub mod tracing;
