//! Ambient plumbing shared by Shelf services: env-driven config and tracing setup.

pub mod config;
pub mod tracing;
