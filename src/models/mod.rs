//! Display models for CLI output
//!
//! This module converts sweep records and API types into rows for table and
//! JSON output.

pub mod display;

pub use display::{InactiveUserDisplay, IntegrationDisplay, MappingDisplay};
