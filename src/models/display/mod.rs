//! Display model implementations for table and JSON output
//!
//! Display models transform domain types into CLI-friendly rows with
//! appropriate column names and serialization.

mod common;
mod integration;
mod mapping;
mod user;

pub use common::format_last_login;
pub use integration::IntegrationDisplay;
pub use mapping::MappingDisplay;
pub use user::InactiveUserDisplay;
