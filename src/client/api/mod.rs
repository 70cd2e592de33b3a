//! API trait definitions split by responsibility
//!
//! This module organizes the Port API surface into focused sub-traits:
//! - [`AuthApi`] - Exchanging client credentials for a bearer token
//! - [`UserApi`] - Reading the user directory and bulk-writing user entities
//! - [`EntityApi`] - Listing and patching entities of any blueprint
//! - [`IntegrationApi`] - Listing and resyncing integrations

mod auth;
mod entities;
mod integrations;
mod users;

pub use auth::AuthApi;
pub use entities::EntityApi;
pub use integrations::IntegrationApi;
pub use users::UserApi;
