//! Port API client

pub mod api;
pub mod envelope;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod port;

pub use api::{AuthApi, EntityApi, IntegrationApi, UserApi};
#[cfg(test)]
pub use mock::MockPortClient;
pub use port::PortClient;
