//! Port API request and response models

mod auth;
mod entity;
mod integration;
mod lenient;
mod user;

pub use auth::{AccessToken, TokenRequest, TokenResponse};
pub use entity::{
    BulkOutcome, BulkUpsertRequest, Entity, EntityPage, EntityPatch, EntityUpsert, USER_BLUEPRINT,
};
pub use integration::Integration;
pub use user::{User, UserStatus};
#[cfg(test)]
pub use user::OrgMembership;
