//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::AccessToken;
use crate::config::Credentials;
use crate::error::Result;

/// Authentication operations for the Port API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange a client credential pair for a bearer token
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken>;
}
