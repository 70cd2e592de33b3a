//! Integration API trait

use async_trait::async_trait;

use crate::client::models::Integration;
use crate::error::Result;

/// Integration operations
#[async_trait]
pub trait IntegrationApi: Send + Sync {
    /// List installed integrations
    async fn list_integrations(&self) -> Result<Vec<Integration>>;

    /// Trigger a resync of one integration without changing its mapping
    async fn resync_integration(&self, installation_id: &str) -> Result<()>;
}
