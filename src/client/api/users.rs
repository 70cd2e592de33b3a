//! User directory API trait

use async_trait::async_trait;

use crate::client::models::{BulkOutcome, EntityUpsert, User};
use crate::error::Result;

/// User directory reads and bulk entity writes
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch every user in one request.
    ///
    /// Fails on any non-success status or an unrecognized payload shape.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Insert-or-update a batch of entities in one request.
    ///
    /// 200 and 207 are accepted outcomes; any other status is an error.
    async fn bulk_upsert(&self, blueprint: &str, entities: &[EntityUpsert])
    -> Result<BulkOutcome>;
}
