//! Blueprint entity API trait

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::client::models::Entity;
use crate::error::Result;

/// Entity operations for arbitrary blueprints
#[async_trait]
pub trait EntityApi: Send + Sync {
    /// List all entities of a blueprint, following `nextPageUrl`
    async fn list_entities(&self, blueprint: &str) -> Result<Vec<Entity>>;

    /// Replace relations of a single entity, leaving properties untouched
    async fn update_relations(
        &self,
        blueprint: &str,
        identifier: &str,
        relations: Map<String, Value>,
    ) -> Result<()>;
}
