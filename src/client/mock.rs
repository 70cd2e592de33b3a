//! Mock Port API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::api::{AuthApi, EntityApi, IntegrationApi, UserApi};
use super::models::{AccessToken, BulkOutcome, Entity, EntityUpsert, Integration, User};
use crate::config::Credentials;
use crate::error::{ApiError, Result};

/// Scripted response for one bulk upsert call
#[derive(Debug, Clone)]
pub enum MockBulkResponse {
    Ok,
    Partial(String),
    Status(u16),
}

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockPortClient::new()
///     .with_users(vec![User { id: Some("u1".into()), ..Default::default() }])
///     .await;
///
/// let users = mock.list_users().await?;
/// assert_eq!(users.len(), 1);
/// ```
#[derive(Default)]
pub struct MockPortClient {
    /// Users to return from list_users
    users: Arc<Mutex<Vec<User>>>,
    /// Entities per blueprint for list_entities
    entities: Arc<Mutex<HashMap<String, Vec<Entity>>>>,
    /// Integrations to return from list_integrations
    integrations: Arc<Mutex<Vec<Integration>>>,
    /// Bulk responses, consumed in order; 200 once exhausted
    bulk_responses: Arc<Mutex<VecDeque<MockBulkResponse>>>,
    /// Entity identifiers whose relation update fails
    failing_updates: Arc<Mutex<Vec<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Every bulk request body, in call order
    bulk_requests: Arc<Mutex<Vec<Vec<EntityUpsert>>>>,
    /// Every relation update as (blueprint, identifier, relations)
    relation_updates: Arc<Mutex<Vec<(String, String, Map<String, Value>)>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub authenticate: usize,
    pub list_users: usize,
    pub bulk_upsert: usize,
    pub list_entities: usize,
    pub update_relations: usize,
    pub list_integrations: usize,
    pub resync_integration: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.authenticate
            + self.list_users
            + self.bulk_upsert
            + self.list_entities
            + self.update_relations
            + self.list_integrations
            + self.resync_integration
    }
}

impl MockPortClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure users to return from list_users.
    pub async fn with_users(self, users: Vec<User>) -> Self {
        *self.users.lock().await = users;
        self
    }

    /// Configure entities returned for a blueprint.
    pub async fn with_entities(self, blueprint: &str, entities: Vec<Entity>) -> Self {
        self.entities
            .lock()
            .await
            .insert(blueprint.to_string(), entities);
        self
    }

    /// Configure integrations to return from list_integrations.
    pub async fn with_integrations(self, integrations: Vec<Integration>) -> Self {
        *self.integrations.lock().await = integrations;
        self
    }

    /// Script bulk upsert responses, consumed one per call.
    pub async fn with_bulk_responses(self, responses: Vec<MockBulkResponse>) -> Self {
        *self.bulk_responses.lock().await = responses.into();
        self
    }

    /// Make relation updates of the given entity fail.
    pub async fn with_failing_update(self, identifier: &str) -> Self {
        self.failing_updates
            .lock()
            .await
            .push(identifier.to_string());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get every bulk request body sent so far.
    pub async fn bulk_requests(&self) -> Vec<Vec<EntityUpsert>> {
        self.bulk_requests.lock().await.clone()
    }

    /// Get every relation update sent so far.
    pub async fn relation_updates(&self) -> Vec<(String, String, Map<String, Value>)> {
        self.relation_updates.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for MockPortClient {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<AccessToken> {
        self.call_count.lock().await.authenticate += 1;
        self.check_error().await?;
        Ok(AccessToken {
            token: "mock-token".to_string(),
        })
    }
}

#[async_trait]
impl UserApi for MockPortClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.call_count.lock().await.list_users += 1;
        self.check_error().await?;
        Ok(self.users.lock().await.clone())
    }

    async fn bulk_upsert(
        &self,
        _blueprint: &str,
        entities: &[EntityUpsert],
    ) -> Result<BulkOutcome> {
        self.call_count.lock().await.bulk_upsert += 1;
        self.check_error().await?;
        self.bulk_requests.lock().await.push(entities.to_vec());

        let scripted = self.bulk_responses.lock().await.pop_front();
        match scripted.unwrap_or(MockBulkResponse::Ok) {
            MockBulkResponse::Ok => Ok(BulkOutcome::Applied),
            MockBulkResponse::Partial(detail) => Ok(BulkOutcome::Partial { detail }),
            MockBulkResponse::Status(status) => Err(ApiError::DispatchFailed {
                status,
                body: "mock failure".to_string(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl EntityApi for MockPortClient {
    async fn list_entities(&self, blueprint: &str) -> Result<Vec<Entity>> {
        self.call_count.lock().await.list_entities += 1;
        self.check_error().await?;
        Ok(self
            .entities
            .lock()
            .await
            .get(blueprint)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_relations(
        &self,
        blueprint: &str,
        identifier: &str,
        relations: Map<String, Value>,
    ) -> Result<()> {
        self.call_count.lock().await.update_relations += 1;
        self.check_error().await?;

        if self
            .failing_updates
            .lock()
            .await
            .iter()
            .any(|id| id == identifier)
        {
            return Err(ApiError::RequestFailed {
                path: format!("/v1/blueprints/{}/entities/{}", blueprint, identifier),
                status: 422,
                body: "mock failure".to_string(),
            }
            .into());
        }

        self.relation_updates.lock().await.push((
            blueprint.to_string(),
            identifier.to_string(),
            relations,
        ));
        Ok(())
    }
}

#[async_trait]
impl IntegrationApi for MockPortClient {
    async fn list_integrations(&self) -> Result<Vec<Integration>> {
        self.call_count.lock().await.list_integrations += 1;
        self.check_error().await?;
        Ok(self.integrations.lock().await.clone())
    }

    async fn resync_integration(&self, _installation_id: &str) -> Result<()> {
        self.call_count.lock().await.resync_integration += 1;
        self.check_error().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_users() {
        let mock = MockPortClient::new()
            .with_users(vec![User {
                id: Some("u1".to_string()),
                ..Default::default()
            }])
            .await;

        let users = mock.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(mock.call_counts().await.list_users, 1);
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed_once() {
        let mock = MockPortClient::new()
            .with_error(ApiError::Network("down".to_string()))
            .await;

        assert!(mock.list_users().await.is_err());
        assert!(mock.list_users().await.is_ok());
        assert_eq!(mock.call_counts().await.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_returns_integrations() {
        let mock = MockPortClient::new()
            .with_integrations(vec![Integration {
                installation_id: Some("68406724".to_string()),
                ..Default::default()
            }])
            .await;

        let integrations = mock.list_integrations().await.unwrap();
        mock.resync_integration("68406724").await.unwrap();

        assert_eq!(integrations.len(), 1);
        assert_eq!(integrations[0].installation_id.as_deref(), Some("68406724"));
        let counts = mock.call_counts().await;
        assert_eq!(counts.list_integrations, 1);
        assert_eq!(counts.resync_integration, 1);
        assert_eq!(counts.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_bulk_script() {
        let mock = MockPortClient::new()
            .with_bulk_responses(vec![
                MockBulkResponse::Partial("half".to_string()),
                MockBulkResponse::Status(500),
            ])
            .await;
        let batch = [EntityUpsert::disable_user("u1", None)];

        assert!(matches!(
            mock.bulk_upsert("_user", &batch).await.unwrap(),
            BulkOutcome::Partial { .. }
        ));
        assert!(mock.bulk_upsert("_user", &batch).await.is_err());
        assert_eq!(
            mock.bulk_upsert("_user", &batch).await.unwrap(),
            BulkOutcome::Applied
        );
        assert_eq!(mock.bulk_requests().await.len(), 3);
    }
}
