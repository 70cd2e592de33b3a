//! Port API client implementation

use std::collections::HashSet;
use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::api::{AuthApi, EntityApi, IntegrationApi, UserApi};
use super::envelope::{INTEGRATION_SHAPES, USER_SHAPES, decode_list};
use super::models::{
    AccessToken, BulkOutcome, BulkUpsertRequest, Entity, EntityPage, EntityPatch, EntityUpsert,
    Integration, TokenRequest, TokenResponse, User,
};
use crate::config::Credentials;
use crate::error::{ApiError, ConfigError, Result};

/// Timeout for the token exchange
const AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for inventory reads and mutations
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client-side pacing of outgoing requests
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Port API client
pub struct PortClient {
    http: HttpClient,
    base_url: Url,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    token: RwLock<Option<String>>,
}

impl PortClient {
    /// Create a client for the given API base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let per_second = NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            http,
            base_url,
            rate_limiter,
            token: RwLock::new(None),
        })
    }

    /// Set the bearer token used for every subsequent request
    pub async fn set_token(&self, token: AccessToken) {
        *self.token.write().await = Some(token.token);
    }

    /// Build an endpoint URL from path segments, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::Invalid {
                name: "base URL",
                reason: format!("{} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request carrying the bearer token
    async fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self
            .token
            .read()
            .await
            .clone()
            .ok_or(ApiError::NotAuthenticated)?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send a request after waiting for the rate limiter
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        self.rate_limiter.until_ready().await;

        let response = request.send().await.map_err(ApiError::from)?;
        debug!("{} {}", response.status().as_u16(), response.url().path());
        Ok(response)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        name: "base URL",
        reason: format!("{:?}: {}", raw, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            name: "base URL",
            reason: format!("{:?}: scheme must be http or https", raw),
        }
        .into());
    }

    Ok(url)
}

async fn body_text(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let data = response
        .json::<T>()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
    Ok(data)
}

/// Pass 2xx responses through; turn anything else into `RequestFailed`
async fn ensure_success(response: Response, path: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(ApiError::RequestFailed {
        path: path.to_string(),
        status: status.as_u16(),
        body: body_text(response).await,
    }
    .into())
}

#[async_trait]
impl AuthApi for PortClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken> {
        let body = TokenRequest {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
        };

        let url = self.endpoint(&["v1", "auth", "access_token"])?;
        let mut response = self
            .send(self.http.post(url).json(&body).timeout(AUTH_TIMEOUT))
            .await?;

        // Older deployments serve the token endpoint without the version prefix
        if response.status() == StatusCode::NOT_FOUND {
            let legacy = self.endpoint(&["auth", "access_token"])?;
            debug!("Token endpoint not found, falling back to {}", legacy.path());
            response = self
                .send(self.http.post(legacy).json(&body).timeout(AUTH_TIMEOUT))
                .await?;
        }

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::AuthFailed {
                status: status.as_u16(),
                body: body_text(response).await,
            }
            .into());
        }

        let parsed: TokenResponse = read_json(response).await?;
        match parsed.access_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(AccessToken { token }),
            None => Err(ApiError::MissingAccessToken.into()),
        }
    }
}

#[async_trait]
impl UserApi for PortClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.endpoint(&["v1", "users"])?;
        let response = self.send(self.authorized(Method::GET, url).await?).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::FetchFailed {
                status: status.as_u16(),
                body: body_text(response).await,
            }
            .into());
        }

        let payload: Value = read_json(response).await?;
        let users: Vec<User> = decode_list(payload, USER_SHAPES, "users")?;
        debug!("Fetched {} users", users.len());
        Ok(users)
    }

    async fn bulk_upsert(
        &self,
        blueprint: &str,
        entities: &[EntityUpsert],
    ) -> Result<BulkOutcome> {
        let url = self.endpoint(&["v1", "blueprints", blueprint, "entities", "bulk"])?;
        let request = self
            .authorized(Method::POST, url)
            .await?
            .json(&BulkUpsertRequest { entities });
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::OK => Ok(BulkOutcome::Applied),
            StatusCode::MULTI_STATUS => Ok(BulkOutcome::Partial {
                detail: body_text(response).await,
            }),
            status => Err(ApiError::DispatchFailed {
                status: status.as_u16(),
                body: body_text(response).await,
            }
            .into()),
        }
    }
}

#[async_trait]
impl EntityApi for PortClient {
    async fn list_entities(&self, blueprint: &str) -> Result<Vec<Entity>> {
        let mut first = self.endpoint(&["v1", "blueprints", blueprint, "entities"])?;
        first
            .query_pairs_mut()
            .append_pair("exclude_calculated_properties", "true")
            .append_pair("include", "properties")
            .append_pair("include", "relations")
            .append_pair("include", "identifier")
            .append_pair("include", "title");

        let mut entities = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(first);

        while let Some(url) = next.take() {
            visited.insert(url.clone());
            let path = url.path().to_string();
            let response = self
                .send(self.authorized(Method::GET, url.clone()).await?)
                .await?;
            let page: EntityPage = read_json(ensure_success(response, &path).await?).await?;
            entities.extend(page.entities);

            if let Some(raw) = page.next_page_url.filter(|u| !u.is_empty()) {
                let following = self.base_url.join(&raw).map_err(|e| {
                    ApiError::InvalidResponse(format!("Invalid nextPageUrl {:?}: {}", raw, e))
                })?;
                // Stop at the first page already read
                if !visited.contains(&following) {
                    next = Some(following);
                }
            }
        }

        debug!("Fetched {} entities of {}", entities.len(), blueprint);
        Ok(entities)
    }

    async fn update_relations(
        &self,
        blueprint: &str,
        identifier: &str,
        relations: Map<String, Value>,
    ) -> Result<()> {
        let url = self.endpoint(&["v1", "blueprints", blueprint, "entities", identifier])?;
        let path = url.path().to_string();
        let body = EntityPatch {
            properties: Map::new(),
            relations,
        };

        let response = self
            .send(self.authorized(Method::PATCH, url).await?.json(&body))
            .await?;
        ensure_success(response, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl IntegrationApi for PortClient {
    async fn list_integrations(&self) -> Result<Vec<Integration>> {
        let url = self.endpoint(&["v1", "integration"])?;
        let path = url.path().to_string();
        let response = self.send(self.authorized(Method::GET, url).await?).await?;

        let payload: Value = read_json(ensure_success(response, &path).await?).await?;
        let integrations: Vec<Integration> =
            decode_list(payload, INTEGRATION_SHAPES, "integrations")?;
        debug!("Fetched {} integrations", integrations.len());
        Ok(integrations)
    }

    async fn resync_integration(&self, installation_id: &str) -> Result<()> {
        let url = self.endpoint(&["v1", "integration", installation_id])?;
        let path = url.path().to_string();

        // An empty patch keeps the mapping and triggers a resync
        let response = self
            .send(
                self.authorized(Method::PATCH, url)
                    .await?
                    .json(&Value::Object(Map::new())),
            )
            .await?;
        ensure_success(response, &path).await?;
        Ok(())
    }
}
