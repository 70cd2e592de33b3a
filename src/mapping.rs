//! Linking GitHub user entities to platform users
//!
//! `_user` entities are identified by email. A GitHub user entity whose
//! `email` property matches one of them (ignoring case) gets its `user`
//! relation pointed at that entity.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::EntityApi;
use crate::client::models::Entity;
use crate::error::Result;

/// Default blueprint of GitHub user entities
pub const DEFAULT_GITHUB_BLUEPRINT: &str = "githubUser";

/// Relation on the GitHub blueprint that points at `_user`
pub const USER_RELATION: &str = "user";

/// Property holding the GitHub user's email
const EMAIL_PROPERTY: &str = "email";

/// One relation to set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedLink {
    /// GitHub user entity identifier
    pub github_user: String,
    /// Matched `_user` identifier
    pub port_user: String,
    pub email: String,
}

/// Why a GitHub user could not be linked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum Unmatched {
    NoEmail { github_user: String },
    NoUser { github_user: String, email: String },
}

/// Mapping decisions for every GitHub user entity
#[derive(Debug, Clone, Default, Serialize)]
pub struct MappingPlan {
    pub links: Vec<PlannedLink>,
    pub already_mapped: usize,
    pub unmatched: Vec<Unmatched>,
}

impl MappingPlan {
    /// Match GitHub users against `_user` entities.
    pub fn build(port_users: &[Entity], github_users: &[Entity]) -> Self {
        let lookup: HashMap<String, &str> = port_users
            .iter()
            .map(|u| (u.identifier.to_lowercase(), u.identifier.as_str()))
            .collect();
        log::debug!("Built lookup of {} platform users", lookup.len());

        let mut plan = MappingPlan::default();
        for gh in github_users {
            if gh.has_relation(USER_RELATION) {
                log::debug!("Skipping {}: already mapped", gh.identifier);
                plan.already_mapped += 1;
                continue;
            }

            let Some(email) = gh.string_property(EMAIL_PROPERTY) else {
                plan.unmatched.push(Unmatched::NoEmail {
                    github_user: gh.identifier.clone(),
                });
                continue;
            };
            let email = email.to_lowercase();

            match lookup.get(&email) {
                Some(port_user) => plan.links.push(PlannedLink {
                    github_user: gh.identifier.clone(),
                    port_user: port_user.to_string(),
                    email,
                }),
                None => plan.unmatched.push(Unmatched::NoUser {
                    github_user: gh.identifier.clone(),
                    email,
                }),
            }
        }
        plan
    }
}

/// Result of applying a plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct MappingReport {
    pub linked: Vec<String>,
    pub failed: Vec<String>,
}

/// Set the `user` relation for every planned link.
///
/// A failed update is logged and recorded; the remaining links are still
/// attempted.
pub async fn apply<C: EntityApi + ?Sized>(
    client: &C,
    github_blueprint: &str,
    plan: &MappingPlan,
) -> MappingReport {
    let mut report = MappingReport::default();

    for link in &plan.links {
        let mut relations = Map::new();
        relations.insert(
            USER_RELATION.to_string(),
            Value::String(link.port_user.clone()),
        );

        match client
            .update_relations(github_blueprint, &link.github_user, relations)
            .await
        {
            Ok(()) => report.linked.push(link.github_user.clone()),
            Err(e) => {
                log::error!("Failed to update {}: {}", link.github_user, e);
                report.failed.push(link.github_user.clone());
            }
        }
    }

    report
}

/// Fetch both blueprints and build the plan.
pub async fn build_plan<C: EntityApi + ?Sized>(
    client: &C,
    user_blueprint: &str,
    github_blueprint: &str,
) -> Result<MappingPlan> {
    let port_users = client.list_entities(user_blueprint).await?;
    let github_users = client.list_entities(github_blueprint).await?;
    log::debug!(
        "Fetched {} {} and {} {} entities",
        port_users.len(),
        user_blueprint,
        github_users.len(),
        github_blueprint
    );
    Ok(MappingPlan::build(&port_users, &github_users))
}
