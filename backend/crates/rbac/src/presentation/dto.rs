//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::RoleSummaryOutput;
use crate::domain::value_object::{
    action::{Action, ActionSet},
    resource_kind::ResourceKind,
};

// ============================================================================
// Roles
// ============================================================================

/// Actions granted on one resource kind
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantResponse {
    pub resource: ResourceKind,
    pub actions: ActionSet,
}

impl From<(ResourceKind, ActionSet)> for GrantResponse {
    fn from((resource, actions): (ResourceKind, ActionSet)) -> Self {
        Self { resource, actions }
    }
}

/// Role for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub name: String,
    pub description: String,
    pub rank: usize,
    pub grants: Vec<GrantResponse>,
}

impl From<RoleSummaryOutput> for RoleResponse {
    fn from(output: RoleSummaryOutput) -> Self {
        Self {
            name: output.name,
            description: output.description,
            rank: output.rank,
            grants: output.grants.into_iter().map(GrantResponse::from).collect(),
        }
    }
}

/// Role list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleListResponse {
    pub roles: Vec<RoleResponse>,
}

// ============================================================================
// Current principal
// ============================================================================

/// Effective grants of the current principal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsResponse {
    pub user_id: String,
    pub organization_id: String,
    pub role: String,
    pub grants: Vec<GrantResponse>,
}

/// Collection-level check request (query string)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckQuery {
    pub resource: ResourceKind,
    pub action: Action,
}
