//! HTTP Handlers

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::{Authorizer, RoleCatalogUseCase};
use crate::domain::entity::decision::Decision;
use crate::domain::entity::principal::Principal;
use crate::domain::policy::Policy;
use crate::domain::repository::MembershipRepository;
use crate::error::{RbacError, RbacResult};
use crate::presentation::dto::{
    CheckQuery, GrantResponse, PermissionsResponse, RoleListResponse, RoleResponse,
};

/// Shared state for RBAC handlers and middleware
pub struct RbacAppState<M>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    pub membership_repo: Arc<M>,
    pub policy: Arc<Policy>,
}

impl<M> Clone for RbacAppState<M>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            membership_repo: self.membership_repo.clone(),
            policy: self.policy.clone(),
        }
    }
}

// ============================================================================
// Roles (display only)
// ============================================================================

/// GET /api/rbac/roles
pub async fn list_roles<M>(
    State(state): State<RbacAppState<M>>,
) -> RbacResult<Json<RoleListResponse>>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    let use_case = RoleCatalogUseCase::new(state.policy.clone());

    let roles = use_case
        .list()?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(RoleListResponse { roles }))
}

/// GET /api/rbac/roles/{name}
pub async fn get_role<M>(
    State(state): State<RbacAppState<M>>,
    Path(name): Path<String>,
) -> RbacResult<Json<RoleResponse>>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    let use_case = RoleCatalogUseCase::new(state.policy.clone());

    Ok(Json(use_case.get(&name)?.into()))
}

// ============================================================================
// Current principal
// ============================================================================

/// GET /api/rbac/permissions
pub async fn current_permissions<M>(
    State(state): State<RbacAppState<M>>,
    Extension(principal): Extension<Principal>,
) -> RbacResult<Json<PermissionsResponse>>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    let authorizer = Authorizer::new(state.policy.clone());
    let role = authorizer.role_of(&principal)?;

    let use_case = RoleCatalogUseCase::new(state.policy.clone());
    let grants = use_case
        .grants_of(role)
        .into_iter()
        .map(GrantResponse::from)
        .collect();

    Ok(Json(PermissionsResponse {
        user_id: principal.id.to_string(),
        organization_id: principal.tenant_id.to_string(),
        role: principal.role_name.to_string(),
        grants,
    }))
}

/// GET /api/rbac/check?resource=matter&action=create
///
/// Collection-level check for UI affordances. A deny is a normal 200
/// response carrying the decision. Unparseable parameters → 400 problem body.
pub async fn check_permission<M>(
    State(state): State<RbacAppState<M>>,
    Extension(principal): Extension<Principal>,
    query: Result<Query<CheckQuery>, QueryRejection>,
) -> RbacResult<Json<Decision>>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|rejection| RbacError::InvalidQuery(rejection.body_text()))?;
    let authorizer = Authorizer::new(state.policy.clone());

    let decision = authorizer
        .authorize_collection(&principal, query.resource, query.action)
        .await?;

    Ok(Json(decision))
}
