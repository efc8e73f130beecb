//! RBAC Middleware
//!
//! `resolve_principal` turns the session layer's [`Identity`] into a
//! [`Principal`]; `require_permission` guards a route with a
//! collection-level check. Both are mounted with
//! `axum::middleware::from_fn` closures:
//!
//! ```ignore
//! router.route_layer(axum::middleware::from_fn(move |req, next| {
//!     require_permission(
//!         policy.clone(),
//!         Requirement::new(ResourceKind::Matter, Action::Create),
//!         req,
//!         next,
//!     )
//! }))
//! ```

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::{OrganizationId, UserId};
use std::sync::Arc;

use crate::application::{Authorizer, ResolvePrincipalUseCase};
use crate::domain::entity::principal::Principal;
use crate::domain::policy::Policy;
use crate::domain::repository::MembershipRepository;
use crate::domain::value_object::{action::Action, resource_kind::ResourceKind};
use crate::error::RbacError;
use crate::presentation::handlers::RbacAppState;

/// Authenticated identity, inserted into request extensions by the
/// session layer in front of this crate's routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub organization_id: OrganizationId,
}

/// (resource, action) a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub resource: ResourceKind,
    pub action: Action,
}

impl Requirement {
    pub const fn new(resource: ResourceKind, action: Action) -> Self {
        Self { resource, action }
    }
}

/// Middleware that resolves the current [`Principal`]
///
/// 401 without an [`Identity`], 403 when the user is not a member of the
/// organization.
pub async fn resolve_principal<M>(
    state: RbacAppState<M>,
    mut req: Request,
    next: Next,
) -> Result<Response, RbacError>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    let identity = req
        .extensions()
        .get::<Identity>()
        .copied()
        .ok_or(RbacError::Unauthenticated)?;

    let use_case = ResolvePrincipalUseCase::new(state.membership_repo.clone());
    let principal = use_case
        .execute(identity.user_id, identity.organization_id)
        .await?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Middleware that requires a collection-level grant
///
/// Deny → 403 with the reason code. Integrity faults (unknown stored role)
/// → 500; they are never reported as a deny.
pub async fn require_permission(
    policy: Arc<Policy>,
    requirement: Requirement,
    req: Request,
    next: Next,
) -> Result<Response, RbacError> {
    let principal = req
        .extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| {
            RbacError::Internal("require_permission mounted without resolve_principal".into())
        })?;

    Authorizer::new(policy)
        .authorize_collection(&principal, requirement.resource, requirement.action)
        .await?
        .into_result()?;

    Ok(next.run(req).await)
}
