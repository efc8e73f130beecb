//! RBAC Router

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    routing::get,
};
use std::sync::Arc;

use crate::domain::policy::Policy;
use crate::domain::repository::MembershipRepository;
use crate::infra::postgres::PgMembershipRepository;
use crate::presentation::handlers::{self, RbacAppState};
use crate::presentation::middleware::resolve_principal;

/// Create the RBAC router with the PostgreSQL membership resolver
pub fn rbac_router(repo: PgMembershipRepository, policy: Arc<Policy>) -> Router {
    rbac_router_generic(repo, policy)
}

/// Create the RBAC router for any membership resolver
///
/// `/roles` is public display data. `/permissions` and `/check` need an
/// `Identity` in the request extensions.
pub fn rbac_router_generic<M>(repo: M, policy: Arc<Policy>) -> Router
where
    M: MembershipRepository + Send + Sync + 'static,
{
    let state = RbacAppState {
        membership_repo: Arc::new(repo),
        policy,
    };

    let principal_state = state.clone();
    let principal_routes = Router::new()
        .route("/permissions", get(handlers::current_permissions::<M>))
        .route("/check", get(handlers::check_permission::<M>))
        .route_layer(middleware::from_fn(move |req: Request, next: Next| {
            resolve_principal(principal_state.clone(), req, next)
        }));

    Router::new()
        .route("/roles", get(handlers::list_roles::<M>))
        .route("/roles/{name}", get(handlers::get_role::<M>))
        .merge(principal_routes)
        .with_state(state)
}
