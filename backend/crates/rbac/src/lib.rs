//! RBAC (Role-Based Access Control) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Permission catalog, role registry, hierarchy, policy, traits
//! - `application/` - Authorization evaluator and use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Model
//! - Closed catalog of resource kinds and their legal actions
//! - Roles (owner, partner, associate, paralegal, staff, client) with
//!   per-resource grants validated at startup
//! - Role hierarchy for coarse "at least" checks, independent of grants
//! - Matters and documents are scope-restricted: a targeted check also
//!   needs a caller-supplied ownership/assignment predicate
//!
//! ## Failure Model
//! - Denials are `Decision` values, never errors
//! - Configuration/integrity faults are errors and are never turned into a deny

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{Authorizer, RbacConfig, load_policy};
pub use domain::{Decision, Policy, Principal};
pub use error::{RbacError, RbacResult};
pub use infra::postgres::PgMembershipRepository;
pub use presentation::router::rbac_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
