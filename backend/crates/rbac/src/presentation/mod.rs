//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::RbacAppState;
pub use middleware::{Identity, Requirement, require_permission, resolve_principal};
pub use router::{rbac_router, rbac_router_generic};
