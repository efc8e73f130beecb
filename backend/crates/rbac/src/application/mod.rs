//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod config;
pub mod policy_loader;
pub mod resolve_principal;
pub mod role_catalog;

// Re-exports
pub use authorize::Authorizer;
pub use config::RbacConfig;
pub use policy_loader::{PolicyDocument, load_policy};
pub use resolve_principal::ResolvePrincipalUseCase;
pub use role_catalog::{RoleCatalogUseCase, RoleSummaryOutput};
