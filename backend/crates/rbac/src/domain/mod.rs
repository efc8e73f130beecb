//! Domain Layer
//!
//! Permission catalog, role registry, role hierarchy and the policy that
//! bundles them, plus the traits for collaborators.

pub mod catalog;
pub mod entity;
pub mod hierarchy;
pub mod policy;
pub mod registry;
pub mod repository;
pub mod value_object;

// Re-exports
pub use catalog::PermissionCatalog;
pub use entity::{decision::Decision, principal::Principal, role::Role};
pub use hierarchy::RoleHierarchy;
pub use policy::Policy;
pub use registry::RoleRegistry;
pub use repository::{MembershipRepository, NoScope, ScopeFn, ScopePredicate, Target};
