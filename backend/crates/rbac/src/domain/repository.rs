//! Repository Traits
//!
//! Seams to collaborators owned outside this crate. Implementations live in
//! the infrastructure layer or in the calling application.

use kernel::id::{OrganizationId, ResourceId, UserId};

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{resource_kind::ResourceKind, role_name::RoleName};
use crate::error::RbacResult;

/// Membership resolver
///
/// Owned by the surrounding organization/session system.
#[trait_variant::make(MembershipRepository: Send)]
pub trait LocalMembershipRepository {
    /// Role name of `user_id` inside `organization_id`, if a member
    async fn find_role(
        &self,
        user_id: &UserId,
        organization_id: &OrganizationId,
    ) -> RbacResult<Option<RoleName>>;
}

/// Record targeted by a scoped check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub kind: ResourceKind,
    pub id: ResourceId,
}

/// Per-record ownership/assignment check ("only my matters")
///
/// Typically backed by a data-store lookup. Errors are propagated to the
/// caller of `authorize` unchanged; they never become a deny.
#[trait_variant::make(ScopePredicate: Send)]
pub trait LocalScopePredicate {
    async fn in_scope(&self, principal: &Principal, target: &Target) -> RbacResult<bool>;
}

/// Type used for `None` when no scope predicate is supplied
pub enum NoScope {}

impl ScopePredicate for NoScope {
    async fn in_scope(&self, _principal: &Principal, _target: &Target) -> RbacResult<bool> {
        match *self {}
    }
}

/// Adapter for synchronous closures
pub struct ScopeFn<F>(pub F);

impl<F> ScopePredicate for ScopeFn<F>
where
    F: Fn(&Principal, &Target) -> bool + Send + Sync,
{
    async fn in_scope(&self, principal: &Principal, target: &Target) -> RbacResult<bool> {
        Ok((self.0)(principal, target))
    }
}
