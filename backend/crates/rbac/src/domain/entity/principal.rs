//! Principal Entity
//!
//! An authenticated user acting inside one organization (tenant).
//! A user may hold different roles in different organizations but exactly
//! one role within the organization of the current request.

use kernel::id::{OrganizationId, UserId};

use crate::domain::value_object::role_name::RoleName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    /// Role name as stored on the membership record; resolved against the
    /// registry at authorization time
    pub role_name: RoleName,
    pub tenant_id: OrganizationId,
}

impl Principal {
    pub fn new(id: UserId, role_name: impl Into<RoleName>, tenant_id: OrganizationId) -> Self {
        Self {
            id,
            role_name: role_name.into(),
            tenant_id,
        }
    }
}
