//! Role Entity
//!
//! A named bundle of per-resource grants. Roles are only built by the
//! [`RoleRegistry`](crate::domain::registry::RoleRegistry), which validates
//! every grant against the permission catalog first.

use std::collections::BTreeMap;

use crate::domain::value_object::{
    action::{Action, ActionSet},
    resource_kind::ResourceKind,
    role_name::RoleName,
};

/// Grant mapping; a missing key means no actions on that kind
pub type Grants = BTreeMap<ResourceKind, ActionSet>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    name: RoleName,
    /// Display text for role pickers
    description: String,
    grants: Grants,
}

impl Role {
    pub(crate) fn new(name: RoleName, description: String, grants: Grants) -> Self {
        // Empty sets carry no meaning; drop them so `grants()` only lists real grants.
        let grants = grants.into_iter().filter(|(_, set)| !set.is_empty()).collect();
        Self {
            name,
            description,
            grants,
        }
    }

    #[inline]
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn grants(&self) -> &Grants {
        &self.grants
    }

    /// Actions granted on `resource` (empty when the kind is absent)
    #[inline]
    pub fn actions_on(&self, resource: ResourceKind) -> ActionSet {
        self.grants.get(&resource).copied().unwrap_or_default()
    }

    #[inline]
    pub fn allows(&self, resource: ResourceKind, action: Action) -> bool {
        self.actions_on(resource).contains(action)
    }
}
