//! Role Registry
//!
//! Named roles whose grants have been validated against the
//! [`PermissionCatalog`]. Invalid grants fail here, at construction,
//! never later at authorization time.

use std::collections::HashMap;

use crate::domain::catalog::PermissionCatalog;
use crate::domain::entity::role::{Grants, Role};
use crate::domain::value_object::{
    action::Action, resource_kind::ResourceKind, role_name::RoleName,
};
use crate::error::{RbacError, RbacResult};

#[derive(Debug, Clone)]
pub struct RoleRegistry {
    catalog: PermissionCatalog,
    /// Insertion order
    roles: Vec<Role>,
    index: HashMap<RoleName, usize>,
}

impl RoleRegistry {
    pub fn new(catalog: PermissionCatalog) -> Self {
        Self {
            catalog,
            roles: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Define a role without a display description
    pub fn define_role(&mut self, name: impl Into<RoleName>, grants: Grants) -> RbacResult<&Role> {
        self.define_described_role(name, String::new(), grants)
    }

    /// Define a role
    ///
    /// ## Errors
    /// * `UnknownResourceKind` - a grant references an undeclared kind
    /// * `InvalidAction` - a grant uses an action not legal for its kind
    /// * `DuplicateRoleName` - `name` is already registered
    pub fn define_described_role(
        &mut self,
        name: impl Into<RoleName>,
        description: impl Into<String>,
        grants: Grants,
    ) -> RbacResult<&Role> {
        let name = name.into();

        for (resource, actions) in &grants {
            self.catalog.validate_grant(*resource, *actions)?;
        }

        if self.index.contains_key(&name) {
            return Err(RbacError::DuplicateRoleName(name));
        }

        let position = self.roles.len();
        self.index.insert(name.clone(), position);
        self.roles.push(Role::new(name, description.into(), grants));

        Ok(&self.roles[position])
    }

    pub fn get_role(&self, name: &str) -> RbacResult<&Role> {
        self.find_role(name)
            .ok_or_else(|| RbacError::UnknownRole(RoleName::from(name)))
    }

    pub fn find_role(&self, name: &str) -> Option<&Role> {
        self.index.get(name).map(|&position| &self.roles[position])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All roles in insertion order. Display only.
    pub fn list_roles(&self) -> &[Role] {
        &self.roles
    }

    /// Pure lookup: `action` is in `role`'s grant for `resource`
    #[inline]
    pub fn has_permission(&self, role: &Role, resource: ResourceKind, action: Action) -> bool {
        role.allows(resource, action)
    }
}
