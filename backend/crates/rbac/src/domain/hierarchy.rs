//! Role Hierarchy
//!
//! Total order over role names, least privileged first. This is a coarse
//! channel separate from per-resource grants: a higher rank does NOT imply
//! a superset of grants (staff may create billing entries while paralegal,
//! ranked higher, may not). Nothing here consults grants.

use std::collections::HashMap;

use crate::domain::registry::RoleRegistry;
use crate::domain::value_object::role_name::RoleName;
use crate::error::{RbacError, RbacResult};

#[derive(Debug, Clone)]
pub struct RoleHierarchy {
    order: Vec<RoleName>,
    ranks: HashMap<RoleName, usize>,
}

impl RoleHierarchy {
    /// Build from names ordered least to most privileged
    ///
    /// Every name must be registered, appear once, and every registered
    /// role must be ranked.
    pub fn new<I, N>(order: I, registry: &RoleRegistry) -> RbacResult<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<RoleName>,
    {
        let mut names = Vec::new();
        let mut ranks = HashMap::new();

        for name in order {
            let name = name.into();
            if !registry.contains(name.as_str()) {
                return Err(RbacError::UnknownRole(name));
            }
            if ranks.contains_key(&name) {
                return Err(RbacError::DuplicateRoleName(name));
            }
            ranks.insert(name.clone(), names.len());
            names.push(name);
        }

        if let Some(unranked) = registry
            .list_roles()
            .iter()
            .find(|role| !ranks.contains_key(role.name()))
        {
            return Err(RbacError::UnrankedRole(unranked.name().clone()));
        }

        Ok(Self {
            order: names,
            ranks,
        })
    }

    /// Index into the order; 0 is the least privileged role
    pub fn rank(&self, role: &str) -> RbacResult<usize> {
        self.ranks
            .get(role)
            .copied()
            .ok_or_else(|| RbacError::UnknownRole(RoleName::from(role)))
    }

    /// `rank(a) >= rank(b)`
    pub fn at_least(&self, a: &str, b: &str) -> RbacResult<bool> {
        Ok(self.rank(a)? >= self.rank(b)?)
    }

    /// Names from least to most privileged
    pub fn order(&self) -> &[RoleName] {
        &self.order
    }
}
