//! Policy
//!
//! Immutable bundle of catalog, registry, hierarchy and the set of
//! scope-restricted resource kinds. Built once at startup, then shared
//! read-only (behind `Arc`) by every request.

use std::collections::BTreeSet;

use crate::domain::catalog::PermissionCatalog;
use crate::domain::entity::role::Grants;
use crate::domain::hierarchy::RoleHierarchy;
use crate::domain::registry::RoleRegistry;
use crate::domain::value_object::{action::Action, resource_kind::ResourceKind};
use crate::error::{RbacError, RbacResult};

#[derive(Debug, Clone)]
pub struct Policy {
    registry: RoleRegistry,
    hierarchy: RoleHierarchy,
    scope_restricted: BTreeSet<ResourceKind>,
}

impl Policy {
    /// Assemble a policy; scope-restricted kinds must be declared in the catalog
    pub fn new(
        registry: RoleRegistry,
        hierarchy: RoleHierarchy,
        scope_restricted: impl IntoIterator<Item = ResourceKind>,
    ) -> RbacResult<Self> {
        let scope_restricted: BTreeSet<ResourceKind> = scope_restricted.into_iter().collect();

        if let Some(kind) = scope_restricted
            .iter()
            .find(|kind| !registry.catalog().is_declared(**kind))
        {
            return Err(RbacError::UnknownResourceKind(kind.code().to_string()));
        }

        Ok(Self {
            registry,
            hierarchy,
            scope_restricted,
        })
    }

    /// The practice-management reference policy
    pub fn reference() -> RbacResult<Self> {
        use Action::*;
        use ResourceKind::*;

        let mut catalog = PermissionCatalog::new();
        catalog.declare(Organization, [Update, Delete])?;
        catalog.declare(Member, [Create, Read, Update, Delete])?;
        catalog.declare(Invitation, [Create, Cancel])?;
        catalog.declare(Matter, [Create, Read, Update, Delete, Assign])?;
        catalog.declare(Document, [Create, Read, Update, Delete, Share])?;
        catalog.declare(Billing, [Read, Create, Approve])?;

        let mut registry = RoleRegistry::new(catalog);

        registry.define_described_role(
            "owner",
            "Full access to the firm, including settings and billing",
            Grants::from([
                (Organization, [Update, Delete].into()),
                (Member, [Create, Read, Update, Delete].into()),
                (Invitation, [Create, Cancel].into()),
                (Matter, [Create, Read, Update, Delete, Assign].into()),
                (Document, [Create, Read, Update, Delete, Share].into()),
                (Billing, [Read, Create, Approve].into()),
            ]),
        )?;
        registry.define_described_role(
            "partner",
            "Manage members, matters, documents and billing",
            Grants::from([
                (Member, [Create, Read, Update, Delete].into()),
                (Invitation, [Create, Cancel].into()),
                (Matter, [Create, Read, Update, Delete, Assign].into()),
                (Document, [Create, Read, Update, Delete, Share].into()),
                (Billing, [Read, Create, Approve].into()),
            ]),
        )?;
        registry.define_described_role(
            "associate",
            "Work on assigned matters and their documents",
            Grants::from([
                (Member, [Read].into()),
                (Matter, [Read, Update].into()),
                (Document, [Create, Read, Update, Delete].into()),
                (Billing, [Read].into()),
            ]),
        )?;
        registry.define_described_role(
            "paralegal",
            "Support assigned matters; draft and edit documents",
            Grants::from([
                (Member, [Read].into()),
                (Matter, [Read].into()),
                (Document, [Create, Read, Update].into()),
                (Billing, [Read].into()),
            ]),
        )?;
        registry.define_described_role(
            "staff",
            "Administrative support; view records and enter billing",
            Grants::from([
                (Member, [Read].into()),
                (Matter, [Read].into()),
                (Document, [Read].into()),
                (Billing, [Read, Create].into()),
            ]),
        )?;
        registry.define_described_role(
            "client",
            "View own matters and shared documents",
            Grants::from([(Matter, [Read].into()), (Document, [Read].into())]),
        )?;

        let hierarchy = RoleHierarchy::new(
            ["client", "staff", "paralegal", "associate", "partner", "owner"],
            &registry,
        )?;

        Self::new(registry, hierarchy, [Matter, Document])
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        self.registry.catalog()
    }

    pub fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    /// Grants on this kind never suffice for a targeted check
    #[inline]
    pub fn is_scope_restricted(&self, resource: ResourceKind) -> bool {
        self.scope_restricted.contains(&resource)
    }

    pub fn scope_restricted(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.scope_restricted.iter().copied()
    }
}
