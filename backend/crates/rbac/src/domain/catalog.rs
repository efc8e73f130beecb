//! Permission Catalog
//!
//! The closed set of resource kinds and the actions legal on each.
//! Built once at startup; every role grant is validated against it.

use std::collections::HashMap;

use crate::domain::value_object::{
    action::{Action, ActionSet},
    resource_kind::ResourceKind,
};
use crate::error::{RbacError, RbacResult};

#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    actions: HashMap<ResourceKind, ActionSet>,
    /// Declaration order, for display
    order: Vec<ResourceKind>,
}

impl PermissionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the legal actions for a resource kind
    ///
    /// Each kind may be declared once.
    pub fn declare(
        &mut self,
        resource: ResourceKind,
        actions: impl Into<ActionSet>,
    ) -> RbacResult<()> {
        if self.actions.contains_key(&resource) {
            return Err(RbacError::DuplicateResourceKind(resource));
        }
        self.actions.insert(resource, actions.into());
        self.order.push(resource);
        Ok(())
    }

    #[inline]
    pub fn is_declared(&self, resource: ResourceKind) -> bool {
        self.actions.contains_key(&resource)
    }

    #[inline]
    pub fn is_valid_action(&self, resource: ResourceKind, action: Action) -> bool {
        self.actions_for(resource)
            .is_some_and(|legal| legal.contains(action))
    }

    /// Legal actions for `resource`, or `None` if it was never declared
    #[inline]
    pub fn actions_for(&self, resource: ResourceKind) -> Option<ActionSet> {
        self.actions.get(&resource).copied()
    }

    /// Declared kinds in declaration order
    pub fn resource_kinds(&self) -> &[ResourceKind] {
        &self.order
    }

    /// Check that `granted` only uses actions declared for `resource`
    pub(crate) fn validate_grant(
        &self,
        resource: ResourceKind,
        granted: ActionSet,
    ) -> RbacResult<()> {
        let legal = self
            .actions_for(resource)
            .ok_or_else(|| RbacError::UnknownResourceKind(resource.code().to_string()))?;

        if let Some(action) = granted.difference(&legal).iter().next() {
            return Err(RbacError::InvalidAction {
                resource: resource.code().to_string(),
                action: action.code().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PermissionCatalog {
        let mut catalog = PermissionCatalog::new();
        catalog
            .declare(ResourceKind::Invitation, [Action::Create, Action::Cancel])
            .unwrap();
        catalog
            .declare(ResourceKind::Billing, [Action::Read, Action::Create, Action::Approve])
            .unwrap();
        catalog
    }

    #[test]
    fn test_is_valid_action() {
        let catalog = catalog();
        assert!(catalog.is_valid_action(ResourceKind::Invitation, Action::Cancel));
        assert!(!catalog.is_valid_action(ResourceKind::Invitation, Action::Read));
        assert!(!catalog.is_valid_action(ResourceKind::Matter, Action::Read));
    }

    #[test]
    fn test_duplicate_declaration_fails() {
        let mut catalog = catalog();
        let err = catalog
            .declare(ResourceKind::Billing, [Action::Read])
            .unwrap_err();
        assert!(matches!(
            err,
            RbacError::DuplicateResourceKind(ResourceKind::Billing)
        ));
        // The first declaration is untouched
        assert!(catalog.is_valid_action(ResourceKind::Billing, Action::Approve));
    }

    #[test]
    fn test_declaration_order_is_kept() {
        assert_eq!(
            catalog().resource_kinds(),
            &[ResourceKind::Invitation, ResourceKind::Billing]
        );
    }

    #[test]
    fn test_validate_grant() {
        let catalog = catalog();
        assert!(
            catalog
                .validate_grant(ResourceKind::Invitation, ActionSet::from([Action::Create]))
                .is_ok()
        );

        let err = catalog
            .validate_grant(
                ResourceKind::Invitation,
                ActionSet::from([Action::Create, Action::Delete]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RbacError::InvalidAction { ref resource, ref action }
                if resource == "invitation" && action == "delete"
        ));

        let err = catalog
            .validate_grant(ResourceKind::Document, ActionSet::from([Action::Read]))
            .unwrap_err();
        assert!(matches!(err, RbacError::UnknownResourceKind(ref kind) if kind == "document"));
    }
}
