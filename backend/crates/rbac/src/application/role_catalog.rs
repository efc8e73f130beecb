//! Role Catalog Use Case
//!
//! Read-only views of the registered roles for role pickers and admin
//! screens. Nothing returned here is used for authorization.

use std::sync::Arc;

use crate::domain::entity::role::Role;
use crate::domain::policy::Policy;
use crate::domain::value_object::{action::ActionSet, resource_kind::ResourceKind};
use crate::error::{RbacError, RbacResult};

/// Role summary output
pub struct RoleSummaryOutput {
    pub name: String,
    pub description: String,
    /// Position in the hierarchy, 0 = least privileged
    pub rank: usize,
    /// Grants in catalog declaration order
    pub grants: Vec<(ResourceKind, ActionSet)>,
}

pub struct RoleCatalogUseCase {
    policy: Arc<Policy>,
}

impl RoleCatalogUseCase {
    pub fn new(policy: Arc<Policy>) -> Self {
        Self { policy }
    }

    /// All roles in registration order
    pub fn list(&self) -> RbacResult<Vec<RoleSummaryOutput>> {
        self.policy
            .registry()
            .list_roles()
            .iter()
            .map(|role| self.summarize(role))
            .collect()
    }

    pub fn get(&self, name: &str) -> RbacResult<RoleSummaryOutput> {
        let role = self
            .policy
            .registry()
            .find_role(name)
            .ok_or_else(|| RbacError::RoleNotFound(name.to_string()))?;
        self.summarize(role)
    }

    /// Grants of `role` in catalog declaration order
    pub fn grants_of(&self, role: &Role) -> Vec<(ResourceKind, ActionSet)> {
        self.policy
            .catalog()
            .resource_kinds()
            .iter()
            .map(|kind| (*kind, role.actions_on(*kind)))
            .filter(|(_, actions)| !actions.is_empty())
            .collect()
    }

    fn summarize(&self, role: &Role) -> RbacResult<RoleSummaryOutput> {
        Ok(RoleSummaryOutput {
            name: role.name().to_string(),
            description: role.description().to_string(),
            rank: self.policy.hierarchy().rank(role.name().as_str())?,
            grants: self.grants_of(role),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::action::Action;

    fn use_case() -> RoleCatalogUseCase {
        RoleCatalogUseCase::new(Arc::new(Policy::reference().unwrap()))
    }

    #[test]
    fn test_list_in_registration_order() {
        let roles = use_case().list().unwrap();
        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["owner", "partner", "associate", "paralegal", "staff", "client"]
        );
        assert_eq!(roles[0].rank, 5);
        assert_eq!(roles[5].rank, 0);
    }

    #[test]
    fn test_get_role_summary() {
        let staff = use_case().get("staff").unwrap();
        assert_eq!(
            staff.description,
            "Administrative support; view records and enter billing"
        );
        assert_eq!(staff.rank, 1);
        assert_eq!(
            staff.grants,
            vec![
                (ResourceKind::Member, ActionSet::from([Action::Read])),
                (ResourceKind::Matter, ActionSet::from([Action::Read])),
                (ResourceKind::Document, ActionSet::from([Action::Read])),
                (
                    ResourceKind::Billing,
                    ActionSet::from([Action::Read, Action::Create])
                ),
            ]
        );
    }

    #[test]
    fn test_get_unknown_role() {
        let err = use_case().get("intern").err().unwrap();
        assert!(matches!(err, RbacError::RoleNotFound(ref name) if name == "intern"));
    }
}
