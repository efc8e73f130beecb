//! Authorization Evaluator
//!
//! Decides allow/deny for one (principal, resource, action[, target])
//! request against the shared immutable [`Policy`].
//!
//! ## Algorithm
//! 1. Resolve the principal's role. An unregistered role name is an
//!    integrity fault (`UnknownRole`), not a deny.
//! 2. No grant for (resource, action) → deny `InsufficientRolePermission`.
//! 3. Scope-restricted kind with a target → a scope predicate is required
//!    (`MissingScopePredicate` otherwise); a `false` answer → deny
//!    `OutOfScope`.
//! 4. Scope-restricted kind without a target is a collection-level check;
//!    the grant alone decides.
//! 5. Otherwise → allow `Granted`.
//!
//! The evaluator holds no mutable state and may be cloned into any number
//! of concurrent tasks. The scope predicate is awaited in place, so
//! timeouts and cancellation are whatever the caller's future imposes.

use std::sync::Arc;

use kernel::id::ResourceId;

use crate::domain::entity::decision::{Decision, ReasonCode};
use crate::domain::entity::principal::Principal;
use crate::domain::entity::role::Role;
use crate::domain::policy::Policy;
use crate::domain::repository::{NoScope, ScopePredicate, Target};
use crate::domain::value_object::{action::Action, resource_kind::ResourceKind};
use crate::error::{RbacError, RbacResult};

#[derive(Debug, Clone)]
pub struct Authorizer {
    policy: Arc<Policy>,
}

impl Authorizer {
    pub fn new(policy: Arc<Policy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Authorize a request, optionally against a specific record
    pub async fn authorize<P>(
        &self,
        principal: &Principal,
        resource: ResourceKind,
        action: Action,
        target: Option<ResourceId>,
        scope: Option<&P>,
    ) -> RbacResult<Decision>
    where
        P: ScopePredicate + Sync,
    {
        let registry = self.policy.registry();
        let role = registry.get_role(principal.role_name.as_str())?;

        if !registry.has_permission(role, resource, action) {
            return Ok(self.decide(
                principal,
                resource,
                action,
                Decision::denied(ReasonCode::InsufficientRolePermission),
            ));
        }

        if let Some(id) = target.filter(|_| self.policy.is_scope_restricted(resource)) {
            let scope = scope.ok_or(RbacError::MissingScopePredicate(resource))?;
            let target = Target { kind: resource, id };

            if !scope.in_scope(principal, &target).await? {
                return Ok(self.decide(
                    principal,
                    resource,
                    action,
                    Decision::denied(ReasonCode::OutOfScope),
                ));
            }
        }

        Ok(self.decide(principal, resource, action, Decision::granted()))
    }

    /// Collection-level check ("may this principal create matters at all")
    pub async fn authorize_collection(
        &self,
        principal: &Principal,
        resource: ResourceKind,
        action: Action,
    ) -> RbacResult<Decision> {
        self.authorize::<NoScope>(principal, resource, action, None, None)
            .await
    }

    /// Coarse hierarchy check: principal's role ranks at or above `minimum`
    ///
    /// Does not consult grants. A `true` here says nothing about whether
    /// `authorize` would allow any particular action.
    pub fn at_least(&self, principal: &Principal, minimum: &str) -> RbacResult<bool> {
        self.policy
            .hierarchy()
            .at_least(principal.role_name.as_str(), minimum)
    }

    /// Registered role of the principal
    pub fn role_of(&self, principal: &Principal) -> RbacResult<&Role> {
        self.policy
            .registry()
            .get_role(principal.role_name.as_str())
    }

    fn decide(
        &self,
        principal: &Principal,
        resource: ResourceKind,
        action: Action,
        decision: Decision,
    ) -> Decision {
        tracing::debug!(
            user_id = %principal.id,
            organization_id = %principal.tenant_id,
            role = %principal.role_name,
            resource = resource.code(),
            action = action.code(),
            allow = decision.allow,
            reason = decision.reason.code(),
            "Authorization decision"
        );
        decision
    }
}
