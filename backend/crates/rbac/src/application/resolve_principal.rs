//! Resolve Principal Use Case
//!
//! Turns an authenticated (user, organization) pair into a [`Principal`]
//! through the membership resolver. The stored role name is passed through
//! untouched; whether it is registered is checked at authorization time.

use std::sync::Arc;

use kernel::id::{OrganizationId, UserId};

use crate::domain::entity::principal::Principal;
use crate::domain::repository::MembershipRepository;
use crate::error::{RbacError, RbacResult};

pub struct ResolvePrincipalUseCase<M>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    membership_repo: Arc<M>,
}

impl<M> ResolvePrincipalUseCase<M>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    pub fn new(membership_repo: Arc<M>) -> Self {
        Self { membership_repo }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> RbacResult<Principal> {
        let role_name = self
            .membership_repo
            .find_role(&user_id, &organization_id)
            .await?
            .ok_or(RbacError::NotMember)?;

        Ok(Principal::new(user_id, role_name, organization_id))
    }
}
