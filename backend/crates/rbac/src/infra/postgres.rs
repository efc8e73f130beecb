//! PostgreSQL Membership Resolver
//!
//! Reads the organization membership table maintained by the auth system.
//! Expected columns: `user_id uuid`, `organization_id uuid`, `role text`.
//! A user holds at most one role per organization; several rows for the
//! same pair are reported as `AmbiguousMembership` instead of picking one.

use kernel::id::{OrganizationId, UserId};
use sqlx::PgPool;

use crate::domain::repository::MembershipRepository;
use crate::domain::value_object::role_name::RoleName;
use crate::error::{RbacError, RbacResult};

/// PostgreSQL-backed membership repository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
    find_role_sql: String,
}

impl PgMembershipRepository {
    /// Table name is interpolated into SQL, so only plain identifiers
    /// (optionally schema-qualified) are accepted.
    pub fn new(pool: PgPool, member_table: &str) -> RbacResult<Self> {
        if !is_plain_identifier(member_table) {
            return Err(RbacError::Internal(format!(
                "Invalid membership table name: {member_table}"
            )));
        }

        Ok(Self {
            pool,
            find_role_sql: format!(
                "SELECT role FROM {member_table} WHERE user_id = $1 AND organization_id = $2"
            ),
        })
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

impl MembershipRepository for PgMembershipRepository {
    async fn find_role(
        &self,
        user_id: &UserId,
        organization_id: &OrganizationId,
    ) -> RbacResult<Option<RoleName>> {
        let roles = sqlx::query_scalar::<_, String>(&self.find_role_sql)
            .bind(user_id.as_uuid())
            .bind(organization_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        single_role(roles, user_id, organization_id)
    }
}

fn single_role(
    mut roles: Vec<String>,
    user_id: &UserId,
    organization_id: &OrganizationId,
) -> RbacResult<Option<RoleName>> {
    if roles.len() > 1 {
        return Err(RbacError::AmbiguousMembership {
            user_id: *user_id,
            organization_id: *organization_id,
        });
    }

    Ok(roles.pop().map(RoleName::from))
}
