//! RBAC Error Types
//!
//! Two classes of failure live here. Configuration and integrity faults
//! (catalog/registry construction, unknown stored roles, missing scope
//! predicates) are hard errors and are never turned into a deny. Routine
//! denials are not errors at all: they are [`Decision`] values, and only
//! become [`RbacError::Forbidden`] at the HTTP boundary.
//!
//! [`Decision`]: crate::domain::entity::decision::Decision

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use kernel::id::{OrganizationId, UserId};

use crate::domain::entity::decision::ReasonCode;
use crate::domain::value_object::{resource_kind::ResourceKind, role_name::RoleName};

/// RBAC result type alias
pub type RbacResult<T> = Result<T, RbacError>;

#[derive(Debug, Error)]
pub enum RbacError {
    /// A resource kind was declared twice in the permission catalog
    #[error("Resource kind declared twice: {0}")]
    DuplicateResourceKind(ResourceKind),

    /// A grant or setting references a resource kind missing from the catalog
    #[error("Unknown resource kind: {0}")]
    UnknownResourceKind(String),

    /// A grant includes an action that is not legal for the resource kind
    #[error("Action '{action}' is not declared for resource kind '{resource}'")]
    InvalidAction { resource: String, action: String },

    /// A policy document grants the same resource kind twice within one role
    #[error("Role '{role}' grants resource kind '{resource}' more than once")]
    DuplicateGrant {
        role: RoleName,
        resource: ResourceKind,
    },

    /// A role name was defined twice
    #[error("Role defined twice: {0}")]
    DuplicateRoleName(RoleName),

    /// A principal or hierarchy references a role that is not registered
    #[error("Unknown role: {0}")]
    UnknownRole(RoleName),

    /// A registered role is missing from the role hierarchy
    #[error("Role is not ranked in the hierarchy: {0}")]
    UnrankedRole(RoleName),

    /// A targeted check on a scope-restricted resource kind had no scope predicate
    #[error("Scope predicate required for targeted check on '{0}'")]
    MissingScopePredicate(ResourceKind),

    /// Role lookup for display (not an integrity fault)
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    /// More than one membership row for a single (user, organization)
    #[error("User {user_id} holds several roles in organization {organization_id}")]
    AmbiguousMembership {
        user_id: UserId,
        organization_id: OrganizationId,
    },

    /// Malformed query parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// No identity on the request
    #[error("Authentication required")]
    Unauthenticated,

    /// The identity has no membership in the requested organization
    #[error("Not a member of this organization")]
    NotMember,

    /// A deny decision, surfaced at the HTTP boundary
    #[error("Access denied: {}", .0.code())]
    Forbidden(ReasonCode),

    /// The caller-supplied scope predicate failed
    #[error("Scope check failed: {0}")]
    ScopeCheck(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Policy document could not be parsed
    #[error("Invalid policy document: {0}")]
    PolicyDocument(#[from] serde_json::Error),

    /// Policy document could not be read
    #[error("Failed to read policy document: {0}")]
    PolicyRead(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RbacError {
    /// Wrap an error raised by a scope predicate
    pub fn scope_check<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RbacError::ScopeCheck(Box::new(err))
    }

    /// Configuration or integrity fault, as opposed to an access outcome
    pub fn is_fault(&self) -> bool {
        !matches!(
            self,
            RbacError::RoleNotFound(_)
                | RbacError::InvalidQuery(_)
                | RbacError::Unauthenticated
                | RbacError::NotMember
                | RbacError::Forbidden(_)
        )
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RbacError::RoleNotFound(_) => ErrorKind::NotFound,
            RbacError::InvalidQuery(_) => ErrorKind::BadRequest,
            RbacError::Unauthenticated => ErrorKind::Unauthorized,
            RbacError::NotMember | RbacError::Forbidden(_) => ErrorKind::Forbidden,
            RbacError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            RbacError::DuplicateResourceKind(_)
            | RbacError::UnknownResourceKind(_)
            | RbacError::InvalidAction { .. }
            | RbacError::DuplicateGrant { .. }
            | RbacError::DuplicateRoleName(_)
            | RbacError::UnknownRole(_)
            | RbacError::UnrankedRole(_)
            | RbacError::MissingScopePredicate(_)
            | RbacError::AmbiguousMembership { .. }
            | RbacError::ScopeCheck(_)
            | RbacError::PolicyDocument(_)
            | RbacError::PolicyRead(_)
            | RbacError::Database(_)
            | RbacError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Fault details stay in the logs; the response only names the class.
    pub fn to_app_error(&self) -> AppError {
        match self {
            RbacError::Forbidden(reason) => {
                AppError::forbidden("Access denied").with_code(reason.code())
            }
            RbacError::NotMember => AppError::forbidden(self.to_string()).with_code("NOT_MEMBER"),
            RbacError::InvalidQuery(_) => {
                AppError::bad_request(self.to_string()).with_code("INVALID_QUERY")
            }
            err if err.is_fault() => AppError::new(err.kind(), "Authorization is unavailable"),
            err => AppError::new(err.kind(), err.to_string()),
        }
    }

    fn log(&self) {
        match self {
            RbacError::Database(e) => {
                tracing::error!(error = %e, "RBAC database error");
            }
            RbacError::ScopeCheck(e) => {
                tracing::error!(error = %e, "Scope predicate failed");
            }
            RbacError::Forbidden(reason) => {
                tracing::warn!(reason = reason.code(), "Access denied");
            }
            RbacError::NotMember => {
                tracing::warn!("Request from non-member of organization");
            }
            RbacError::Unauthenticated
            | RbacError::RoleNotFound(_)
            | RbacError::InvalidQuery(_) => {
                tracing::debug!(error = %self, "RBAC error");
            }
            _ => {
                tracing::error!(error = %self, "RBAC integrity fault");
            }
        }
    }
}

impl IntoResponse for RbacError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<RbacError> for AppError {
    fn from(err: RbacError) -> Self {
        let app_err = err.to_app_error();
        app_err.with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denials_are_not_faults() {
        assert!(!RbacError::Forbidden(ReasonCode::OutOfScope).is_fault());
        assert!(!RbacError::Unauthenticated.is_fault());
        assert!(RbacError::UnknownRole(RoleName::from("ghost")).is_fault());
        assert!(RbacError::MissingScopePredicate(ResourceKind::Matter).is_fault());
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(RbacError::Unauthenticated.kind(), ErrorKind::Unauthorized);
        assert_eq!(RbacError::NotMember.kind(), ErrorKind::Forbidden);
        assert_eq!(
            RbacError::Forbidden(ReasonCode::InsufficientRolePermission).kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            RbacError::RoleNotFound("ghost".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            RbacError::UnknownRole(RoleName::from("ghost")).kind(),
            ErrorKind::InternalServerError
        );
        assert_eq!(
            RbacError::Database(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            RbacError::InvalidQuery("missing field `action`".into()).kind(),
            ErrorKind::BadRequest
        );
        assert!(!RbacError::InvalidQuery(String::new()).is_fault());
    }

    #[test]
    fn test_forbidden_carries_reason_code() {
        let app_err = RbacError::Forbidden(ReasonCode::OutOfScope).to_app_error();
        assert_eq!(app_err.status_code(), 403);
        assert_eq!(app_err.code(), Some("OUT_OF_SCOPE"));
    }

    #[test]
    fn test_fault_message_hides_details() {
        let app_err = RbacError::UnknownRole(RoleName::from("ghost")).to_app_error();
        assert_eq!(app_err.status_code(), 500);
        assert!(!app_err.message().contains("ghost"));
    }
}
