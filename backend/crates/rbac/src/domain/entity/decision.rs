//! Decision Entity
//!
//! Outcome of one authorization check.

use serde::Serialize;

/// Why a check was allowed or denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    Granted,
    /// The role has no grant for the (resource, action) pair
    InsufficientRolePermission,
    /// The role has the grant but the scope predicate rejected the target
    OutOfScope,
}

impl ReasonCode {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ReasonCode::Granted => "GRANTED",
            ReasonCode::InsufficientRolePermission => "INSUFFICIENT_ROLE_PERMISSION",
            ReasonCode::OutOfScope => "OUT_OF_SCOPE",
        }
    }
}

/// Allow/deny plus reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub allow: bool,
    pub reason: ReasonCode,
}

impl Decision {
    pub const fn granted() -> Self {
        Self {
            allow: true,
            reason: ReasonCode::Granted,
        }
    }

    pub const fn denied(reason: ReasonCode) -> Self {
        Self {
            allow: false,
            reason,
        }
    }

    #[inline]
    pub const fn is_allowed(&self) -> bool {
        self.allow
    }

    /// Turn a deny into `RbacError::Forbidden` for callers that want `?`
    pub fn into_result(self) -> crate::error::RbacResult<()> {
        if self.allow {
            Ok(())
        } else {
            Err(crate::error::RbacError::Forbidden(self.reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RbacError;

    #[test]
    fn test_decision_constructors() {
        assert!(Decision::granted().is_allowed());
        assert_eq!(Decision::granted().reason, ReasonCode::Granted);

        let denied = Decision::denied(ReasonCode::OutOfScope);
        assert!(!denied.is_allowed());
        assert_eq!(denied.reason, ReasonCode::OutOfScope);
    }

    #[test]
    fn test_into_result() {
        assert!(Decision::granted().into_result().is_ok());
        let err = Decision::denied(ReasonCode::InsufficientRolePermission)
            .into_result()
            .unwrap_err();
        assert!(matches!(
            err,
            RbacError::Forbidden(ReasonCode::InsufficientRolePermission)
        ));
    }

    #[test]
    fn test_decision_serialize() {
        let json = serde_json::to_value(Decision::denied(ReasonCode::OutOfScope)).unwrap();
        assert_eq!(json["allow"], false);
        assert_eq!(json["reason"], "OUT_OF_SCOPE");
    }
}
