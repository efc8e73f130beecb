//! Application Configuration
//!
//! Configuration for the RBAC application layer.

use std::path::PathBuf;

/// RBAC application configuration
#[derive(Debug, Clone)]
pub struct RbacConfig {
    /// JSON policy document; `None` uses the compiled-in reference policy
    pub policy_path: Option<PathBuf>,
    /// Membership table read by the PostgreSQL resolver
    pub member_table: String,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            policy_path: None,
            member_table: "member".to_string(),
        }
    }
}

impl RbacConfig {
    /// Load the policy from a JSON document instead of the reference policy
    pub fn with_policy_path(path: impl Into<PathBuf>) -> Self {
        Self {
            policy_path: Some(path.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_reference_policy() {
        let config = RbacConfig::default();
        assert!(config.policy_path.is_none());
        assert_eq!(config.member_table, "member");
    }

    #[test]
    fn test_with_policy_path() {
        let config = RbacConfig::with_policy_path("/etc/rbac/policy.json");
        assert_eq!(
            config.policy_path.as_deref(),
            Some(std::path::Path::new("/etc/rbac/policy.json"))
        );
        assert_eq!(config.member_table, "member");
    }
}
