//! Policy Loading
//!
//! Builds the startup [`Policy`] either from the compiled-in reference
//! policy or from a JSON document. A document goes through exactly the same
//! catalog/registry/hierarchy validation, so any fault aborts startup.
//!
//! ```json
//! {
//!   "resources": [{ "kind": "matter", "actions": ["create", "read"] }],
//!   "roles": [{ "name": "owner", "description": "...", "grants": { "matter": ["read"] } }],
//!   "hierarchy": ["owner"],
//!   "scopeRestricted": ["matter"]
//! }
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::application::config::RbacConfig;
use crate::domain::catalog::PermissionCatalog;
use crate::domain::entity::role::Grants;
use crate::domain::hierarchy::RoleHierarchy;
use crate::domain::policy::Policy;
use crate::domain::registry::RoleRegistry;
use crate::domain::value_object::{
    action::{Action, ActionSet},
    resource_kind::ResourceKind,
};
use crate::error::{RbacError, RbacResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PolicyDocument {
    pub resources: Vec<ResourceDocument>,
    pub roles: Vec<RoleDocument>,
    /// Least privileged first
    pub hierarchy: Vec<String>,
    #[serde(default)]
    pub scope_restricted: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDocument {
    pub kind: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Resource kind → actions, in document order; repeated keys are kept
    #[serde(default, deserialize_with = "grant_entries")]
    pub grants: Vec<(String, Vec<String>)>,
}

/// Read a JSON object without collapsing repeated keys
fn grant_entries<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<String>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct GrantEntries;

    impl<'de> Visitor<'de> for GrantEntries {
        type Value = Vec<(String, Vec<String>)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of resource kind to actions")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(GrantEntries)
}

impl PolicyDocument {
    pub fn from_json(json: &str) -> RbacResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and build the policy
    pub fn into_policy(self) -> RbacResult<Policy> {
        let mut catalog = PermissionCatalog::new();
        for resource in &self.resources {
            let kind = parse_kind(&resource.kind)?;
            catalog.declare(kind, parse_actions(kind, &resource.actions)?)?;
        }

        let mut registry = RoleRegistry::new(catalog);
        for role in self.roles {
            let mut grants = Grants::new();
            for (kind, actions) in &role.grants {
                let kind = parse_kind(kind)?;
                if grants.insert(kind, parse_actions(kind, actions)?).is_some() {
                    return Err(RbacError::DuplicateGrant {
                        role: role.name.into(),
                        resource: kind,
                    });
                }
            }
            registry.define_described_role(role.name, role.description, grants)?;
        }

        let hierarchy = RoleHierarchy::new(self.hierarchy, &registry)?;

        let scope_restricted = self
            .scope_restricted
            .iter()
            .map(|kind| parse_kind(kind))
            .collect::<RbacResult<Vec<_>>>()?;

        Policy::new(registry, hierarchy, scope_restricted)
    }
}

fn parse_kind(code: &str) -> RbacResult<ResourceKind> {
    ResourceKind::from_code(code).ok_or_else(|| RbacError::UnknownResourceKind(code.to_string()))
}

fn parse_actions(kind: ResourceKind, codes: &[String]) -> RbacResult<ActionSet> {
    codes
        .iter()
        .map(|code| {
            Action::from_code(code).ok_or_else(|| RbacError::InvalidAction {
                resource: kind.code().to_string(),
                action: code.clone(),
            })
        })
        .collect()
}

/// Build the startup policy described by `config`
pub async fn load_policy(config: &RbacConfig) -> RbacResult<Policy> {
    let policy = match &config.policy_path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            let policy = PolicyDocument::from_json(&json)?.into_policy()?;
            tracing::info!(path = %path.display(), "Loaded RBAC policy document");
            policy
        }
        None => Policy::reference()?,
    };

    tracing::info!(
        roles = policy.registry().list_roles().len(),
        resource_kinds = policy.catalog().resource_kinds().len(),
        scope_restricted = ?policy.scope_restricted().collect::<Vec<_>>(),
        "RBAC policy ready"
    );

    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_JSON: &str = r#"{
        "resources": [
            { "kind": "organization", "actions": ["update", "delete"] },
            { "kind": "member", "actions": ["create", "read", "update", "delete"] },
            { "kind": "invitation", "actions": ["create", "cancel"] },
            { "kind": "matter", "actions": ["create", "read", "update", "delete", "assign"] },
            { "kind": "document", "actions": ["create", "read", "update", "delete", "share"] },
            { "kind": "billing", "actions": ["read", "create", "approve"] }
        ],
        "roles": [
            { "name": "owner", "grants": {
                "organization": ["update", "delete"],
                "member": ["create", "read", "update", "delete"],
                "invitation": ["create", "cancel"],
                "matter": ["create", "read", "update", "delete", "assign"],
                "document": ["create", "read", "update", "delete", "share"],
                "billing": ["read", "create", "approve"] } },
            { "name": "partner", "grants": {
                "member": ["create", "read", "update", "delete"],
                "invitation": ["create", "cancel"],
                "matter": ["create", "read", "update", "delete", "assign"],
                "document": ["create", "read", "update", "delete", "share"],
                "billing": ["read", "create", "approve"] } },
            { "name": "associate", "grants": {
                "member": ["read"], "matter": ["read", "update"],
                "document": ["create", "read", "update", "delete"], "billing": ["read"] } },
            { "name": "paralegal", "grants": {
                "member": ["read"], "matter": ["read"],
                "document": ["create", "read", "update"], "billing": ["read"] } },
            { "name": "staff", "grants": {
                "member": ["read"], "matter": ["read"],
                "document": ["read"], "billing": ["read", "create"] } },
            { "name": "client", "grants": { "matter": ["read"], "document": ["read"] } }
        ],
        "hierarchy": ["client", "staff", "paralegal", "associate", "partner", "owner"],
        "scopeRestricted": ["matter", "document"]
    }"#;

    #[test]
    fn test_document_reproduces_reference_policy() {
        let loaded = PolicyDocument::from_json(REFERENCE_JSON)
            .unwrap()
            .into_policy()
            .unwrap();
        let reference = Policy::reference().unwrap();

        for role in reference.registry().list_roles() {
            let other = loaded.registry().get_role(role.name().as_str()).unwrap();
            assert_eq!(role.grants(), other.grants(), "grants of {}", role.name());
            assert_eq!(
                reference.hierarchy().rank(role.name().as_str()).unwrap(),
                loaded.hierarchy().rank(role.name().as_str()).unwrap()
            );
        }
        assert_eq!(
            reference.scope_restricted().collect::<Vec<_>>(),
            loaded.scope_restricted().collect::<Vec<_>>()
        );
    }

    fn minimal(grants: &str) -> String {
        format!(
            r#"{{
                "resources": [{{ "kind": "matter", "actions": ["read"] }}],
                "roles": [{{ "name": "viewer", "grants": {grants} }}],
                "hierarchy": ["viewer"]
            }}"#
        )
    }

    #[test]
    fn test_undeclared_action_is_invalid() {
        let err = PolicyDocument::from_json(&minimal(r#"{ "matter": ["delete"] }"#))
            .unwrap()
            .into_policy()
            .unwrap_err();
        assert!(matches!(err, RbacError::InvalidAction { ref action, .. } if action == "delete"));
    }

    #[test]
    fn test_unrecognised_action_string_is_invalid() {
        let err = PolicyDocument::from_json(&minimal(r#"{ "matter": ["publish"] }"#))
            .unwrap()
            .into_policy()
            .unwrap_err();
        assert!(matches!(err, RbacError::InvalidAction { ref action, .. } if action == "publish"));
    }

    #[test]
    fn test_unknown_resource_kind() {
        let err = PolicyDocument::from_json(&minimal(r#"{ "invoice": ["read"] }"#))
            .unwrap()
            .into_policy()
            .unwrap_err();
        assert!(matches!(err, RbacError::UnknownResourceKind(ref kind) if kind == "invoice"));

        // Known kind, but never declared in this document's catalog
        let err = PolicyDocument::from_json(&minimal(r#"{ "billing": ["read"] }"#))
            .unwrap()
            .into_policy()
            .unwrap_err();
        assert!(matches!(err, RbacError::UnknownResourceKind(ref kind) if kind == "billing"));
    }

    #[test]
    fn test_scope_restricted_defaults_to_empty() {
        let policy = PolicyDocument::from_json(&minimal(r#"{ "matter": ["read"] }"#))
            .unwrap()
            .into_policy()
            .unwrap();
        assert!(!policy.is_scope_restricted(ResourceKind::Matter));
    }

    #[test]
    fn test_duplicate_resource_declaration() {
        let json = r#"{
            "resources": [
                { "kind": "matter", "actions": ["read"] },
                { "kind": "matter", "actions": ["create"] }
            ],
            "roles": [],
            "hierarchy": []
        }"#;
        let err = PolicyDocument::from_json(json)
            .unwrap()
            .into_policy()
            .unwrap_err();
        assert!(matches!(
            err,
            RbacError::DuplicateResourceKind(ResourceKind::Matter)
        ));
    }

    #[test]
    fn test_repeated_grant_key_is_rejected() {
        let err = PolicyDocument::from_json(&minimal(
            r#"{ "matter": ["read"], "matter": ["read"] }"#,
        ))
        .unwrap()
        .into_policy()
        .unwrap_err();
        assert!(matches!(
            err,
            RbacError::DuplicateGrant { ref role, resource: ResourceKind::Matter }
                if role.as_str() == "viewer"
        ));
    }

    #[test]
    fn test_grants_keep_document_order() {
        let document = PolicyDocument::from_json(&minimal(r#"{ "matter": ["read"] }"#)).unwrap();
        assert_eq!(
            document.roles[0].grants,
            vec![("matter".to_string(), vec!["read".to_string()])]
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = PolicyDocument::from_json("{ \"resources\": ").unwrap_err();
        assert!(matches!(err, RbacError::PolicyDocument(_)));

        let json = r#"{ "resources": [], "roles": [], "hierarchy": [], "extra": 1 }"#;
        let err = PolicyDocument::from_json(json).unwrap_err();
        assert!(matches!(err, RbacError::PolicyDocument(_)));
    }

    #[tokio::test]
    async fn test_load_reference_policy_by_default() {
        let policy = load_policy(&RbacConfig::default()).await.unwrap();
        assert_eq!(policy.registry().list_roles().len(), 6);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let config = RbacConfig::with_policy_path("/nonexistent/rbac-policy.json");
        let err = load_policy(&config).await.unwrap_err();
        assert!(matches!(err, RbacError::PolicyRead(_)));
    }
}
