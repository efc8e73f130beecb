use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of protected entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Organization,
    Member,
    Invitation,
    Matter,
    Document,
    Billing,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Organization,
        ResourceKind::Member,
        ResourceKind::Invitation,
        ResourceKind::Matter,
        ResourceKind::Document,
        ResourceKind::Billing,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use ResourceKind::*;
        match self {
            Organization => "organization",
            Member => "member",
            Invitation => "invitation",
            Matter => "matter",
            Document => "document",
            Billing => "billing",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
