//! Actions and action sets
//!
//! [`ActionSet`] is a bit set over [`Action`]; iteration always follows
//! declaration order of the enum, regardless of insertion order.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Operation on a resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Action {
    Create = 0,
    Read = 1,
    Update = 2,
    Delete = 3,
    Assign = 4,
    Share = 5,
    Approve = 6,
    Cancel = 7,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Assign,
        Action::Share,
        Action::Approve,
        Action::Cancel,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Action::*;
        match self {
            Create => "create",
            Read => "read",
            Update => "update",
            Delete => "delete",
            Assign => "assign",
            Share => "share",
            Approve => "approve",
            Cancel => "cancel",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.code() == code)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Set of actions
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    #[inline]
    pub const fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, action: Action) -> bool {
        let added = !self.contains(action);
        self.0 |= action.bit();
        added
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_subset(&self, other: &ActionSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Actions in `self` that are missing from `other`
    #[inline]
    pub const fn difference(&self, other: &ActionSet) -> ActionSet {
        ActionSet(self.0 & !other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|action| self.contains(*action))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::EMPTY;
        for action in iter {
            set.insert(action);
        }
        set
    }
}

impl<const N: usize> From<[Action; N]> for ActionSet {
    fn from(actions: [Action; N]) -> Self {
        actions.into_iter().collect()
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for action in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(action.code())?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ActionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
