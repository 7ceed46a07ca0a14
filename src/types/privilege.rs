use crate::error::{ReachError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Words that make a limitation statement countable.
const MEASURABLE_KEYWORDS: [&str; 6] = ["limit", "max", "count", "rate", "number", "size"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivilegeScope {
    Global,
    Limited,
    Restricted,
    None,
}

impl PrivilegeScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Limited => "limited",
            Self::Restricted => "restricted",
            Self::None => "none",
        }
    }
}

/// A named capability: what it may do and what bounds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Privilege {
    name: String,
    scope: PrivilegeScope,
    actions: BTreeSet<String>,
    limitations: Vec<String>,
}

impl Privilege {
    /// Builds a privilege, rejecting an empty action set unless the scope is
    /// [`PrivilegeScope::None`].
    pub fn new<A, L>(
        name: impl Into<String>,
        scope: PrivilegeScope,
        actions: A,
        limitations: L,
    ) -> Result<Self>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ReachError::InvalidPrivilege(
                "privilege name must be non-empty".to_string(),
            ));
        }
        let actions: BTreeSet<String> = actions.into_iter().map(Into::into).collect();
        if actions.is_empty() && scope != PrivilegeScope::None {
            return Err(ReachError::InvalidPrivilege(format!(
                "{name}: actions may only be empty when scope is none (found {})",
                scope.as_str()
            )));
        }

        Ok(Self {
            name,
            scope,
            actions,
            limitations: limitations.into_iter().map(Into::into).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> PrivilegeScope {
        self.scope
    }

    pub fn actions(&self) -> &BTreeSet<String> {
        &self.actions
    }

    pub fn limitations(&self) -> &[String] {
        &self.limitations
    }

    pub fn permits(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// True when at least one limitation is phrased as a countable bound.
    pub fn is_measurable(&self) -> bool {
        self.limitations.iter().any(|limitation| {
            let lowered = limitation.to_lowercase();
            MEASURABLE_KEYWORDS
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
    }
}

/// Privileges keyed uniquely by name, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PrivilegeSet {
    privileges: Vec<Privilege>,
}

impl PrivilegeSet {
    pub fn new(privileges: Vec<Privilege>) -> Result<Self> {
        let mut seen = HashSet::new();
        for privilege in &privileges {
            if !seen.insert(privilege.name()) {
                return Err(ReachError::DuplicatePrivilege(privilege.name().to_string()));
            }
        }
        Ok(Self { privileges })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Privilege> {
        self.privileges.iter()
    }

    pub fn len(&self) -> usize {
        self.privileges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.privileges.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Privilege> {
        self.privileges
            .iter()
            .find(|privilege| privilege.name() == name)
    }

    pub fn permits(&self, action: &str) -> bool {
        self.privileges
            .iter()
            .any(|privilege| privilege.permits(action))
    }

    pub fn action_count(&self) -> usize {
        self.privileges
            .iter()
            .map(|privilege| privilege.actions().len())
            .sum()
    }

    pub fn limitations(&self) -> Vec<String> {
        self.privileges
            .iter()
            .flat_map(|privilege| privilege.limitations().iter().cloned())
            .collect()
    }

    pub fn measurable_count(&self) -> usize {
        self.privileges
            .iter()
            .filter(|privilege| privilege.is_measurable())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_privilege() -> Privilege {
        Privilege::new(
            "READ",
            PrivilegeScope::Limited,
            ["open", "read"],
            ["Max 100 open handles"],
        )
        .expect("privilege should build")
    }

    #[test]
    fn empty_actions_rejected_unless_scope_is_none() {
        let err = Privilege::new(
            "WRITE",
            PrivilegeScope::Limited,
            Vec::<String>::new(),
            Vec::<String>::new(),
        )
        .expect_err("limited scope without actions should fail");
        assert!(err.to_string().contains("actions may only be empty"));

        let none = Privilege::new(
            "NOTHING",
            PrivilegeScope::None,
            Vec::<String>::new(),
            ["Cannot act"],
        );
        assert!(none.is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = Privilege::new(
            " ",
            PrivilegeScope::None,
            Vec::<String>::new(),
            Vec::<String>::new(),
        );
        assert!(matches!(result, Err(ReachError::InvalidPrivilege(_))));
    }

    #[test]
    fn duplicate_actions_collapse_into_a_set() {
        let privilege = Privilege::new(
            "READ",
            PrivilegeScope::Limited,
            ["read", "read", "open"],
            Vec::<String>::new(),
        )
        .expect("privilege should build");
        assert_eq!(privilege.actions().len(), 2);
    }

    #[test]
    fn measurable_requires_countable_wording() {
        assert!(read_privilege().is_measurable());

        let vague = Privilege::new(
            "INFLUENCE",
            PrivilegeScope::Global,
            ["persuade"],
            ["Depends on reputation"],
        )
        .expect("privilege should build");
        assert!(!vague.is_measurable());
    }

    #[test]
    fn set_rejects_duplicate_names() {
        let err = PrivilegeSet::new(vec![read_privilege(), read_privilege()])
            .expect_err("duplicate names should fail");
        assert!(matches!(err, ReachError::DuplicatePrivilege(name) if name == "READ"));
    }

    #[test]
    fn set_concatenates_limitations_in_order() {
        let write = Privilege::new(
            "WRITE",
            PrivilegeScope::Limited,
            ["write"],
            ["Quota of 1 GB", "No writes to /etc"],
        )
        .expect("privilege should build");
        let set = PrivilegeSet::new(vec![read_privilege(), write]).expect("set should build");

        assert_eq!(
            set.limitations(),
            vec![
                "Max 100 open handles".to_string(),
                "Quota of 1 GB".to_string(),
                "No writes to /etc".to_string(),
            ]
        );
        assert_eq!(set.action_count(), 3);
        assert!(set.permits("write"));
        assert!(!set.permits("delete"));
        assert!(set.get("WRITE").is_some());
    }
}
