use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::Result;

/// Which locations directly contain which, e.g. `"moscow" -> ["russia"]`.
///
/// Read from a JSON object of name to parent names. A location may have
/// several parents, and names missing from the map have none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationHierarchy {
    parents: HashMap<String, Vec<String>>,
}

impl LocationHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, location: impl Into<String>, parents: Vec<String>) {
        self.parents.insert(location.into(), parents);
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Every location transitively containing `location`.
    ///
    /// Direct parents come first, followed by each parent's own enclosing
    /// locations in turn. A location reached twice (diamonds, or a cycle in a
    /// hand-edited file) is expanded only once.
    pub fn enclosing(&self, location: &str) -> Vec<String> {
        let mut visited = HashSet::from([location.to_string()]);
        self.collect_enclosing(location, &mut visited)
    }

    fn collect_enclosing(&self, location: &str, visited: &mut HashSet<String>) -> Vec<String> {
        let Some(direct) = self.parents.get(location) else {
            return Vec::new();
        };

        let fresh: Vec<&String> = direct
            .iter()
            .filter(|parent| visited.insert((*parent).clone()))
            .collect();

        let mut result: Vec<String> = fresh.iter().map(|p| (*p).clone()).collect();
        for parent in fresh {
            result.extend(self.collect_enclosing(parent, visited));
        }
        result
    }

    /// True when `term` is `location` itself or one of its enclosing locations.
    pub fn contains(&self, term: &str, location: &str) -> bool {
        location == term || self.enclosing(location).iter().any(|l| l == term)
    }
}
