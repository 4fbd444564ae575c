#![forbid(unsafe_code)]

use std::collections::HashMap;

use crate::model::{Role, RoleId};

/// Parent role id to immediate child role ids. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyIndex {
    children: HashMap<RoleId, Vec<RoleId>>,
}

impl HierarchyIndex {
    pub fn build<'a>(roles: impl IntoIterator<Item = &'a Role>) -> Self {
        let mut children: HashMap<RoleId, Vec<RoleId>> = HashMap::new();
        for role in roles {
            children.entry(role.parent_id).or_default().push(role.id);
        }

        let index = Self { children };
        tracing::debug!(
            parents = index.parent_count(),
            edges = index.edge_count(),
            "built role hierarchy index"
        );
        index
    }

    /// Immediate children of `parent`. Empty when the role has none or is unknown.
    pub fn children(&self, parent: RoleId) -> &[RoleId] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains_parent(&self, parent: RoleId) -> bool {
        self.children.get(&parent).is_some_and(|c| !c.is_empty())
    }

    pub fn parent_count(&self) -> usize {
        self.children.len()
    }

    pub fn edge_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }
}
