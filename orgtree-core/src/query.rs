#![forbid(unsafe_code)]

use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::error::{QueryError, Result, ValidationError};
use crate::index::HierarchyIndex;
use crate::loader;
use crate::metrics;
use crate::model::{RawHierarchy, Role, RoleId, User, UserId};
use crate::resolver::{DescendantResolver, DescendantSet, ResolverStats};
use crate::store::HierarchyStore;

/// A loaded organisation: validated store plus the resolver built over it.
#[derive(Debug)]
pub struct OrgChart {
    store: HierarchyStore,
    resolver: DescendantResolver,
}

impl OrgChart {
    pub fn load(raw: RawHierarchy) -> std::result::Result<Self, ValidationError> {
        let store = match HierarchyStore::from_raw(raw) {
            Ok(store) => store,
            Err(e) => {
                metrics::record_load("rejected");
                tracing::warn!(error = %e, "rejected user/role data");
                return Err(e);
            }
        };

        let index = HierarchyIndex::build(store.roles());
        metrics::record_load("accepted");
        tracing::info!(
            users = store.user_count(),
            roles = store.role_count(),
            "loaded user/role data"
        );

        Ok(Self {
            store,
            resolver: DescendantResolver::new(index),
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::load(loader::parse_json(json)?)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::load(loader::parse_reader(reader)?)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::load(loader::parse_path(path)?)?)
    }

    /// Users whose role descends from the given user's role, in load order.
    pub fn subordinates_of(&self, user_id: UserId) -> std::result::Result<Vec<&User>, QueryError> {
        let user = self
            .store
            .user(user_id)
            .ok_or(QueryError::UnknownUser(user_id))?;

        let roles = self.resolver.resolve(user.role_id);
        Ok(self
            .store
            .users()
            .filter(|u| roles.contains(&u.role_id))
            .collect())
    }

    pub fn report_for(&self, user_id: UserId) -> std::result::Result<SubordinateReport, QueryError> {
        let subordinates: Vec<User> = self
            .subordinates_of(user_id)?
            .into_iter()
            .cloned()
            .collect();

        Ok(SubordinateReport {
            user: user_id,
            count: subordinates.len(),
            subordinates,
        })
    }

    pub fn descendant_roles(&self, role: RoleId) -> DescendantSet {
        self.resolver.resolve(role)
    }

    pub fn descendant_roles_of_all(&self, roles: &[RoleId]) -> HashSet<RoleId> {
        self.resolver.resolve_many(roles.iter().copied())
    }

    /// True when no loaded role names `role` as its parent.
    pub fn is_leaf_role(&self, role: RoleId) -> bool {
        !self.resolver.index().contains_parent(role)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.store.user(id)
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.store.role(id)
    }

    pub fn store(&self) -> &HierarchyStore {
        &self.store
    }

    pub fn resolver_stats(&self) -> ResolverStats {
        self.resolver.stats()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubordinateReport {
    pub user: UserId,
    pub count: usize,
    pub subordinates: Vec<User>,
}

impl SubordinateReport {
    pub fn ids(&self) -> Vec<UserId> {
        self.subordinates.iter().map(|u| u.id).collect()
    }
}
