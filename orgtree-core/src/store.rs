#![forbid(unsafe_code)]

use indexmap::IndexMap;
use std::hash::Hash;

use crate::error::ValidationError;
use crate::model::{RawHierarchy, Role, RoleId, User, UserId};

/// Validated users and roles, in load order.
#[derive(Debug, Clone)]
pub struct HierarchyStore {
    users: IndexMap<UserId, User>,
    roles: IndexMap<RoleId, Role>,
}

impl HierarchyStore {
    pub fn from_raw(raw: RawHierarchy) -> Result<Self, ValidationError> {
        if raw.users.is_empty() || raw.roles.is_empty() {
            return Err(ValidationError::IncompleteData);
        }

        let users = raw
            .users
            .iter()
            .map(|u| u.complete())
            .collect::<Option<Vec<User>>>()
            .ok_or(ValidationError::IncompleteData)?;
        let roles = raw
            .roles
            .iter()
            .map(|r| r.complete())
            .collect::<Option<Vec<Role>>>()
            .ok_or(ValidationError::IncompleteData)?;

        let duplicate_users = duplicated_keys(users.iter().map(|u| u.id));
        if !duplicate_users.is_empty() {
            return Err(ValidationError::DuplicateUser(duplicate_users));
        }

        let duplicate_roles = duplicated_keys(roles.iter().map(|r| r.id));
        if !duplicate_roles.is_empty() {
            return Err(ValidationError::DuplicateRole(duplicate_roles));
        }

        Ok(Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            roles: roles.into_iter().map(|r| (r.id, r)).collect(),
        })
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

/// Keys seen more than once, each reported once, in order of first appearance.
fn duplicated_keys<K: Hash + Eq + Copy>(keys: impl Iterator<Item = K>) -> Vec<K> {
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(key, _)| key)
        .collect()
}
