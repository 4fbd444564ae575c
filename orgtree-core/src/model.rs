#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub i64);

impl From<i64> for RoleId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role_id: RoleId,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, role_id: i64) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
            role_id: RoleId(role_id),
        }
    }
}

/// A role whose `parent_id` names no loaded role is a root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub parent_id: RoleId,
}

impl Role {
    pub fn new(id: i64, name: impl Into<String>, parent_id: i64) -> Self {
        Self {
            id: RoleId(id),
            name: name.into(),
            parent_id: RoleId(parent_id),
        }
    }
}

// Decode-side shapes. Every field is optional so that a missing key, a JSON
// null and an absent list all reach validation as "unset".

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(default, alias = "Id")]
    pub id: Option<UserId>,
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "role", alias = "Role", alias = "RoleId")]
    pub role_id: Option<RoleId>,
}

impl RawUser {
    pub fn new(id: i64, name: impl Into<String>, role_id: i64) -> Self {
        Self {
            id: Some(UserId(id)),
            name: Some(name.into()),
            role_id: Some(RoleId(role_id)),
        }
    }

    pub(crate) fn complete(&self) -> Option<User> {
        match (self.id, self.name.as_deref(), self.role_id) {
            (Some(id), Some(name), Some(role_id)) if !name.is_empty() => Some(User {
                id,
                name: name.to_string(),
                role_id,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRole {
    #[serde(default, alias = "Id")]
    pub id: Option<RoleId>,
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "parent", alias = "Parent", alias = "ParentId")]
    pub parent_id: Option<RoleId>,
}

impl RawRole {
    pub fn new(id: i64, name: impl Into<String>, parent_id: i64) -> Self {
        Self {
            id: Some(RoleId(id)),
            name: Some(name.into()),
            parent_id: Some(RoleId(parent_id)),
        }
    }

    pub(crate) fn complete(&self) -> Option<Role> {
        match (self.id, self.name.as_deref(), self.parent_id) {
            (Some(id), Some(name), Some(parent_id)) if !name.is_empty() => Some(Role {
                id,
                name: name.to_string(),
                parent_id,
            }),
            _ => None,
        }
    }
}

/// The parsed object graph handed to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHierarchy {
    #[serde(default, alias = "Users")]
    pub users: Vec<RawUser>,
    #[serde(default, alias = "Roles")]
    pub roles: Vec<RawRole>,
}

impl RawHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: RawUser) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_role(mut self, role: RawRole) -> Self {
        self.roles.push(role);
        self
    }
}
