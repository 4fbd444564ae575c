#![forbid(unsafe_code)]

use std::fmt::Display;

use thiserror::Error;

use crate::model::{RoleId, UserId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Invalid file path.")]
    FileNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::Decode(e.to_string())
        }
    }
}

/// Load-time failures. A failed load produces no store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("User data, Role data, Id/Name/Role/Parent fields must not be empty.")]
    IncompleteData,

    #[error("Multiple users with ID(s) were found: {}.", join_ids(.0))]
    DuplicateUser(Vec<UserId>),

    #[error("Multiple roles with ID(s) were found: {}.", join_ids(.0))]
    DuplicateRole(Vec<RoleId>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
}

fn join_ids<T: Display>(ids: &[T]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
