#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod query;
pub mod resolver;
pub mod store;

pub use config::Config;
pub use error::{Error, QueryError, Result, ValidationError};
pub use index::HierarchyIndex;
pub use model::{RawHierarchy, RawRole, RawUser, Role, RoleId, User, UserId};
pub use query::{OrgChart, SubordinateReport};
pub use resolver::{DescendantCache, DescendantResolver, DescendantSet, ResolverStats};
pub use store::HierarchyStore;
