//! Well-known role names and the checks built on them.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20261001000001_create_wiki_schema.sql`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_CONTRIBUTOR: &str = "contributor";
pub const ROLE_REVIEWER: &str = "reviewer";
pub const ROLE_COORDINATOR: &str = "coordinator";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_CONTRIBUTOR, ROLE_REVIEWER, ROLE_COORDINATOR];

/// A user's role. Controls access to moderation and category management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Contributor,
    Reviewer,
    Coordinator,
}

impl Role {
    /// Parse a stored role name.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_CONTRIBUTOR => Ok(Role::Contributor),
            ROLE_REVIEWER => Ok(Role::Reviewer),
            ROLE_COORDINATOR => Ok(Role::Coordinator),
            other => Err(CoreError::Internal(format!(
                "Unknown role '{other}'. Valid roles: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Contributor => ROLE_CONTRIBUTOR,
            Role::Reviewer => ROLE_REVIEWER,
            Role::Coordinator => ROLE_COORDINATOR,
        }
    }

    /// Reviewers and coordinators may moderate versions and manage categories.
    pub fn can_moderate(self) -> bool {
        matches!(self, Role::Reviewer | Role::Coordinator)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
