//! Article version statuses and the moderation transition table.
//!
//! The database functions are authoritative for transitions; the API checks
//! the same table first so an invalid request is answered without a write.
//!
//! ```text
//! pending  --approve-->  approved  --revoke-->  revoked
//! pending  --reject--->  rejected
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Statuses
-------------------------------------------------------------------------- */

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_REVOKED: &str = "revoked";

/// Maximum length of a moderator's reason note.
pub const MAX_REASON_LENGTH: usize = 2_000;

/// Review status of an article version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Pending,
    Approved,
    Rejected,
    Revoked,
}

impl VersionStatus {
    /// Parse a status as stored in `article_versions.status`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            STATUS_REVOKED => Ok(Self::Revoked),
            other => Err(CoreError::Internal(format!(
                "Unknown version status '{other}'"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
            Self::Revoked => STATUS_REVOKED,
        }
    }

    /// Versions that have not been published can be shared via preview token.
    pub fn is_previewable(self) -> bool {
        matches!(self, Self::Pending | Self::Rejected)
    }
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------------------------------------------------
Actions
-------------------------------------------------------------------------- */

pub const ACTION_APPROVE: &str = "approve";
pub const ACTION_REJECT: &str = "reject";
pub const ACTION_REVOKE: &str = "revoke";

/// All valid moderation action names.
pub const VALID_ACTIONS: &[&str] = &[ACTION_APPROVE, ACTION_REJECT, ACTION_REVOKE];

/// A moderator's decision on a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
    Revoke,
}

impl ModerationAction {
    /// Parse the `?action=` query value. Missing or unknown names are a 400.
    pub fn parse(action: Option<&str>) -> Result<Self, CoreError> {
        match action.map(str::trim) {
            Some(ACTION_APPROVE) => Ok(Self::Approve),
            Some(ACTION_REJECT) => Ok(Self::Reject),
            Some(ACTION_REVOKE) => Ok(Self::Revoke),
            _ => Err(CoreError::Validation(format!(
                "Invalid action. Must be one of: {}",
                VALID_ACTIONS.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => ACTION_APPROVE,
            Self::Reject => ACTION_REJECT,
            Self::Revoke => ACTION_REVOKE,
        }
    }

    /// Name of the database function that performs this transition.
    pub fn rpc_name(self) -> &'static str {
        match self {
            Self::Approve => "approve_article_version",
            Self::Reject => "reject_article_version",
            Self::Revoke => "revoke_article_version",
        }
    }

    /// The only status this action may be applied to.
    pub fn source_status(self) -> VersionStatus {
        match self {
            Self::Approve | Self::Reject => VersionStatus::Pending,
            Self::Revoke => VersionStatus::Approved,
        }
    }

    /// The status a version ends up in after this action.
    pub fn target_status(self) -> VersionStatus {
        match self {
            Self::Approve => VersionStatus::Approved,
            Self::Reject => VersionStatus::Rejected,
            Self::Revoke => VersionStatus::Revoked,
        }
    }

    /// Check that `current` may move under this action, returning the new status.
    pub fn apply(self, current: VersionStatus) -> Result<VersionStatus, CoreError> {
        if current != self.source_status() {
            return Err(CoreError::Conflict(format!(
                "Cannot {} a version with status '{current}'; expected '{}'",
                self.as_str(),
                self.source_status()
            )));
        }
        Ok(self.target_status())
    }
}

impl std::fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate an optional moderator note. Blank notes are normalised to `None`.
pub fn normalize_reason(reason: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    if reason.chars().count() > MAX_REASON_LENGTH {
        return Err(CoreError::Validation(format!(
            "Reason must be at most {MAX_REASON_LENGTH} characters"
        )));
    }
    Ok(Some(reason.to_string()))
}
