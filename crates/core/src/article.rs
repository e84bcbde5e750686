//! Article submission validation.
//!
//! Request bodies arrive with every field optional so that a missing field is
//! reported as a validation error (400) rather than a deserialization
//! rejection.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum article title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum article body length, in characters.
pub const MAX_CONTENT_LENGTH: usize = 200_000;

/// A submission whose fields have all been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub title: String,
    pub category_id: DbId,
    pub content: String,
}

/// Validate a new-article submission.
///
/// Title, category, and content are all required; the error names every
/// missing field at once.
pub fn validate_submission(
    title: Option<&str>,
    category_id: Option<&str>,
    content: Option<&str>,
) -> Result<ValidSubmission, CoreError> {
    let title = non_blank(title);
    let category_id = non_blank(category_id);
    let content = non_blank(content);

    let missing: Vec<&str> = [
        ("title", title.is_none()),
        ("category", category_id.is_none()),
        ("content", content.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, is_missing)| is_missing.then_some(name))
    .collect();

    match (title, category_id, content) {
        (Some(title), Some(category_id), Some(content)) => {
            validate_title(title)?;
            validate_content(content)?;
            Ok(ValidSubmission {
                title: title.trim().to_string(),
                category_id: parse_id("category_id", category_id)?,
                content: content.to_string(),
            })
        }
        _ => Err(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        ))),
    }
}

/// Validate an article title (non-blank, at most [`MAX_TITLE_LENGTH`] chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.trim().chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate article content (non-blank, at most [`MAX_CONTENT_LENGTH`] chars).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Parse a UUID supplied in a request body.
pub fn parse_id(field: &str, raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{field} must be a valid UUID")))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
