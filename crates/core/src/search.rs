//! Pagination defaults and name matching shared by list and search endpoints.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Name matching
// ---------------------------------------------------------------------------

/// Normalise a free-text query; `None` when there is nothing to search for.
pub fn normalize_query(q: Option<&str>) -> Option<String> {
    q.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty())
}

/// Case-insensitive substring match against an already-normalised query.
pub fn name_matches(name: &str, normalized_query: &str) -> bool {
    name.to_lowercase().contains(normalized_query)
}
