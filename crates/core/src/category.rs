//! Category validation and tree assembly.
//!
//! Categories form a self-referential tree via `parent_category_id`. Parent
//! integrity (existence, cycles, depth) is owned by the database functions;
//! tree assembly here only has to tolerate whatever rows it is given.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Visibility constants
// ---------------------------------------------------------------------------

pub const VISIBILITY_PUBLIC: &str = "public";
pub const VISIBILITY_MEMBERS: &str = "members";
pub const VISIBILITY_STAFF: &str = "staff";

/// All valid `default_visibility` values.
pub const VALID_VISIBILITIES: &[&str] = &[VISIBILITY_PUBLIC, VISIBILITY_MEMBERS, VISIBILITY_STAFF];

/// Maximum category name length, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a category name (non-blank, at most [`MAX_NAME_LENGTH`] chars).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Category name must not be empty".into(),
        ));
    }
    if name.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a visibility value against the known set.
pub fn validate_visibility(visibility: &str) -> Result<(), CoreError> {
    if !VALID_VISIBILITIES.contains(&visibility) {
        return Err(CoreError::Validation(format!(
            "Invalid visibility '{visibility}'. Valid values: {}",
            VALID_VISIBILITIES.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tree assembly
// ---------------------------------------------------------------------------

/// A category with its children nested beneath it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    pub id: DbId,
    pub name: String,
    pub parent_category_id: Option<DbId>,
    pub default_visibility: String,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn leaf(
        id: DbId,
        name: impl Into<String>,
        parent_category_id: Option<DbId>,
        default_visibility: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parent_category_id,
            default_visibility: default_visibility.into(),
            children: Vec::new(),
        }
    }
}

/// Nest a flat category list into a forest.
///
/// Siblings are sorted by name. A row whose parent is absent from `rows`
/// becomes a root. Rows caught in a parent cycle are unreachable from any
/// root and are promoted to roots so that nothing is silently dropped.
pub fn build_category_tree(rows: Vec<CategoryNode>) -> Vec<CategoryNode> {
    let known: HashSet<DbId> = rows.iter().map(|r| r.id).collect();

    let mut children_of: HashMap<Option<DbId>, Vec<CategoryNode>> = HashMap::new();
    for row in rows {
        let parent = row.parent_category_id.filter(|p| known.contains(p));
        children_of.entry(parent).or_default().push(row);
    }

    let mut roots = attach(None, &mut children_of);

    // Whatever is left never hung off a root: promote it.
    while let Some(key) = children_of.keys().next().copied() {
        let stranded = children_of.remove(&key).unwrap_or_default();
        for mut node in stranded {
            node.children = attach(Some(node.id), &mut children_of);
            roots.push(node);
        }
    }

    sort_by_name(&mut roots);
    roots
}

fn attach(
    parent: Option<DbId>,
    children_of: &mut HashMap<Option<DbId>, Vec<CategoryNode>>,
) -> Vec<CategoryNode> {
    let mut nodes = children_of.remove(&parent).unwrap_or_default();
    for node in &mut nodes {
        node.children = attach(Some(node.id), children_of);
    }
    sort_by_name(&mut nodes);
    nodes
}

fn sort_by_name(nodes: &mut [CategoryNode]) {
    nodes.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}
