//! Composite resource identifiers
//!
//! Resources backed by two upstream identifiers store them as a single
//! `"<first>:<second>"` string. [`build_two_part_id`] and
//! [`parse_two_part_id`] are inverses for any first part free of the
//! separator.

use super::error::ResourceError;

/// Separator between the two halves of a composite ID
pub const ID_SEPARATOR: char = ':';

/// Join two identifiers into one composite ID
pub fn build_two_part_id(first: &str, second: &str) -> String {
    format!("{first}{ID_SEPARATOR}{second}")
}

/// Split a composite ID on its first separator
pub fn parse_two_part_id(id: &str) -> Result<(&str, &str), ResourceError> {
    match id.split_once(ID_SEPARATOR) {
        Some((first, second)) if !first.is_empty() && !second.is_empty() => Ok((first, second)),
        Some(_) => Err(ResourceError::invalid_id(id, "both parts must be non-empty")),
        None => Err(ResourceError::invalid_id(
            id,
            format!("expected <project>{ID_SEPARATOR}<group>"),
        )),
    }
}

/// Composite ID of a project/group share
pub fn project_group_id(project_id: &str, group_id: i64) -> String {
    build_two_part_id(project_id, &group_id.to_string())
}

/// Decompose a project/group share ID into its project and numeric group
pub fn project_and_group_from_id(id: &str) -> Result<(String, i64), ResourceError> {
    let parsed = parse_two_part_id(id).and_then(|(project_id, group)| {
        group
            .parse::<i64>()
            .map(|group_id| (project_id.to_string(), group_id))
            .map_err(|e| ResourceError::invalid_id(id, format!("group ID is not an integer: {e}")))
    });

    if parsed.is_err() {
        tracing::warn!("cannot get project and group ID from input: {}", id);
    }
    parsed
}
