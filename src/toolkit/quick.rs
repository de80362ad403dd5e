//! Fast path for plain property walks.
//!
//! Paths made only of property names and separators skip the lexer and
//! resolver entirely: split on the separator, walk member by member. The
//! facade routes a path here when no syntax character other than the
//! property separator appears in it, or when a compiled path holds only
//! plain segments.

use crate::value::{self, Value, ValueRef};

/// Walks `path` split on `separator`. An empty segment fails the walk even
/// in write mode. With `force`, missing intermediate members are created as
/// empty objects on the way to a write.
pub fn resolve_string(
    root: &ValueRef,
    path: &str,
    separator: char,
    new_value: Option<&ValueRef>,
    force: bool,
) -> Option<ValueRef> {
    let segments: Vec<&str> = path.split(separator).collect();
    walk(root, &segments, new_value, force)
}

/// Same walk for pre-split plain segments.
pub fn resolve_segments(
    root: &ValueRef,
    segments: &[&str],
    new_value: Option<&ValueRef>,
    force: bool,
) -> Option<ValueRef> {
    walk(root, segments, new_value, force)
}

fn walk(
    root: &ValueRef,
    segments: &[&str],
    new_value: Option<&ValueRef>,
    force: bool,
) -> Option<ValueRef> {
    if segments.is_empty() {
        return None;
    }
    let last = segments.len() - 1;
    let mut context = root.clone();

    for (idx, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return None;
        }
        if let Some(nv) = new_value {
            if idx == last {
                if !value::set_member(&context, segment, nv.clone()) {
                    return None;
                }
            } else if force && !value::has_member(&context, segment) {
                value::set_member(&context, segment, Value::empty_object().into_ref());
            }
        }
        context = value::get_member(&context, segment)?;
    }
    Some(context)
}
