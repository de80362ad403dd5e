//! Reverse lookup: scan a data graph for a value and report the path that
//! reaches it.
//!
//! The scan is depth-first. Array members are visited by index; object
//! members in sorted key order so repeated scans of the same graph produce
//! the same paths. Member names containing syntax characters are quoted so
//! every reported path parses back through the lexer. A match at the root
//! itself has no path and is never reported.

use std::collections::HashSet;

use crate::syntax::CharClasses;
use crate::value::{Value, ValueRef};

/// Value scanner bound to one syntax configuration. The configuration
/// decides the separator between reported segments and which member names
/// need quoting.
pub struct Finder<'a> {
    classes: &'a CharClasses,
}

impl<'a> Finder<'a> {
    pub fn new(classes: &'a CharClasses) -> Self {
        Finder { classes }
    }

    /// Returns the first path whose value equals `target`, or `None` when
    /// the graph holds no match.
    pub fn find_first(&self, root: &ValueRef, target: &ValueRef) -> Option<String> {
        let mut found = Vec::new();
        self.scan(root, target, "", &mut HashSet::new(), &mut found, false);
        found.into_iter().next()
    }

    /// Returns every matching path in scan order.
    pub fn find_all(&self, root: &ValueRef, target: &ValueRef) -> Vec<String> {
        let mut found = Vec::new();
        self.scan(root, target, "", &mut HashSet::new(), &mut found, true);
        found
    }

    // Returns false once the caller should stop scanning.
    fn scan(
        &self,
        node: &ValueRef,
        target: &ValueRef,
        path: &str,
        visiting: &mut HashSet<*const Value>,
        found: &mut Vec<String>,
        all: bool,
    ) -> bool {
        if !path.is_empty() && (ValueRef::ptr_eq(node, target) || *node.borrow() == *target.borrow())
        {
            found.push(path.to_string());
            return all;
        }

        let key = node.as_ptr() as *const Value;
        if !visiting.insert(key) {
            // Already on the current branch; descending again would loop.
            return true;
        }

        let keep_going = match &*node.borrow() {
            Value::Array(items) => {
                let mut keep = true;
                for (idx, item) in items.iter().enumerate() {
                    let child = self.join(path, &idx.to_string());
                    if !self.scan(item, target, &child, visiting, found, all) {
                        keep = false;
                        break;
                    }
                }
                keep
            }
            Value::Object(members) => {
                let mut names: Vec<&String> = members.keys().collect();
                names.sort();
                let mut keep = true;
                for name in names {
                    let segment = if name.chars().any(|ch| self.classes.is_special(ch)) {
                        self.classes.quote(name)
                    } else {
                        name.clone()
                    };
                    let child = self.join(path, &segment);
                    if !self.scan(&members[name.as_str()], target, &child, visiting, found, all) {
                        keep = false;
                        break;
                    }
                }
                keep
            }
            _ => true,
        };

        visiting.remove(&key);
        keep_going
    }

    fn join(&self, path: &str, segment: &str) -> String {
        if path.is_empty() {
            segment.to_string()
        } else {
            format!("{}{}{}", path, self.classes.property_separator(), segment)
        }
    }
}
