//! Dynamic value model for path resolution.
//!
//! A data graph is built from [`Value`] nodes wrapped in [`ValueRef`]
//! (`Rc<RefCell<Value>>`): objects with insertion-ordered keys, arrays,
//! scalars, and native callables. Shared ownership lets the resolver hold a
//! history of ancestor values while `set` mutates a leaf, and lets `set`
//! alias the written value into the graph rather than deep-copying it.
//!
//! # Example
//!
//! ```
//! use pathquill::value::{Value, ValueRef};
//!
//! let root: ValueRef = Value::from_iter([
//!     ("name".to_string(), Value::from("pathquill")),
//!     ("version".to_string(), Value::from(1.0)),
//! ])
//! .into_ref();
//!
//! let name = pathquill::value::get_member(&root, "name").unwrap();
//! assert_eq!(*name.borrow(), Value::from("pathquill"));
//! ```

pub mod convert;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// Shared handle to a node in a data graph.
pub type ValueRef = Rc<RefCell<Value>>;

/// A native callable stored in a data graph.
///
/// The first argument is the receiver (the value one level up in the
/// resolution history, if any); the second is the argument list produced by
/// a call container. Returning `None` propagates the "no value" sentinel.
pub type CallFn = Rc<dyn Fn(Option<&ValueRef>, &[ValueRef]) -> Option<ValueRef>>;

/// A dynamic value: the node type of a data graph.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// An ordered sequence of values.
    Array(Vec<ValueRef>),
    /// Key-value pairs in insertion order.
    Object(IndexMap<String, ValueRef>),
    /// A native callable, invocable through a call container.
    Func(CallFn),
}

impl Value {
    /// Wraps this value in a shared handle.
    pub fn into_ref(self) -> ValueRef {
        Rc::new(RefCell::new(self))
    }

    /// Creates a callable value from a closure.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(Option<&ValueRef>, &[ValueRef]) -> Option<ValueRef> + 'static,
    {
        Value::Func(Rc::new(f))
    }

    /// Creates an empty object value.
    pub fn empty_object() -> Self {
        Value::Object(IndexMap::new())
    }

    pub fn is_func(&self) -> bool {
        matches!(self, Value::Func(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Renders this value as a property name, if it has a sensible string
    /// form. Used for placeholder substitution and computed property names.
    pub fn as_property_name(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(format_number(*n)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Formats a number the way it reads as a property name: integral values
/// without a trailing fraction.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(items) => {
                let items: Vec<_> = items.iter().map(|v| v.borrow().clone()).collect();
                f.debug_tuple("Array").field(&items).finish()
            }
            Value::Object(map) => {
                let mut d = f.debug_map();
                for (k, v) in map {
                    d.entry(k, &v.borrow().clone());
                }
                d.finish()
            }
            Value::Func(_) => write!(f, "Func"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| Rc::ptr_eq(x, y) || *x.borrow() == *y.borrow())
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, x)| {
                        b.get(k)
                            .is_some_and(|y| Rc::ptr_eq(x, y) || *x.borrow() == *y.borrow())
                    })
            }
            // Callables compare by identity; they have no structural form.
            (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Looks up a member of `context` by name.
///
/// Objects are keyed by string; arrays accept decimal indices. Scalars and
/// callables have no members.
pub fn get_member(context: &ValueRef, name: &str) -> Option<ValueRef> {
    match &*context.borrow() {
        Value::Object(map) => map.get(name).cloned(),
        Value::Array(items) => name.parse::<usize>().ok().and_then(|i| items.get(i)).cloned(),
        _ => None,
    }
}

/// Tests whether `context` has a member named `name`.
///
/// The array test is by index bounds, not by value, so a numeric segment is
/// never misread as an object key.
pub fn has_member(context: &ValueRef, name: &str) -> bool {
    match &*context.borrow() {
        Value::Object(map) => map.contains_key(name),
        Value::Array(items) => name
            .parse::<usize>()
            .map(|i| i < items.len())
            .unwrap_or(false),
        _ => false,
    }
}

/// Writes a member of `context`, aliasing `value` into the graph.
///
/// Writing one past the end of an array appends; writing further past the
/// end pads the gap with nulls. Returns false when `context` cannot hold
/// members or an array segment is not a valid index.
pub fn set_member(context: &ValueRef, name: &str, value: ValueRef) -> bool {
    match &mut *context.borrow_mut() {
        Value::Object(map) => {
            map.insert(name.to_string(), value);
            true
        }
        Value::Array(items) => match name.parse::<usize>() {
            Ok(i) => {
                if i >= items.len() {
                    items.resize_with(i + 1, || Value::Null.into_ref());
                }
                items[i] = value;
                true
            }
            Err(_) => false,
        },
        _ => false,
    }
}

/// Enumerates member names of `context`: object keys in insertion order,
/// array indices as decimal strings.
pub fn member_names(context: &ValueRef) -> Vec<String> {
    match &*context.borrow() {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_object() -> ValueRef {
        Value::from_iter([
            ("a".to_string(), Value::from(1.0)),
            ("b".to_string(), Value::from("two")),
        ])
        .into_ref()
    }

    #[test]
    fn test_get_member_object() {
        let obj = sample_object();
        let a = get_member(&obj, "a").unwrap();
        assert_eq!(*a.borrow(), Value::Number(1.0));
        assert!(get_member(&obj, "missing").is_none());
    }

    #[test]
    fn test_get_member_array_index() {
        let arr = Value::from(vec![Value::from(9.0), Value::from(8.0)]).into_ref();
        let second = get_member(&arr, "1").unwrap();
        assert_eq!(*second.borrow(), Value::Number(8.0));
        assert!(get_member(&arr, "2").is_none());
        assert!(get_member(&arr, "x").is_none());
    }

    #[test]
    fn test_get_member_scalar_fails() {
        let scalar = Value::from(5.0).into_ref();
        assert!(get_member(&scalar, "a").is_none());
    }

    #[test]
    fn test_has_member_array_bounds() {
        let arr = Value::from(vec![Value::Null]).into_ref();
        assert!(has_member(&arr, "0"));
        assert!(!has_member(&arr, "1"));
        assert!(!has_member(&arr, "nope"));
    }

    #[test]
    fn test_set_member_object() {
        let obj = sample_object();
        assert!(set_member(&obj, "c", Value::from(3.0).into_ref()));
        assert_eq!(
            *get_member(&obj, "c").unwrap().borrow(),
            Value::Number(3.0)
        );
    }

    #[test]
    fn test_set_member_array_extends() {
        let arr = Value::from(vec![Value::from(1.0)]).into_ref();
        assert!(set_member(&arr, "3", Value::from(4.0).into_ref()));
        assert_eq!(*get_member(&arr, "1").unwrap().borrow(), Value::Null);
        assert_eq!(
            *get_member(&arr, "3").unwrap().borrow(),
            Value::Number(4.0)
        );
    }

    #[test]
    fn test_set_member_scalar_fails() {
        let scalar = Value::from("leaf").into_ref();
        assert!(!set_member(&scalar, "a", Value::Null.into_ref()));
    }

    #[test]
    fn test_member_names() {
        let obj = sample_object();
        assert_eq!(member_names(&obj), vec!["a", "b"]);
        let arr = Value::from(vec![Value::Null, Value::Null]).into_ref();
        assert_eq!(member_names(&arr), vec!["0", "1"]);
    }

    #[test]
    fn test_equality_deep() {
        assert_eq!(*sample_object().borrow(), *sample_object().borrow());
        let f = Value::func(|_, _| None);
        let g = f.clone();
        assert_eq!(f, g);
        assert_ne!(f, Value::func(|_, _| None));
    }

    #[test]
    fn test_as_property_name() {
        assert_eq!(Value::from(2.0).as_property_name().unwrap(), "2");
        assert_eq!(Value::from(2.5).as_property_name().unwrap(), "2.5");
        assert_eq!(Value::from("id").as_property_name().unwrap(), "id");
        assert!(Value::Null.as_property_name().is_none());
    }
}
