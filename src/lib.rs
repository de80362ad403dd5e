//! Path-query toolkit for nested data graphs.
//!
//! A [`PathToolkit`] reads, writes, and searches structured [`Value`] data
//! through a compact path language. The grammar is configurable at runtime;
//! with the defaults:
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `a.b.c` | property walk (array indices are plain numbers) |
//! | `a,b` | collection of sibling branches, resolved to a list |
//! | `a.*` | wildcard over member names |
//! | `['x.y']`, `"x.y"` | quoted property names |
//! | `[grp]` | grouping, spliced into the walk |
//! | `fn()` | invoke the current value as a callable |
//! | `{sub.path}` | computed property name |
//! | `<` `~` | parent and root references |
//! | `%1` `@1` | extra-argument substitution |
//! | `\` | escape the next character |
//!
//! Failed lookups and malformed paths resolve to `None`; only configuring
//! the grammar can produce an error.
//!
//! ```
//! use pathquill::{PathToolkit, Value};
//!
//! let tk = PathToolkit::new();
//! let data = serde_json::from_str::<Value>(
//!     r#"{"accounts": [{"checking": {"balance": 123.0}}]}"#,
//! )
//! .unwrap()
//! .into_ref();
//!
//! let balance = tk.get(&data, "accounts.0.checking.balance").unwrap();
//! assert_eq!(*balance.borrow(), Value::Number(123.0));
//!
//! assert!(tk.set(&data, "accounts.0.checking.balance", 200.0));
//! let path = tk.find(&data, &Value::Number(200.0).into_ref()).unwrap();
//! assert_eq!(path, "accounts.0.checking.balance");
//! ```

pub mod path;
pub mod search;
pub mod syntax;
pub mod toolkit;
pub mod value;

pub use path::CompiledPath;
pub use syntax::{Options, SimpleMode, SyntaxConfig, SyntaxError};
pub use toolkit::{PathArg, PathToolkit};
pub use value::{Value, ValueRef};
