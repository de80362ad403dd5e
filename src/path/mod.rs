//! Path compilation and evaluation.
//!
//! A path expression is compiled by the [`Lexer`] into a flat list of
//! [`Token`]s, then interpreted by the [`Resolver`] against a data graph.
//! With the default syntax:
//!
//! ```text
//! accounts.0.checking.id      plain property walk
//! accounts.0.ary.*            wildcard over member names
//! propA,propB                 collection of sibling branches
//! ['a.b']                     quoted property containing specials
//! accounts{~idx}id            computed property name
//! accounts.0.getTotal()       call invocation
//! <sibling  ~fromRoot         parent and root references
//! %1  @1                      argument substitution
//! ```
//!
//! Compiled token lists are immutable and shareable; [`CompiledPath`] wraps
//! one for repeated evaluation without re-lexing.

pub mod lexer;
pub mod resolver;
pub mod token;

pub use lexer::Lexer;
pub use resolver::Resolver;
pub use token::{CompiledPath, ExecKind, Mods, SubPath, Token};
