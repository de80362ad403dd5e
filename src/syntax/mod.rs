//! Syntax configuration for the path DSL.
//!
//! Every special character of the path language is reconfigurable at
//! runtime. A [`SyntaxConfig`] maps single characters to roles in three
//! disjoint groups: prefixes (parent/root/placeholder/context), separators
//! (property/collection), and containers (property grouping, quotes, call,
//! computed property — each with a closing character). The wildcard `*` and
//! the escape `\` are fixed and can never be bound to a role.
//!
//! A character holds at most one role at a time. Per-role setters atomically
//! replace the character currently holding that role; binding a character
//! that already has a different role is a [`SyntaxError`] and leaves the
//! configuration unchanged.
//!
//! # Example
//!
//! ```
//! use pathquill::syntax::{SeparatorKind, SyntaxConfig};
//!
//! let mut config = SyntaxConfig::default();
//! assert_eq!(config.property_separator(), '.');
//!
//! config.set_separator(SeparatorKind::Property, '/').unwrap();
//! assert_eq!(config.property_separator(), '/');
//!
//! // '<' is the parent prefix; it cannot also be a separator.
//! assert!(config.set_separator(SeparatorKind::Collection, '<').is_err());
//! ```

pub mod classes;
pub mod error;

pub use classes::CharClasses;
pub use error::SyntaxError;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The wildcard character. Fixed: it can never be bound to a role.
pub const WILDCARD: char = '*';

/// The escape character. The character following it is taken literally.
pub const ESCAPE: char = '\\';

/// Maximum container nesting depth accepted by the lexer.
pub const MAX_NESTING: usize = 64;

/// Roles a prefix character can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixKind {
    /// Rewind context one level up the value history (repeatable).
    Parent,
    /// Reset context to the root value.
    Root,
    /// Substitute the word with a stringified extra argument.
    Placeholder,
    /// Substitute an extra argument directly as the result.
    Context,
}

/// Roles a separator character can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorKind {
    /// Ends the current word and descends one level.
    Property,
    /// Ends the current word and adds it to a collection of siblings.
    Collection,
}

/// Roles a container opener can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Grouping; equivalent to a property separator.
    Property,
    /// Literal content, single-quote style.
    SingleQuote,
    /// Literal content, double-quote style.
    DoubleQuote,
    /// Invoke the current context as a callable.
    Call,
    /// Resolve the content to a computed property name.
    EvalProperty,
}

impl ContainerKind {
    /// Quote containers capture their content verbatim and never nest.
    pub fn is_quote(self) -> bool {
        matches!(self, ContainerKind::SingleQuote | ContainerKind::DoubleQuote)
    }
}

/// A container binding: the closing character plus the container's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDef {
    pub closer: char,
    pub kind: ContainerKind,
}

/// The live character-to-role table driving the lexer and resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxConfig {
    pub prefixes: IndexMap<char, PrefixKind>,
    pub separators: IndexMap<char, SeparatorKind>,
    pub containers: IndexMap<char, ContainerDef>,
    /// Memoize compiled paths keyed on the raw string.
    pub use_cache: bool,
    /// Create intermediate objects for missing members during `set`.
    pub force: bool,
    /// Grammar collapsed to a lone property separator.
    pub simple: bool,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        let mut prefixes = IndexMap::new();
        prefixes.insert('<', PrefixKind::Parent);
        prefixes.insert('~', PrefixKind::Root);
        prefixes.insert('%', PrefixKind::Placeholder);
        prefixes.insert('@', PrefixKind::Context);

        let mut separators = IndexMap::new();
        separators.insert('.', SeparatorKind::Property);
        separators.insert(',', SeparatorKind::Collection);

        let mut containers = IndexMap::new();
        containers.insert(
            '[',
            ContainerDef {
                closer: ']',
                kind: ContainerKind::Property,
            },
        );
        containers.insert(
            '\'',
            ContainerDef {
                closer: '\'',
                kind: ContainerKind::SingleQuote,
            },
        );
        containers.insert(
            '"',
            ContainerDef {
                closer: '"',
                kind: ContainerKind::DoubleQuote,
            },
        );
        containers.insert(
            '(',
            ContainerDef {
                closer: ')',
                kind: ContainerKind::Call,
            },
        );
        containers.insert(
            '{',
            ContainerDef {
                closer: '}',
                kind: ContainerKind::EvalProperty,
            },
        );

        SyntaxConfig {
            prefixes,
            separators,
            containers,
            use_cache: true,
            force: false,
            simple: false,
        }
    }
}

impl SyntaxConfig {
    /// The character currently bound as the property separator.
    pub fn property_separator(&self) -> char {
        self.separators
            .iter()
            .find(|(_, kind)| **kind == SeparatorKind::Property)
            .map(|(ch, _)| *ch)
            .unwrap_or('.')
    }

    /// The opener of the single-quote container, if one is bound.
    pub fn quote_char(&self) -> Option<char> {
        self.containers
            .iter()
            .find(|(_, def)| def.kind == ContainerKind::SingleQuote)
            .map(|(ch, _)| *ch)
    }

    /// Binds `ch` as the prefix for `kind`, replacing the previous binding.
    pub fn set_prefix(&mut self, kind: PrefixKind, ch: char) -> Result<(), SyntaxError> {
        let role = prefix_role(kind);
        check_usable(role, ch)?;
        if self.separators.contains_key(&ch)
            || self.containers.contains_key(&ch)
            || self.prefixes.get(&ch).is_some_and(|k| *k != kind)
        {
            return Err(SyntaxError::ValueInUse { role, value: ch });
        }
        self.prefixes.retain(|_, k| *k != kind);
        self.prefixes.insert(ch, kind);
        Ok(())
    }

    /// Binds `ch` as the separator for `kind`, replacing the previous binding.
    pub fn set_separator(&mut self, kind: SeparatorKind, ch: char) -> Result<(), SyntaxError> {
        let role = separator_role(kind);
        check_usable(role, ch)?;
        if self.prefixes.contains_key(&ch)
            || self.containers.contains_key(&ch)
            || self.separators.get(&ch).is_some_and(|k| *k != kind)
        {
            return Err(SyntaxError::ValueInUse { role, value: ch });
        }
        self.separators.retain(|_, k| *k != kind);
        self.separators.insert(ch, kind);
        Ok(())
    }

    /// Binds `opener`/`closer` as the container for `kind`, replacing the
    /// previous binding.
    pub fn set_container(
        &mut self,
        kind: ContainerKind,
        opener: char,
        closer: char,
    ) -> Result<(), SyntaxError> {
        let role = container_role(kind);
        check_usable(role, opener)?;
        if self.prefixes.contains_key(&opener)
            || self.separators.contains_key(&opener)
            || self.containers.get(&opener).is_some_and(|d| d.kind != kind)
        {
            return Err(SyntaxError::ValueInUse {
                role,
                value: opener,
            });
        }
        self.containers.retain(|_, d| d.kind != kind);
        self.containers.insert(opener, ContainerDef { closer, kind });
        Ok(())
    }

    /// Collapses the grammar to a lone property separator: no prefixes, no
    /// containers, no collections.
    pub fn apply_simple(&mut self, separator: Option<char>) {
        let sep = separator.unwrap_or('.');
        self.prefixes.clear();
        self.containers.clear();
        self.separators.clear();
        self.separators.insert(sep, SeparatorKind::Property);
        self.simple = true;
    }

    /// Restores the default grammar, preserving the cache and force flags.
    pub fn restore_defaults(&mut self) {
        let use_cache = self.use_cache;
        let force = self.force;
        *self = SyntaxConfig::default();
        self.use_cache = use_cache;
        self.force = force;
    }

    /// Checks the one-role-per-character invariant across all three maps.
    /// Used after bulk map replacement, where no setter guards the swap.
    pub fn validate(&self) -> Result<(), SyntaxError> {
        for ch in self.prefixes.keys() {
            check_usable("prefixes", *ch)?;
            if self.separators.contains_key(ch) || self.containers.contains_key(ch) {
                return Err(SyntaxError::ValueInUse {
                    role: "prefixes",
                    value: *ch,
                });
            }
        }
        for ch in self.separators.keys() {
            check_usable("separators", *ch)?;
            if self.containers.contains_key(ch) {
                return Err(SyntaxError::ValueInUse {
                    role: "separators",
                    value: *ch,
                });
            }
        }
        for ch in self.containers.keys() {
            check_usable("containers", *ch)?;
        }
        Ok(())
    }

    /// Merges an [`Options`] bundle into this configuration. Map replacement
    /// is validated as a whole before anything is committed.
    pub fn apply_options(&mut self, options: &Options) -> Result<(), SyntaxError> {
        let mut candidate = self.clone();
        if let Some(prefixes) = &options.prefixes {
            candidate.prefixes = prefixes.clone();
        }
        if let Some(separators) = &options.separators {
            candidate.separators = separators.clone();
        }
        if let Some(containers) = &options.containers {
            candidate.containers = containers.clone();
        }
        if let Some(cache) = options.cache {
            candidate.use_cache = cache;
        }
        if let Some(simple) = &options.simple {
            match simple {
                SimpleMode::Flag(true) => candidate.apply_simple(None),
                SimpleMode::Flag(false) => candidate.restore_defaults(),
                SimpleMode::Separator(sep) => candidate.apply_simple(Some(*sep)),
            }
        }
        if let Some(force) = options.force {
            candidate.force = force;
        }
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }
}

/// Simple-mode request: a flag, or a separator character implying the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimpleMode {
    Flag(bool),
    Separator(char),
}

/// Optional configuration bundle with merge semantics: every field that is
/// present replaces the corresponding part of the configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub prefixes: Option<IndexMap<char, PrefixKind>>,
    pub separators: Option<IndexMap<char, SeparatorKind>>,
    pub containers: Option<IndexMap<char, ContainerDef>>,
    pub cache: Option<bool>,
    pub simple: Option<SimpleMode>,
    pub force: Option<bool>,
}

fn check_usable(role: &'static str, ch: char) -> Result<(), SyntaxError> {
    if ch == WILDCARD || ch == ESCAPE {
        Err(SyntaxError::InvalidValue { role, value: ch })
    } else {
        Ok(())
    }
}

fn prefix_role(kind: PrefixKind) -> &'static str {
    match kind {
        PrefixKind::Parent => "prefix_parent",
        PrefixKind::Root => "prefix_root",
        PrefixKind::Placeholder => "prefix_placeholder",
        PrefixKind::Context => "prefix_context",
    }
}

fn separator_role(kind: SeparatorKind) -> &'static str {
    match kind {
        SeparatorKind::Property => "separator_property",
        SeparatorKind::Collection => "separator_collection",
    }
}

fn container_role(kind: ContainerKind) -> &'static str {
    match kind {
        ContainerKind::Property => "container_property",
        ContainerKind::SingleQuote => "container_singlequote",
        ContainerKind::DoubleQuote => "container_doublequote",
        ContainerKind::Call => "container_call",
        ContainerKind::EvalProperty => "container_eval_property",
    }
}
