//! The user-facing toolkit: one object owning a syntax configuration, its
//! derived character classes, and a compiled-path cache.
//!
//! [`PathToolkit`] routes each request down one of two lanes. Paths made
//! only of plain property names and separators take the fast lane in
//! [`quick`], skipping compilation. Anything carrying syntax — prefixes,
//! collections, containers, wildcards, escapes — is compiled by the lexer
//! (consulting the cache) and interpreted by the resolver.
//!
//! Reads and writes share `&self`; only configuration changes need
//! `&mut self`, and every successful change rebuilds the character classes
//! and drops the cache.

pub mod quick;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::path::{CompiledPath, Lexer, Resolver, Token};
use crate::search::Finder;
use crate::syntax::{
    CharClasses, ContainerKind, Options, PrefixKind, SeparatorKind, SimpleMode, SyntaxConfig,
    SyntaxError,
};
use crate::value::{Value, ValueRef};

/// A path argument: raw text, or a previously compiled path.
pub enum PathArg<'a> {
    Text(&'a str),
    Compiled(&'a CompiledPath),
}

impl<'a> From<&'a str> for PathArg<'a> {
    fn from(text: &'a str) -> Self {
        PathArg::Text(text)
    }
}

impl<'a> From<&'a String> for PathArg<'a> {
    fn from(text: &'a String) -> Self {
        PathArg::Text(text)
    }
}

impl<'a> From<&'a CompiledPath> for PathArg<'a> {
    fn from(compiled: &'a CompiledPath) -> Self {
        PathArg::Compiled(compiled)
    }
}

/// Path-query engine with a runtime-configurable grammar.
pub struct PathToolkit {
    syntax: SyntaxConfig,
    classes: CharClasses,
    cache: RefCell<HashMap<String, Rc<Vec<Token>>>>,
}

impl Default for PathToolkit {
    fn default() -> Self {
        PathToolkit::new()
    }
}

impl PathToolkit {
    /// A toolkit with the default grammar, caching on and force off.
    pub fn new() -> Self {
        let syntax = SyntaxConfig::default();
        let classes = CharClasses::derive(&syntax);
        PathToolkit {
            syntax,
            classes,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// A toolkit with `options` merged over the defaults.
    pub fn with_options(options: &Options) -> Result<Self, SyntaxError> {
        let mut toolkit = PathToolkit::new();
        toolkit.set_options(options)?;
        Ok(toolkit)
    }

    /// The active syntax configuration.
    pub fn syntax(&self) -> &SyntaxConfig {
        &self.syntax
    }

    // ---- reading and writing ----

    /// Resolves `path` against `data`, yielding the value it reaches.
    pub fn get<'a>(&self, data: &ValueRef, path: impl Into<PathArg<'a>>) -> Option<ValueRef> {
        self.dispatch(data, path.into(), None, &[])
    }

    /// [`get`](Self::get) with extra arguments for placeholder and context
    /// substitution.
    pub fn get_with<'a>(
        &self,
        data: &ValueRef,
        path: impl Into<PathArg<'a>>,
        args: &[ValueRef],
    ) -> Option<ValueRef> {
        self.dispatch(data, path.into(), None, args)
    }

    /// Writes `value` at `path`, reporting whether the assignment landed.
    /// Fan-out paths (collections, wildcards) write every target.
    pub fn set<'a>(
        &self,
        data: &ValueRef,
        path: impl Into<PathArg<'a>>,
        value: impl Into<Value>,
    ) -> bool {
        self.set_with(data, path, value, &[])
    }

    /// [`set`](Self::set) with extra substitution arguments.
    pub fn set_with<'a>(
        &self,
        data: &ValueRef,
        path: impl Into<PathArg<'a>>,
        value: impl Into<Value>,
        args: &[ValueRef],
    ) -> bool {
        let new_value = value.into().into_ref();
        self.dispatch(data, path.into(), Some(&new_value), args)
            .is_some()
    }

    fn dispatch(
        &self,
        data: &ValueRef,
        path: PathArg,
        new_value: Option<&ValueRef>,
        args: &[ValueRef],
    ) -> Option<ValueRef> {
        match path {
            PathArg::Text(text) => {
                if self.classes.is_simple(text) {
                    return quick::resolve_string(
                        data,
                        text,
                        self.classes.property_separator(),
                        new_value,
                        self.syntax.force,
                    );
                }
                let tokens = self.tokenize(text)?;
                Resolver::new(&self.syntax).resolve(data, &tokens, new_value, args, None)
            }
            PathArg::Compiled(compiled) => {
                if compiled.is_simple() && args.is_empty() {
                    let segments: Vec<&str> = compiled
                        .tokens()
                        .iter()
                        .filter_map(|token| match token {
                            Token::Prop(name) => Some(name.as_str()),
                            _ => None,
                        })
                        .collect();
                    return quick::resolve_segments(data, &segments, new_value, self.syntax.force);
                }
                Resolver::new(&self.syntax).resolve(data, compiled.tokens(), new_value, args, None)
            }
        }
    }

    // ---- compilation ----

    /// Compiles `path` for repeated evaluation. `None` when the path does
    /// not parse under the active grammar.
    pub fn get_tokens(&self, path: &str) -> Option<CompiledPath> {
        Some(CompiledPath::new(self.tokenize(path)?))
    }

    /// Whether `path` parses under the active grammar.
    pub fn is_valid(&self, path: &str) -> bool {
        self.tokenize(path).is_some()
    }

    /// Backslash-escapes every syntax character in `segment` so it reads as
    /// a plain property name.
    pub fn escape(&self, segment: &str) -> String {
        self.classes.escape(segment)
    }

    fn tokenize(&self, text: &str) -> Option<Rc<Vec<Token>>> {
        if self.syntax.use_cache {
            if let Some(hit) = self.cache.borrow().get(text) {
                return Some(hit.clone());
            }
        }
        let tokens = Rc::new(Lexer::new(&self.syntax, &self.classes).tokenize(text)?);
        if self.syntax.use_cache {
            self.cache
                .borrow_mut()
                .insert(text.to_string(), tokens.clone());
        }
        Some(tokens)
    }

    // ---- searching ----

    /// The first path in `data` whose value equals `target`. Paths come
    /// back ready to feed to [`get`](Self::get).
    pub fn find(&self, data: &ValueRef, target: &ValueRef) -> Option<String> {
        Finder::new(&self.classes).find_first(data, target)
    }

    /// Every path in `data` whose value equals `target`, in scan order.
    pub fn find_all(&self, data: &ValueRef, target: &ValueRef) -> Vec<String> {
        Finder::new(&self.classes).find_all(data, target)
    }

    // ---- configuration ----

    /// Merges an options bundle into the active configuration.
    pub fn set_options(&mut self, options: &Options) -> Result<(), SyntaxError> {
        self.syntax.apply_options(options)?;
        self.refresh();
        Ok(())
    }

    /// Restores the default grammar, keeping the cache and force flags.
    pub fn reset_options(&mut self) {
        self.syntax.restore_defaults();
        self.refresh();
    }

    /// Toggles compiled-path caching. Turning it off drops cached paths.
    pub fn set_cache(&mut self, enabled: bool) {
        self.syntax.use_cache = enabled;
        if !enabled {
            self.cache.borrow_mut().clear();
        }
    }

    /// Toggles creation of missing intermediates during writes.
    pub fn set_force(&mut self, enabled: bool) {
        self.syntax.force = enabled;
    }

    /// Switches simple mode on (optionally with a separator) or back off.
    pub fn set_simple(&mut self, mode: SimpleMode) {
        match mode {
            SimpleMode::Flag(true) => self.syntax.apply_simple(None),
            SimpleMode::Flag(false) => self.syntax.restore_defaults(),
            SimpleMode::Separator(sep) => self.syntax.apply_simple(Some(sep)),
        }
        self.refresh();
    }

    /// Rebinds the character for one prefix role.
    pub fn set_prefix(&mut self, kind: PrefixKind, ch: char) -> Result<(), SyntaxError> {
        self.syntax.set_prefix(kind, ch)?;
        self.refresh();
        Ok(())
    }

    /// Rebinds the character for one separator role.
    pub fn set_separator(&mut self, kind: SeparatorKind, ch: char) -> Result<(), SyntaxError> {
        self.syntax.set_separator(kind, ch)?;
        self.refresh();
        Ok(())
    }

    /// Rebinds the opener and closer for one container role.
    pub fn set_container(
        &mut self,
        kind: ContainerKind,
        opener: char,
        closer: char,
    ) -> Result<(), SyntaxError> {
        self.syntax.set_container(kind, opener, closer)?;
        self.refresh();
        Ok(())
    }

    // Derived state follows the grammar; stale compiled paths must not
    // survive a grammar change.
    fn refresh(&mut self) {
        self.classes = CharClasses::derive(&self.syntax);
        self.cache.borrow_mut().clear();
    }
}
