//! Token tree produced by the lexer.

use std::rc::Rc;

use crate::syntax::PrefixKind;

/// Modifier set accumulated from prefix characters on one word.
///
/// `parent` counts stacked parent prefixes. A word combines parent/root
/// freely with placeholder or context; placeholder and context both read the
/// word text as a 1-based argument index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mods {
    pub parent: u32,
    pub root: bool,
    pub placeholder: bool,
    pub context: bool,
}

impl Mods {
    pub fn any(&self) -> bool {
        self.parent > 0 || self.root || self.placeholder || self.context
    }

    pub(crate) fn add(&mut self, kind: PrefixKind) {
        match kind {
            PrefixKind::Parent => self.parent += 1,
            PrefixKind::Root => self.root = true,
            PrefixKind::Placeholder => self.placeholder = true,
            PrefixKind::Context => self.context = true,
        }
    }
}

/// How a container token is executed against its context.
///
/// Plain property containers are flattened into the surrounding token list
/// during lexing, so `Property` survives only on collection entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecKind {
    Property,
    Call,
    EvalProperty,
}

/// A container token: a tokenized sub-path plus its execution kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub tokens: Vec<Token>,
    pub exec: ExecKind,
}

/// One element of a compiled path.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A plain word: direct property or index lookup.
    Prop(String),
    /// A word carrying modifiers and/or a wildcard.
    Word { text: String, mods: Mods },
    /// Quoted content, taken verbatim and never re-tokenized.
    Literal(String),
    /// A call or computed-property container (or a grouped sub-path inside
    /// a collection).
    Sub(SubPath),
    /// A collection: sibling entries evaluated against the same context.
    Group(Vec<Token>),
}

impl Token {
    /// Plain tokens can be walked by the fast path without interpretation.
    pub fn is_plain(&self) -> bool {
        matches!(self, Token::Prop(_))
    }
}

/// A compiled path: the reusable result of tokenizing a path string.
///
/// Cheap to clone and to pass back into `get`/`set`, skipping the lexer.
#[derive(Debug, Clone)]
pub struct CompiledPath {
    tokens: Rc<Vec<Token>>,
    simple: bool,
}

impl CompiledPath {
    pub(crate) fn new(tokens: Rc<Vec<Token>>) -> Self {
        let simple = tokens.iter().all(Token::is_plain);
        CompiledPath { tokens, simple }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether every token is a plain word, making the path eligible for
    /// the fast-path walker.
    pub fn is_simple(&self) -> bool {
        self.simple
    }
}
