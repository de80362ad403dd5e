//! Character classes derived from a syntax configuration.
//!
//! The lexer never matches literal characters; it consults these derived
//! sets, rebuilt whenever the configuration changes. Two sets matter: the
//! full special set (every bound character, closers, wildcard, escape) used
//! for escaping and quoting, and the simple-path breaker set (specials minus
//! the property separator) used to detect paths that need no tokenization.

use std::collections::HashSet;

use super::{SyntaxConfig, ESCAPE, WILDCARD};

/// Precomputed character sets for one syntax configuration.
#[derive(Debug, Clone)]
pub struct CharClasses {
    property_separator: char,
    quote_char: char,
    specials: HashSet<char>,
    simple_breakers: HashSet<char>,
}

impl CharClasses {
    /// Derives the character classes for `config`.
    pub fn derive(config: &SyntaxConfig) -> Self {
        let property_separator = config.property_separator();

        let mut specials = HashSet::new();
        specials.insert(ESCAPE);
        specials.insert(WILDCARD);
        specials.extend(config.prefixes.keys().copied());
        specials.extend(config.separators.keys().copied());
        specials.extend(config.containers.keys().copied());
        specials.extend(config.containers.values().map(|d| d.closer));

        let mut simple_breakers = HashSet::new();
        simple_breakers.insert(ESCAPE);
        simple_breakers.insert(WILDCARD);
        simple_breakers.extend(config.prefixes.keys().copied());
        simple_breakers.extend(
            config
                .separators
                .keys()
                .copied()
                .filter(|ch| *ch != property_separator),
        );
        simple_breakers.extend(config.containers.keys().copied());

        CharClasses {
            property_separator,
            quote_char: config.quote_char().unwrap_or('\''),
            specials,
            simple_breakers,
        }
    }

    pub fn property_separator(&self) -> char {
        self.property_separator
    }

    /// The quoting character used when reverse search renders a key that
    /// contains special characters.
    pub fn quote_char(&self) -> char {
        self.quote_char
    }

    /// Whether `ch` has any special meaning under the current grammar.
    pub fn is_special(&self, ch: char) -> bool {
        self.specials.contains(&ch)
    }

    /// A simple path contains nothing but plain words and the property
    /// separator; it can be walked without tokenization.
    pub fn is_simple(&self, path: &str) -> bool {
        !path.chars().any(|ch| self.simple_breakers.contains(&ch))
    }

    /// Drops backslashes that escape characters with no special meaning.
    /// Escapes of special characters (and of the escape itself) survive for
    /// the lexer to interpret.
    pub fn strip_redundant_escapes(&self, path: &str) -> String {
        let mut out = String::with_capacity(path.len());
        let mut chars = path.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == ESCAPE {
                match chars.peek() {
                    Some(next) if !self.is_special(*next) => {
                        out.push(*next);
                        chars.next();
                    }
                    Some(next) => {
                        out.push(ESCAPE);
                        out.push(*next);
                        chars.next();
                    }
                    // Trailing escape; the lexer rejects it.
                    None => out.push(ESCAPE),
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Escapes every special character in `raw` so the result can be used
    /// as a literal property name inside a path.
    pub fn escape(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for ch in raw.chars() {
            if self.is_special(ch) {
                out.push(ESCAPE);
            }
            out.push(ch);
        }
        out
    }

    /// Wraps `raw` in the quote container, escaping embedded quotes.
    pub fn quote(&self, raw: &str) -> String {
        let q = self.quote_char;
        let mut out = String::with_capacity(raw.len() + 2);
        out.push(q);
        for ch in raw.chars() {
            if ch == q {
                out.push(ESCAPE);
            }
            out.push(ch);
        }
        out.push(q);
        out
    }
}

impl Default for CharClasses {
    fn default() -> Self {
        CharClasses::derive(&SyntaxConfig::default())
    }
}
