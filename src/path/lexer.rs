//! Path string tokenizer.
//!
//! Converts a path string into a token tree under the live syntax
//! configuration. The lexer is a pure function of (string, configuration):
//! memoization lives in the toolkit, not here.
//!
//! A malformed path (unbalanced containers, trailing escape, prefix with no
//! following word) produces `None` — the "no value" sentinel — rather than
//! an error value, so resolution composes without branching on failure
//! shape.

use super::token::{ExecKind, Mods, SubPath, Token};
use crate::syntax::{
    CharClasses, ContainerDef, ContainerKind, SeparatorKind, SyntaxConfig, ESCAPE, MAX_NESTING,
    WILDCARD,
};

/// Tokenizer for path strings under one syntax configuration.
pub struct Lexer<'a> {
    syntax: &'a SyntaxConfig,
    classes: &'a CharClasses,
}

impl<'a> Lexer<'a> {
    pub fn new(syntax: &'a SyntaxConfig, classes: &'a CharClasses) -> Self {
        Lexer { syntax, classes }
    }

    /// Tokenizes `path`. Returns `None` for malformed input.
    pub fn tokenize(&self, path: &str) -> Option<Vec<Token>> {
        let stripped = self.classes.strip_redundant_escapes(path);

        // A path with no special characters is just its separator split.
        if self.classes.is_simple(&stripped) {
            let sep = self.classes.property_separator();
            return Some(
                stripped
                    .split(sep)
                    .map(|segment| Token::Prop(segment.to_string()))
                    .collect(),
            );
        }

        let chars: Vec<char> = stripped.chars().collect();
        self.scan(&chars, 0)
    }

    /// Single left-to-right scan over `chars`, recursing once per container
    /// nesting level.
    fn scan(&self, chars: &[char], nest: usize) -> Option<Vec<Token>> {
        if nest > MAX_NESTING {
            return None;
        }

        let mut tokens: Vec<Token> = Vec::new();
        let mut collection: Vec<Token> = Vec::new();
        let mut word = String::new();
        let mut mods = Mods::default();
        let mut has_wildcard = false;
        let mut i = 0;

        while i < chars.len() {
            let mut ch = chars[i];
            let mut escaped = false;
            if ch == ESCAPE {
                if i + 1 >= chars.len() {
                    // Trailing escape.
                    return None;
                }
                i += 1;
                ch = chars[i];
                escaped = true;
            }

            if !escaped {
                if let Some(def) = self.syntax.containers.get(&ch).copied() {
                    // A container opening closes the pending word, exactly
                    // like a separator.
                    if let Some(token) = close_word(&mut word, &mut mods, &mut has_wildcard) {
                        if collection.is_empty() {
                            tokens.push(token);
                        } else {
                            collection.push(token);
                        }
                    }

                    let (content, next) = self.capture(chars, i, ch, &def)?;
                    i = next;

                    let entry = if def.kind.is_quote() {
                        Token::Literal(content)
                    } else {
                        let sub_chars: Vec<char> = content.chars().collect();
                        let sub_tokens = self.scan(&sub_chars, nest + 1)?;
                        let exec = match def.kind {
                            ContainerKind::Call => ExecKind::Call,
                            ContainerKind::EvalProperty => ExecKind::EvalProperty,
                            _ => ExecKind::Property,
                        };
                        Token::Sub(SubPath {
                            tokens: sub_tokens,
                            exec,
                        })
                    };

                    // A collection separator right after the closer keeps
                    // the collection open for further entries.
                    let next_is_collection = chars.get(i).is_some_and(|c| {
                        self.syntax.separators.get(c) == Some(&SeparatorKind::Collection)
                    });
                    if next_is_collection {
                        collection.push(entry);
                    } else if !collection.is_empty() {
                        collection.push(entry);
                        tokens.push(Token::Group(std::mem::take(&mut collection)));
                    } else {
                        match entry {
                            // A plain grouping container is equivalent to a
                            // separator-joined sequence: splice it flat.
                            Token::Sub(sub) if sub.exec == ExecKind::Property => {
                                tokens.extend(sub.tokens)
                            }
                            other => tokens.push(other),
                        }
                    }
                    continue;
                }

                if let Some(kind) = self.syntax.prefixes.get(&ch).copied() {
                    mods.add(kind);
                    i += 1;
                    continue;
                }

                if let Some(sep) = self.syntax.separators.get(&ch).copied() {
                    if word.is_empty() && mods.any() {
                        // Prefixes with no word to modify.
                        return None;
                    }
                    let token = close_word(&mut word, &mut mods, &mut has_wildcard);
                    match sep {
                        SeparatorKind::Property => {
                            if !collection.is_empty() {
                                if let Some(token) = token {
                                    collection.push(token);
                                }
                                tokens.push(Token::Group(std::mem::take(&mut collection)));
                            } else if let Some(token) = token {
                                tokens.push(token);
                            }
                        }
                        SeparatorKind::Collection => {
                            if let Some(token) = token {
                                collection.push(token);
                            }
                        }
                    }
                    i += 1;
                    continue;
                }
            }

            if !escaped && ch == WILDCARD {
                has_wildcard = true;
            }
            word.push(ch);
            i += 1;
        }

        // End of input: dangling prefixes have no word to modify.
        if word.is_empty() && mods.any() {
            return None;
        }

        // Flush the trailing word and collection as a separator would.
        let token = close_word(&mut word, &mut mods, &mut has_wildcard);
        if !collection.is_empty() {
            if let Some(token) = token {
                collection.push(token);
            }
            tokens.push(Token::Group(collection));
        } else if let Some(token) = token {
            tokens.push(token);
        }

        Some(tokens)
    }

    /// Captures the raw content of a container starting at `open_idx`,
    /// returning it together with the index just past the closer.
    ///
    /// Non-quote containers self-nest; quote containers (opener == closer)
    /// do not. Escapes survive into the content for re-tokenization, except
    /// inside quotes where they resolve immediately.
    fn capture(
        &self,
        chars: &[char],
        open_idx: usize,
        opener: char,
        def: &ContainerDef,
    ) -> Option<(String, usize)> {
        let closer = def.closer;
        let quote = def.kind.is_quote();
        let mut depth = 1usize;
        let mut out = String::new();
        let mut i = open_idx + 1;

        while i < chars.len() {
            let ch = chars[i];
            if ch == ESCAPE {
                if i + 1 >= chars.len() {
                    return None;
                }
                if quote {
                    out.push(chars[i + 1]);
                } else {
                    out.push(ESCAPE);
                    out.push(chars[i + 1]);
                }
                i += 2;
                continue;
            }
            if ch == opener && opener != closer {
                depth += 1;
            } else if ch == closer {
                depth -= 1;
                if depth == 0 {
                    return Some((out, i + 1));
                }
            }
            out.push(ch);
            i += 1;
        }

        // Unbalanced container.
        None
    }
}

/// Wraps the pending word into a token, resetting the word state. A word
/// with modifiers or a wildcard needs interpreter handling; anything else is
/// a plain property.
fn close_word(word: &mut String, mods: &mut Mods, has_wildcard: &mut bool) -> Option<Token> {
    if word.is_empty() {
        // Pending prefixes stay pending; they bind to the next word.
        *has_wildcard = false;
        return None;
    }
    let text = std::mem::take(word);
    let token = if mods.any() || *has_wildcard {
        Token::Word {
            text,
            mods: std::mem::take(mods),
        }
    } else {
        Token::Prop(text)
    };
    *has_wildcard = false;
    Some(token)
}
