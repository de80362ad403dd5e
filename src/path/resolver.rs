//! Token-tree interpreter.
//!
//! Walks a compiled path against a live data graph to read or write a
//! value. The resolver keeps a value-history stack — index 0 is the root,
//! each later entry the value produced by one token — to satisfy parent and
//! root references. Sub-resolutions for collection and container entries
//! receive a copy of the history, so sibling branches never observe each
//! other's pushes.
//!
//! All failures — malformed arguments, missing members, uncallable call
//! targets — are the `None` sentinel, never a panic or an error value, and
//! short-circuit the remaining tokens.

use super::token::{ExecKind, Mods, SubPath, Token};
use crate::syntax::{SyntaxConfig, WILDCARD};
use crate::value::{self, Value, ValueRef};

/// Interpreter for compiled paths under one syntax configuration.
pub struct Resolver<'a> {
    syntax: &'a SyntaxConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(syntax: &'a SyntaxConfig) -> Self {
        Resolver { syntax }
    }

    /// Evaluates `tokens` against `root`. `new_value` selects write mode;
    /// the assignment lands when the last token evaluates. `history` is
    /// `None` for a fresh top-level call, or a branch copy whose final entry
    /// is `root` for sub-resolutions.
    pub fn resolve(
        &self,
        root: &ValueRef,
        tokens: &[Token],
        new_value: Option<&ValueRef>,
        args: &[ValueRef],
        history: Option<Vec<ValueRef>>,
    ) -> Option<ValueRef> {
        if tokens.is_empty() {
            return None;
        }
        let last = tokens.len() - 1;
        let mut history = history.unwrap_or_else(|| vec![root.clone()]);
        let mut context = root.clone();

        for (idx, token) in tokens.iter().enumerate() {
            let here = idx == last;
            let produced = self.eval_token(&context, token, new_value, here, args, &mut history)?;
            history.push(produced.clone());
            context = produced;
        }
        Some(context)
    }

    fn eval_token(
        &self,
        context: &ValueRef,
        token: &Token,
        new_value: Option<&ValueRef>,
        here: bool,
        args: &[ValueRef],
        history: &mut Vec<ValueRef>,
    ) -> Option<ValueRef> {
        match token {
            Token::Prop(name) | Token::Literal(name) => {
                self.eval_prop(context, name, new_value, here)
            }
            Token::Word { text, mods } => {
                self.eval_word(context, text, mods, new_value, here, args, history)
            }
            Token::Group(entries) => {
                self.eval_group(context, entries, new_value, here, args, history)
            }
            Token::Sub(sub) => match sub.exec {
                ExecKind::Property => self.resolve(
                    context,
                    &sub.tokens,
                    new_value.filter(|_| here),
                    args,
                    Some(history.clone()),
                ),
                ExecKind::EvalProperty => {
                    self.eval_computed(context, sub, new_value, here, args, history)
                }
                ExecKind::Call => self.eval_call(context, sub, args, history),
            },
        }
    }

    /// Plain lookup. In write mode the terminal token assigns; earlier
    /// tokens may create an intermediate object under the force option.
    fn eval_prop(
        &self,
        context: &ValueRef,
        name: &str,
        new_value: Option<&ValueRef>,
        here: bool,
    ) -> Option<ValueRef> {
        if let Some(nv) = new_value {
            if here {
                if !value::set_member(context, name, nv.clone()) {
                    return None;
                }
            } else if self.syntax.force && !value::has_member(context, name) {
                value::set_member(context, name, Value::empty_object().into_ref());
            }
        }
        value::get_member(context, name)
    }

    /// A word with modifiers and/or a wildcard. Modifiers rewrite the
    /// context (parent/root) or the word itself (placeholder) before lookup;
    /// a context modifier short-circuits with the argument value.
    fn eval_word(
        &self,
        context: &ValueRef,
        text: &str,
        mods: &Mods,
        new_value: Option<&ValueRef>,
        here: bool,
        args: &[ValueRef],
        history: &mut Vec<ValueRef>,
    ) -> Option<ValueRef> {
        let mut context = context.clone();
        let mut text = text.to_string();

        if mods.parent > 0 {
            let idx = history.len().checked_sub(1 + mods.parent as usize)?;
            context = history[idx].clone();
        }
        if mods.root {
            // Start over at the root; later tokens see a fresh history.
            context = history[0].clone();
            history.truncate(1);
        }
        if mods.placeholder {
            let arg = argument(args, &text)?;
            text = arg.borrow().as_property_name()?;
        }
        if mods.context {
            return argument(args, &text).cloned();
        }

        let write = new_value.filter(|_| here);

        if let Some(found) = value::get_member(&context, &text) {
            if let Some(nv) = write {
                if !value::set_member(&context, &text, nv.clone()) {
                    return None;
                }
                return value::get_member(&context, &text);
            }
            return Some(found);
        }

        // The text of a word that is not a member of a callable names the
        // callable's argument, e.g. the sub-path of a call container.
        if context.borrow().is_func() {
            return Some(Value::String(text).into_ref());
        }

        if text.contains(WILDCARD) {
            let mut out = Vec::new();
            for name in value::member_names(&context) {
                if wild_card_match(&text, &name) {
                    if let Some(nv) = write {
                        if !value::set_member(&context, &name, nv.clone()) {
                            return None;
                        }
                    }
                    out.push(value::get_member(&context, &name)?);
                }
            }
            return Some(Value::Array(out).into_ref());
        }

        None
    }

    /// Collection fan-out: every entry evaluates against the same context
    /// with its own history copy; results concatenate in entry order, lists
    /// flattening one level. In write mode a computed-property entry assigns
    /// to the property it computes instead of contributing to the output.
    fn eval_group(
        &self,
        context: &ValueRef,
        entries: &[Token],
        new_value: Option<&ValueRef>,
        here: bool,
        args: &[ValueRef],
        history: &mut Vec<ValueRef>,
    ) -> Option<ValueRef> {
        let write = new_value.filter(|_| here);
        let mut out: Vec<ValueRef> = Vec::new();

        for entry in entries {
            if let Token::Sub(sub) = entry {
                if sub.exec == ExecKind::EvalProperty {
                    let name_ref =
                        self.resolve(context, &sub.tokens, None, args, Some(history.clone()))?;
                    let name = name_ref.borrow().as_property_name()?;
                    if let Some(nv) = write {
                        if !value::set_member(context, &name, nv.clone()) {
                            return None;
                        }
                    } else {
                        out.push(value::get_member(context, &name)?);
                    }
                    continue;
                }
            }

            let produced = self.resolve(
                context,
                std::slice::from_ref(entry),
                write,
                args,
                Some(history.clone()),
            )?;
            match &*produced.borrow() {
                Value::Array(items) => out.extend(items.iter().cloned()),
                _ => out.push(produced.clone()),
            };
        }

        Some(Value::Array(out).into_ref())
    }

    /// Computed property: the sub-path yields a property name which then
    /// behaves like a plain segment against the current context.
    fn eval_computed(
        &self,
        context: &ValueRef,
        sub: &SubPath,
        new_value: Option<&ValueRef>,
        here: bool,
        args: &[ValueRef],
        history: &mut Vec<ValueRef>,
    ) -> Option<ValueRef> {
        let name_ref = self.resolve(context, &sub.tokens, None, args, Some(history.clone()))?;
        let name = name_ref.borrow().as_property_name()?;
        if let Some(nv) = new_value.filter(|_| here) {
            if !value::set_member(context, &name, nv.clone()) {
                return None;
            }
        }
        value::get_member(context, &name)
    }

    /// Call invocation: the current context must be callable; the receiver
    /// is the value one level up in the history. An argument sub-path
    /// resolves against the callee with a fresh history and passes nothing,
    /// one value, or a spread list.
    fn eval_call(
        &self,
        context: &ValueRef,
        sub: &SubPath,
        args: &[ValueRef],
        history: &[ValueRef],
    ) -> Option<ValueRef> {
        let func = match &*context.borrow() {
            Value::Func(f) => f.clone(),
            _ => return None,
        };
        let receiver = history
            .len()
            .checked_sub(2)
            .map(|idx| history[idx].clone());

        if sub.tokens.is_empty() {
            return func(receiver.as_ref(), &[]);
        }
        match self.resolve(context, &sub.tokens, None, args, None) {
            None => func(receiver.as_ref(), &[]),
            Some(resolved) => {
                let call_args: Vec<ValueRef> = match &*resolved.borrow() {
                    Value::Array(items) => items.clone(),
                    _ => vec![resolved.clone()],
                };
                func(receiver.as_ref(), &call_args)
            }
        }
    }
}

/// Argument lookup for placeholder/context modifiers: the word text is a
/// 1-based index into the extra arguments.
fn argument<'v>(args: &'v [ValueRef], text: &str) -> Option<&'v ValueRef> {
    let n: usize = text.parse().ok()?;
    args.get(n.checked_sub(1)?)
}

/// Glob-style match with a single wildcard: prefix and suffix must both
/// match without overlapping. A template with no wildcard is an exact
/// comparison; a bare wildcard matches everything.
fn wild_card_match(template: &str, name: &str) -> bool {
    match template.split_once(WILDCARD) {
        None => template == name,
        Some((prefix, suffix)) => {
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
    }
}
