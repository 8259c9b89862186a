//! Template compilation: canonical printf text plus ordered arguments.

use crate::placeholder::{find_placeholders, CType};

/// One positional argument of a formatted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: String,
    pub ty: CType,
}

/// A formatted catalog value: printf-ready text and its arguments in
/// rendering order. Duplicate names are kept as separate positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub text: String,
    pub args: Vec<ArgSpec>,
}

/// A compiled catalog value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// No placeholders; the value is emitted verbatim.
    Plain(String),
    /// At least one placeholder; the value becomes a render function.
    Formatted(Template),
}

/// Compiles one raw catalog value.
///
/// Values without placeholders pass through untouched. Otherwise every
/// placeholder span is replaced by its bare conversion (`%price:8.2f%`
/// becomes `%8.2f`) and every percent outside a placeholder is doubled, so
/// the canonical text is safe to hand to the printf family. The canonical
/// text is built in a single left-to-right pass; inserted characters are
/// never rescanned.
pub fn compile(value: &str, wide: bool) -> Entry {
    let placeholders = find_placeholders(value, wide);
    if placeholders.is_empty() {
        return Entry::Plain(value.to_string());
    }

    let mut text = String::with_capacity(value.len());
    let mut args = Vec::with_capacity(placeholders.len());
    let mut pos = 0;
    for ph in &placeholders {
        push_escaped(&mut text, &value[pos..ph.start]);
        text.push('%');
        text.push_str(&ph.conversion);
        args.push(ArgSpec {
            name: ph.name.clone(),
            ty: ph.ty,
        });
        pos = ph.end;
    }
    push_escaped(&mut text, &value[pos..]);

    Entry::Formatted(Template { text, args })
}

/// Copies literal text, doubling every percent.
fn push_escaped(out: &mut String, chunk: &str) {
    for ch in chunk.chars() {
        out.push(ch);
        if ch == '%' {
            out.push('%');
        }
    }
}
