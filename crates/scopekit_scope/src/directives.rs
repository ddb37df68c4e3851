//! Directive comments: `/* global name:value */` and `/* exported name */`.
//!
//! Only block comments carry directives. A trailing description introduced
//! by whitespace, two or more dashes and whitespace is ignored, so
//! `/* global foo -- provided by the page */` declares `foo`.

use indexmap::IndexMap;
use scopekit_ast::{Ast, CommentId};
use scopekit_core::InternedString;
use scopekit_options::GlobalValue;
use unicode_xid::UnicodeXID;

/// A global declared by one or more `global` directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineGlobal {
    /// The value of the last occurrence.
    pub value: GlobalValue,
    /// Every comment that declared the name, in source order.
    pub comments: Vec<CommentId>,
}

#[derive(Debug, Clone, Default)]
pub struct DirectiveComments {
    /// Inline globals in first-appearance order.
    pub globals: IndexMap<InternedString, InlineGlobal>,
    /// Names listed in `exported` directives.
    pub exported: IndexMap<InternedString, CommentId>,
}

impl DirectiveComments {
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.exported.is_empty()
    }
}

/// Scan the comments of `ast` for directives.
pub fn parse_directives(ast: &Ast) -> DirectiveComments {
    let mut directives = DirectiveComments::default();
    for (index, comment) in ast.comments().iter().enumerate() {
        if !comment.is_block() {
            continue;
        }
        let id = CommentId(index as u32);
        let text = strip_description(&comment.value);

        if let Some(rest) = directive_body(text, "globals").or_else(|| directive_body(text, "global")) {
            for (name, value) in rest.split(',').filter_map(parse_global_entry) {
                let name = ast.interner().intern(name);
                let value = GlobalValue::from_directive(value);
                directives
                    .globals
                    .entry(name)
                    .and_modify(|global| {
                        global.value = value;
                        if global.comments.last() != Some(&id) {
                            global.comments.push(id);
                        }
                    })
                    .or_insert_with(|| InlineGlobal {
                        value,
                        comments: vec![id],
                    });
            }
        } else if let Some(rest) = directive_body(text, "exported") {
            for name in rest.split(',').map(str::trim).filter(|name| is_identifier_name(name)) {
                directives.exported.insert(ast.interner().intern(name), id);
            }
        }
    }
    directives
}

/// The text after `keyword` when `text` is `keyword` followed by whitespace.
fn directive_body<'t>(text: &'t str, keyword: &str) -> Option<&'t str> {
    let rest = text.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then_some(rest)
}

/// Drop a ` -- description` suffix and surrounding whitespace.
fn strip_description(value: &str) -> &str {
    for (index, c) in value.char_indices() {
        if !c.is_whitespace() {
            continue;
        }
        let after = &value[index + c.len_utf8()..];
        let dashes = after.len() - after.trim_start_matches('-').len();
        if dashes >= 2 && after[dashes..].starts_with(char::is_whitespace) {
            return value[..index].trim();
        }
    }
    value.trim()
}

/// `name` or `name:value`, with optional whitespace after the colon.
fn parse_global_entry(entry: &str) -> Option<(&str, Option<&str>)> {
    let entry = entry.trim();
    let (name, value) = match entry.split_once(':') {
        Some((name, value)) => {
            let value = value.trim_start();
            if value.is_empty() || value.contains(char::is_whitespace) {
                return None;
            }
            (name, Some(value))
        }
        None => (entry, None),
    };
    is_identifier_name(name).then_some((name, value))
}

/// Whether `name` is a JavaScript identifier name.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || UnicodeXID::is_xid_start(c)
}

fn is_identifier_part(c: char) -> bool {
    c == '$' || UnicodeXID::is_xid_continue(c)
}
