//! Collection literal rendering.
//!
//! `{a, b}` for sets, `[a, b]` for lists, `{k:v, ...}` for maps. Strings are
//! single-quoted without escaping; everything else is emitted bare.

use crate::ast::{CollectionKind, CollectionValue, Scalar};
use crate::error::CqlResult;

/// Render a collection value as a CQL literal.
pub fn render_collection(kind: CollectionKind, value: &CollectionValue) -> String {
    match kind {
        CollectionKind::Set => format!("{{{}}}", join_values(value)),
        CollectionKind::List => format!("[{}]", join_values(value)),
        CollectionKind::Map => format!("{{{}}}", join_map(value)),
    }
}

/// Render from a textual kind tag (`"set"`, `"list"`, `"map"`).
pub fn render_tagged(kind: &str, value: &CollectionValue) -> CqlResult<String> {
    Ok(render_collection(kind.parse()?, value))
}

/// Elements in order. Keys of an entry list are dropped.
fn join_values(value: &CollectionValue) -> String {
    match value {
        CollectionValue::Elements(items) => join(items.iter()),
        CollectionValue::Entries(pairs) => join(pairs.iter().map(|(_, v)| v)),
    }
}

/// `'k':v` pairs when every key is a string, otherwise the values alone.
fn join_map(value: &CollectionValue) -> String {
    match value {
        CollectionValue::Entries(pairs) if pairs.iter().all(|(k, _)| k.is_string()) => pairs
            .iter()
            .map(|(k, v)| format!("{}:{}", k.to_literal(), v.to_literal()))
            .collect::<Vec<_>>()
            .join(", "),
        positional => join_values(positional),
    }
}

fn join<'a>(items: impl Iterator<Item = &'a Scalar>) -> String {
    items.map(Scalar::to_literal).collect::<Vec<_>>().join(", ")
}
