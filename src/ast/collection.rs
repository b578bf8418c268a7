use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ast::Scalar;
use crate::error::CqlError;

/// Collection column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CollectionKind {
    Set,
    List,
    Map,
}

impl CollectionKind {
    /// Lowercase tag: `set`, `list` or `map`.
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::Set => "set",
            CollectionKind::List => "list",
            CollectionKind::Map => "map",
        }
    }
}

impl FromStr for CollectionKind {
    type Err = CqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "set" => Ok(CollectionKind::Set),
            "list" => Ok(CollectionKind::List),
            "map" => Ok(CollectionKind::Map),
            _ => Err(CqlError::InvalidCollectionKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for CollectionKind {
    type Error = CqlError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CollectionKind> for String {
    fn from(kind: CollectionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incremental update applied to an existing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CollectionOp {
    /// `col = col + literal`
    Append,
    /// `col = col - literal`
    Remove,
}

impl CollectionOp {
    /// `+` or `-` as written in the assignment.
    pub fn symbol(self) -> char {
        match self {
            CollectionOp::Append => '+',
            CollectionOp::Remove => '-',
        }
    }
}

impl FromStr for CollectionOp {
    type Err = CqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "append" => Ok(CollectionOp::Append),
            "-" | "remove" => Ok(CollectionOp::Remove),
            other => Err(CqlError::malformed(format!(
                "unknown collection operation '{}', expected '+' or '-'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for CollectionOp {
    type Error = CqlError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CollectionOp> for String {
    fn from(op: CollectionOp) -> Self {
        op.symbol().to_string()
    }
}

/// Payload of a collection mutation, in caller order.
///
/// Maps are ordered `(key, value)` pairs rather than a hash map: literal text
/// must follow insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CollectionValue {
    Elements(Vec<Scalar>),
    Entries(Vec<(Scalar, Scalar)>),
}

impl CollectionValue {
    /// Ordered elements for a set or list.
    pub fn elements<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        CollectionValue::Elements(items.into_iter().map(Into::into).collect())
    }

    /// Ordered key/value pairs for a map.
    pub fn entries<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Scalar>,
        V: Into<Scalar>,
    {
        CollectionValue::Entries(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One set/list/map write recorded against a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMutation {
    pub kind: CollectionKind,
    pub column: String,
    pub value: CollectionValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<CollectionOp>,
}

impl CollectionMutation {
    /// Full-literal mutation (insert, or replace on update).
    pub fn new(kind: CollectionKind, column: impl Into<String>, value: CollectionValue) -> Self {
        Self {
            kind,
            column: column.into(),
            value,
            operation: None,
        }
    }

    /// Build from a textual kind tag, rejecting anything but set/list/map.
    pub fn parse(kind: &str, column: impl Into<String>, value: CollectionValue) -> Result<Self, CqlError> {
        Ok(Self::new(kind.parse()?, column, value))
    }

    /// Set literal for `column`.
    pub fn set<I, T>(column: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::new(CollectionKind::Set, column, CollectionValue::elements(items))
    }

    /// List literal for `column`.
    pub fn list<I, T>(column: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::new(CollectionKind::List, column, CollectionValue::elements(items))
    }

    /// Map literal for `column`.
    pub fn map<I, K, V>(column: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Scalar>,
        V: Into<Scalar>,
    {
        Self::new(CollectionKind::Map, column, CollectionValue::entries(pairs))
    }

    /// Turn this into an incremental update.
    pub fn with_operation(mut self, operation: CollectionOp) -> Self {
        self.operation = Some(operation);
        self
    }

    /// `col=col+literal` on update.
    pub fn append(self) -> Self {
        self.with_operation(CollectionOp::Append)
    }

    /// `col=col-literal` on update.
    pub fn remove(self) -> Self {
        self.with_operation(CollectionOp::Remove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("set".parse::<CollectionKind>().unwrap(), CollectionKind::Set);
        assert_eq!("LIST".parse::<CollectionKind>().unwrap(), CollectionKind::List);
        assert_eq!("Map".parse::<CollectionKind>().unwrap(), CollectionKind::Map);
    }

    #[test]
    fn test_invalid_kind() {
        let err = "tuple".parse::<CollectionKind>().unwrap_err();
        assert!(matches!(err, CqlError::InvalidCollectionKind(ref k) if k == "tuple"));
    }

    #[test]
    fn test_operation_from_str() {
        assert_eq!("+".parse::<CollectionOp>().unwrap(), CollectionOp::Append);
        assert_eq!("remove".parse::<CollectionOp>().unwrap(), CollectionOp::Remove);
        assert!("*".parse::<CollectionOp>().is_err());
    }

    #[test]
    fn test_mutation_json() {
        let m: CollectionMutation = serde_json::from_str(
            r#"{"kind": "map", "column": "attrs", "value": [["a", 1], ["b", 2]], "operation": "+"}"#,
        )
        .unwrap();
        assert_eq!(m.kind, CollectionKind::Map);
        assert_eq!(m.operation, Some(CollectionOp::Append));
        assert_eq!(m, CollectionMutation::map("attrs", [("a", 1), ("b", 2)]).append());
    }

    #[test]
    fn test_mutation_json_rejects_unknown_kind() {
        let err = serde_json::from_str::<CollectionMutation>(
            r#"{"kind": "tuple", "column": "t", "value": [1]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid collection kind"));
    }
}
