use serde::{Deserialize, Serialize};

use crate::ast::{CollectionMutation, Scalar};

/// Statement kind a descriptor compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
    CreateIndex,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Select => write!(f, "select"),
            Operation::Insert => write!(f, "insert"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::CreateIndex => write!(f, "create index"),
        }
    }
}

/// A scalar assignment: `column = value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub column: String,
    pub value: Scalar,
}

impl ColumnValue {
    pub fn new(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// One insert row, columns in caller order.
pub type Row = Vec<ColumnValue>;

/// Build a row from `(column, value)` pairs.
pub fn row<I, K, V>(pairs: I) -> Row
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Scalar>,
{
    pairs
        .into_iter()
        .map(|(k, v)| ColumnValue::new(k, v))
        .collect()
}

/// Everything the compiler needs to render one statement.
///
/// `where_fragment` is opaque text produced by the base query builder,
/// including its leading `where` keyword; its `?` markers are satisfied by
/// `where_bindings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub operation: Operation,
    pub table: String,
    /// Select projection; empty means `*`.
    #[serde(default)]
    pub projection: Vec<String>,
    #[serde(default)]
    pub where_fragment: String,
    #[serde(default)]
    pub where_bindings: Vec<Scalar>,
    /// Text appended verbatim: order/limit on select, `if not exists` or
    /// `using ttl ..` on insert.
    #[serde(default)]
    pub trailing: String,
    /// Update assignments, or the (first) insert row.
    #[serde(default)]
    pub columns: Vec<ColumnValue>,
    /// Further insert rows of a batch insert.
    #[serde(default)]
    pub batch_rows: Vec<Row>,
    #[serde(default)]
    pub insert_collections: Vec<CollectionMutation>,
    #[serde(default)]
    pub update_collections: Vec<CollectionMutation>,
    /// Non-empty turns a row delete into a column delete.
    #[serde(default)]
    pub delete_columns: Vec<String>,
    #[serde(default)]
    pub index_columns: Vec<String>,
}

impl QueryDescriptor {
    /// Empty descriptor for `operation` against `table`.
    pub fn new(operation: Operation, table: impl Into<String>) -> Self {
        Self {
            operation,
            table: table.into(),
            projection: Vec::new(),
            where_fragment: String::new(),
            where_bindings: Vec::new(),
            trailing: String::new(),
            columns: Vec::new(),
            batch_rows: Vec::new(),
            insert_collections: Vec::new(),
            update_collections: Vec::new(),
            delete_columns: Vec::new(),
            index_columns: Vec::new(),
        }
    }

    /// Select every column of `table`.
    pub fn select(table: impl Into<String>) -> Self {
        Self::new(Operation::Select, table)
    }

    /// Insert into `table`; add values with [`Self::column`].
    pub fn insert(table: impl Into<String>) -> Self {
        Self::new(Operation::Insert, table)
    }

    /// Update `table`; add assignments with [`Self::column`].
    pub fn update(table: impl Into<String>) -> Self {
        Self::new(Operation::Update, table)
    }

    /// Delete whole rows, or `delete_columns` only.
    pub fn delete(table: impl Into<String>) -> Self {
        Self::new(Operation::Delete, table)
    }

    /// Secondary index on `index_columns`.
    pub fn create_index(table: impl Into<String>) -> Self {
        Self::new(Operation::CreateIndex, table)
    }

    /// Set the where fragment and the values for its markers.
    pub fn filter(mut self, fragment: impl Into<String>, bindings: Vec<Scalar>) -> Self {
        self.where_fragment = fragment.into();
        self.where_bindings = bindings;
        self
    }

    /// Append a scalar column and its value.
    pub fn column(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.columns.push(ColumnValue::new(column, value));
        self
    }

    /// Add a full collection literal to an insert.
    pub fn insert_collection(mut self, mutation: CollectionMutation) -> Self {
        self.insert_collections.push(mutation);
        self
    }

    /// Add a collection assignment to an update.
    pub fn update_collection(mut self, mutation: CollectionMutation) -> Self {
        self.update_collections.push(mutation);
        self
    }

    /// Load a descriptor from JSON text.
    pub fn from_json(json: &str) -> crate::error::CqlResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
