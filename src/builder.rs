//! Fluent query builder.
//!
//! Accumulates the pieces of a statement and hands out a [`QueryDescriptor`]
//! per operation.
//!
//! ```
//! use cql_grammar::prelude::*;
//!
//! let cql = QueryBuilder::table("users")
//!     .update_collection("set", "tags", Some("+"), CollectionValue::elements(["admin"]))?
//!     .where_eq("id", 7)
//!     .update(vec![ColumnValue::new("name", "bob")])
//!     .to_cql()?
//!     .bind()?;
//! assert_eq!(cql, "update users set name = 'bob', tags=tags+{'admin'} where id = 7");
//! # Ok::<(), cql_grammar::error::CqlError>(())
//! ```

use crate::ast::*;
use crate::error::{CqlError, CqlResult};
use crate::transpiler::ToCql;

/// Sort direction for `order by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    table: String,
    projection: Vec<String>,
    wheres: Vec<String>,
    where_bindings: Vec<Scalar>,
    orders: Vec<(String, SortOrder)>,
    limit: Option<usize>,
    insert_collections: Vec<CollectionMutation>,
    update_collections: Vec<CollectionMutation>,
}

impl QueryBuilder {
    /// Start a query against `table` (optionally `keyspace.table`).
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            ..Self::default()
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Add a pre-rendered condition. Its `?` markers take `bindings` in order.
    pub fn where_raw(mut self, condition: impl Into<String>, bindings: Vec<Scalar>) -> Self {
        self.wheres.push(condition.into());
        self.where_bindings.extend(bindings);
        self
    }

    pub fn where_eq(self, column: &str, value: impl Into<Scalar>) -> Self {
        self.where_raw(format!("{} = ?", column), vec![value.into()])
    }

    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.orders.push((column.into(), order));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Record a collection written as a full literal on insert.
    pub fn insert_collection(self, kind: &str, column: &str, value: CollectionValue) -> CqlResult<Self> {
        Ok(self.with_insert_collection(CollectionMutation::parse(kind, column, value)?))
    }

    /// Record a collection assignment for update. `operation` is `+`/`-`
    /// (or `append`/`remove`); `None` replaces the whole collection.
    pub fn update_collection(
        self,
        kind: &str,
        column: &str,
        operation: Option<&str>,
        value: CollectionValue,
    ) -> CqlResult<Self> {
        let mut mutation = CollectionMutation::parse(kind, column, value)?;
        if let Some(op) = operation {
            mutation = mutation.with_operation(op.parse()?);
        }
        Ok(self.with_update_collection(mutation))
    }

    pub fn with_insert_collection(mut self, mutation: CollectionMutation) -> Self {
        self.insert_collections.push(mutation);
        self
    }

    pub fn with_update_collection(mut self, mutation: CollectionMutation) -> Self {
        self.update_collections.push(mutation);
        self
    }

    fn where_fragment(&self) -> String {
        if self.wheres.is_empty() {
            String::new()
        } else {
            format!("where {}", self.wheres.join(" and "))
        }
    }

    fn trailing(&self) -> String {
        let mut parts = Vec::new();
        if !self.orders.is_empty() {
            let orders: Vec<String> = self
                .orders
                .iter()
                .map(|(col, order)| match order {
                    SortOrder::Asc => format!("{} asc", col),
                    SortOrder::Desc => format!("{} desc", col),
                })
                .collect();
            parts.push(format!("order by {}", orders.join(", ")));
        }
        if let Some(n) = self.limit {
            parts.push(format!("limit {}", n));
        }
        parts.join(" ")
    }

    fn descriptor(&self, operation: Operation) -> QueryDescriptor {
        let mut desc = QueryDescriptor::new(operation, self.table.clone());
        desc.where_fragment = self.where_fragment();
        desc.where_bindings = self.where_bindings.clone();
        desc
    }

    pub fn select(&self) -> QueryDescriptor {
        let mut desc = self.descriptor(Operation::Select);
        desc.projection = self.projection.clone();
        desc.trailing = self.trailing();
        desc
    }

    pub fn insert(&self, row: Row) -> QueryDescriptor {
        let mut desc = self.descriptor(Operation::Insert);
        desc.where_fragment.clear();
        desc.where_bindings.clear();
        desc.columns = row;
        desc.insert_collections = self.insert_collections.clone();
        desc
    }

    /// Several rows in one statement; all rows must share one column set.
    pub fn insert_batch(&self, rows: Vec<Row>) -> CqlResult<QueryDescriptor> {
        let mut rows = rows.into_iter();
        let first = rows
            .next()
            .ok_or_else(|| CqlError::malformed(format!("batch insert into '{}' has no rows", self.table)))?;
        let mut desc = self.insert(first);
        desc.batch_rows = rows.collect();
        Ok(desc)
    }

    pub fn update(&self, values: Vec<ColumnValue>) -> QueryDescriptor {
        let mut desc = self.descriptor(Operation::Update);
        desc.columns = values;
        desc.update_collections = self.update_collections.clone();
        desc
    }

    pub fn delete_row(&self) -> QueryDescriptor {
        self.descriptor(Operation::Delete)
    }

    pub fn delete_columns<I, S>(&self, columns: I) -> QueryDescriptor
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut desc = self.descriptor(Operation::Delete);
        desc.delete_columns = columns.into_iter().map(Into::into).collect();
        desc
    }

    pub fn create_index<I, S>(&self, columns: I) -> QueryDescriptor
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut desc = QueryDescriptor::create_index(self.table.clone());
        desc.index_columns = columns.into_iter().map(Into::into).collect();
        desc
    }

    /// Compile and bind the select statement.
    pub fn to_cql(&self) -> CqlResult<String> {
        self.select().to_cql()?.bind()
    }
}
