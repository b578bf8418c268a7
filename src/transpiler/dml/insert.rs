//! INSERT CQL generation.

use std::collections::HashSet;

use crate::ast::*;
use crate::error::{CqlError, CqlResult};
use crate::transpiler::RenderedStatement;
use crate::transpiler::collection::render_collection;

use super::{push_clause, require_table};

/// Generate INSERT CQL.
///
/// Scalar columns come first with one `?` each, followed by the insert
/// collections as inlined literals. Several rows become one logged batch with
/// every row reordered to the first row's column order.
pub fn build_insert(cmd: &QueryDescriptor) -> CqlResult<RenderedStatement> {
    let table = require_table(cmd)?;

    let columns: Vec<&str> = cmd.columns.iter().map(|c| c.column.as_str()).collect();
    ensure_unique(&columns)?;

    if columns.is_empty() && cmd.insert_collections.is_empty() {
        return Err(CqlError::malformed(format!(
            "insert into '{}' has no columns",
            table
        )));
    }

    let mut rows: Vec<Vec<&Scalar>> = vec![cmd.columns.iter().map(|c| &c.value).collect()];
    for (i, row) in cmd.batch_rows.iter().enumerate() {
        rows.push(align_row(&columns, row, i + 2)?);
    }

    let mut literals = Vec::with_capacity(cmd.insert_collections.len());
    let mut all_columns = columns.clone();
    for m in &cmd.insert_collections {
        if m.operation.is_some() {
            return Err(CqlError::malformed(format!(
                "insert collection '{}' cannot carry an operation",
                m.column
            )));
        }
        all_columns.push(m.column.as_str());
        literals.push(render_collection(m.kind, &m.value));
    }
    let column_list = all_columns.join(", ");

    let mut statements: Vec<String> = rows
        .iter()
        .map(|row| {
            let values = row
                .iter()
                .map(|_| "?".to_string())
                .chain(literals.iter().cloned())
                .collect::<Vec<_>>()
                .join(", ");
            let mut cql = format!("insert into {} ({}) values ({})", table, column_list, values);
            push_clause(&mut cql, &cmd.trailing);
            cql
        })
        .collect();

    let cql = if statements.len() == 1 {
        statements.remove(0)
    } else {
        format!("begin batch {}; apply batch", statements.join("; "))
    };

    let parameters = rows.into_iter().flatten().cloned().collect();

    Ok(RenderedStatement::new(Operation::Insert, cql, parameters))
}

fn ensure_unique(columns: &[&str]) -> CqlResult<()> {
    let mut seen = HashSet::new();
    for col in columns {
        if !seen.insert(*col) {
            return Err(CqlError::malformed(format!(
                "column '{}' appears twice in insert",
                col
            )));
        }
    }
    Ok(())
}

/// Values of `row` in `columns` order. `position` is 1-based, for messages.
fn align_row<'a>(columns: &[&str], row: &'a [ColumnValue], position: usize) -> CqlResult<Vec<&'a Scalar>> {
    if row.len() != columns.len() {
        return Err(CqlError::malformed(format!(
            "batch row {} has {} column(s), expected {}",
            position,
            row.len(),
            columns.len()
        )));
    }

    columns
        .iter()
        .map(|col| {
            let mut matches = row.iter().filter(|c| c.column == *col);
            match (matches.next(), matches.next()) {
                (Some(found), None) => Ok(&found.value),
                _ => Err(CqlError::malformed(format!(
                    "batch row {} does not match the column set of the first row (column '{}')",
                    position, col
                ))),
            }
        })
        .collect()
}
